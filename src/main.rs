mod collector;
mod config;
mod dataset;
mod fetch;
mod filter;
mod parser;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use config::Config;
use fetch::HttpFetcher;

#[derive(Parser)]
#[command(
    name = "knihi_scraper",
    about = "Keyword-filtered poem scraper for knihi.com"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape configured authors and write the CSV + JSON dataset
    Collect {
        /// Max poems to accept per author
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Dataset CSV path
        #[arg(long, default_value = "poems_dataset.csv")]
        csv: PathBuf,
        /// Dataset JSON path
        #[arg(long, default_value = "poems_dataset.json")]
        json: PathBuf,
    },
    /// Dataset overview plus the no-text derivative table
    Summary {
        /// Dataset CSV to read
        #[arg(long, default_value = "poems_dataset.csv")]
        input: PathBuf,
        /// Derivative CSV to write
        #[arg(long, default_value = "poems_dataset_no_text.csv")]
        output: PathBuf,
    },
    /// Keyword, vocabulary and year frequency report
    Report {
        /// Dataset JSON to read
        #[arg(long, default_value = "poems_dataset.json")]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Collect { limit, csv, json } => {
            let mut cfg = Config::default();
            if let Some(n) = limit {
                cfg.limit = n;
            }
            let fetcher = HttpFetcher::new(&cfg)?;

            let mut all = Vec::new();
            for author in &cfg.authors {
                let poems = collector::collect(&fetcher, &cfg, author).await;
                println!("{}: collected {} poems", author.name, poems.len());
                all.extend(poems);
            }

            dataset::write_csv(&csv, &all)?;
            dataset::write_json(&json, &all)?;
            println!(
                "Saved {} poems to {} and {}",
                all.len(),
                csv.display(),
                json.display()
            );
            Ok(())
        }
        Commands::Summary { input, output } => {
            let records = dataset::read_csv(&input)?;
            report::print_summary(&records);
            dataset::write_csv_without_text(&output, &records)?;
            println!("\nSaved no-text table to {}", output.display());
            Ok(())
        }
        Commands::Report { input } => {
            let records = dataset::read_json(&input)?;
            let cfg = Config::default();
            report::print_report(&records, &cfg);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
