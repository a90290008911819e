use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Columns of the tabular dataset, in order.
const COLUMNS: [&str; 5] = ["title", "author", "year", "url", "text"];

/// One collected poem. Field order matches the dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemRecord {
    pub title: String,
    pub author: String,
    pub year: Option<u16>,
    pub url: String,
    pub text: String,
}

/// Write the full dataset as UTF-8 CSV with a header row. An absent year is
/// an empty field.
pub fn write_csv(path: &Path, records: &[PoemRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Vec<PoemRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row.with_context(|| format!("bad row in {}", path.display()))?);
    }
    Ok(records)
}

/// Write the dataset as a pretty-printed JSON array. Non-ASCII characters are
/// kept literal, not escaped.
pub fn write_json(path: &Path, records: &[PoemRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Vec<PoemRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let records = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(records)
}

/// Derived table with the text column dropped.
pub fn write_csv_without_text(path: &Path, records: &[PoemRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(["title", "author", "year", "url"])?;
    for record in records {
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        writer.write_record([&record.title, &record.author, &year, &record.url])?;
    }
    writer.flush()?;
    Ok(())
}

// ── Tests ──
