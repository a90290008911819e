use std::collections::{BTreeMap, HashMap};

use crate::config::Config;
use crate::dataset::PoemRecord;

const HEAD_ROWS: usize = 10;
const TOP_WORDS: usize = 15;
const BAR_WIDTH: usize = 40;
const MIN_WORD_CHARS: usize = 4;

/// Total non-overlapping occurrences of each keyword across all texts,
/// most frequent first. Keywords that never occur are omitted.
pub fn keyword_frequency<'a>(texts: &[&str], keywords: &'a [String]) -> Vec<(&'a str, usize)> {
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    let mut freq: Vec<(&str, usize)> = keywords
        .iter()
        .map(|word| {
            let needle = word.to_lowercase();
            let count = lowered.iter().map(|t| t.matches(needle.as_str()).count()).sum();
            (word.as_str(), count)
        })
        .filter(|&(_, count)| count > 0)
        .collect();
    freq.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    freq
}

/// Occurrence totals per theme group, in configuration order. Groups with no
/// occurrences stay in the result with a zero count.
pub fn theme_frequency<'a>(texts: &[&str], config: &'a Config) -> Vec<(&'a str, usize)> {
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    config
        .theme_groups
        .iter()
        .map(|group| {
            let count = group
                .words
                .iter()
                .map(|word| {
                    let needle = word.to_lowercase();
                    lowered
                        .iter()
                        .map(|t| t.matches(needle.as_str()).count())
                        .sum::<usize>()
                })
                .sum();
            (group.name.as_str(), count)
        })
        .collect()
}

/// Frequency of whitespace-separated tokens longer than four characters that
/// are not themselves keywords.
pub fn word_counts(texts: &[&str], keywords: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for text in texts {
        for word in text.to_lowercase().split_whitespace() {
            if word.chars().count() > MIN_WORD_CHARS && !keywords.iter().any(|k| k == word) {
                *counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }
    }
    counts
}

pub fn most_common(counts: &HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut words: Vec<(String, usize)> = counts.iter().map(|(w, c)| (w.clone(), *c)).collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    words.truncate(n);
    words
}

pub fn rarest(counts: &HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut words: Vec<(String, usize)> = counts.iter().map(|(w, c)| (w.clone(), *c)).collect();
    words.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    words.truncate(n);
    words
}

/// Poems per publication year; records without a year are left out.
pub fn year_counts(records: &[PoemRecord]) -> BTreeMap<u16, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(year) = record.year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts
}

/// Mean text length (in characters) per publication year.
pub fn mean_length_by_year(records: &[PoemRecord]) -> BTreeMap<u16, f64> {
    let mut sums: BTreeMap<u16, (usize, usize)> = BTreeMap::new();
    for record in records {
        if let Some(year) = record.year {
            let entry = sums.entry(year).or_insert((0, 0));
            entry.0 += record.text.chars().count();
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(year, (total, count))| (year, total as f64 / count as f64))
        .collect()
}

// ── Terminal output ──

/// Dataset overview: head rows, missing values, numeric stats. The analog of
/// the offline dataframe inspection step.
pub fn print_summary(records: &[PoemRecord]) {
    println!("{} records", records.len());

    println!(
        "\n{:>3} | {:<28} | {:<16} | {:>4} | {:<44}",
        "#", "Title", "Author", "Year", "URL"
    );
    println!("{}", "-".repeat(104));
    for (i, record) in records.iter().take(HEAD_ROWS).enumerate() {
        let year = record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:>3} | {:<28} | {:<16} | {:>4} | {:<44}",
            i + 1,
            truncate(&record.title, 28),
            truncate(&record.author, 16),
            year,
            truncate(&record.url, 44),
        );
    }

    let missing_year = records.iter().filter(|r| r.year.is_none()).count();
    println!("\nMissing values: year {} / {}", missing_year, records.len());

    let years: Vec<u16> = records.iter().filter_map(|r| r.year).collect();
    if let (Some(min), Some(max)) = (years.iter().min(), years.iter().max()) {
        println!(
            "Year: min {} | max {} | mean {:.1} (over {} records)",
            min,
            max,
            mean(years.iter().map(|&y| y as usize)),
            years.len()
        );
    }

    let lengths: Vec<usize> = records.iter().map(|r| r.text.chars().count()).collect();
    if let (Some(min), Some(max)) = (lengths.iter().min(), lengths.iter().max()) {
        println!(
            "Text length (chars): min {} | max {} | mean {:.1}",
            min,
            max,
            mean(lengths.iter().copied())
        );
    }
}

/// Keyword, theme, vocabulary and year frequency report. The analog of the
/// offline chart stage, rendered as tables with proportional bars.
pub fn print_report(records: &[PoemRecord], config: &Config) {
    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();

    let freq = keyword_frequency(&texts, &config.keywords);
    if freq.is_empty() {
        println!("No keywords found in any text.");
        return;
    }

    println!("Keyword frequency");
    let max = freq.first().map(|&(_, c)| c).unwrap_or(0);
    for (word, count) in &freq {
        println!(
            "  {:<12} {:>5}  {}",
            config.russian(word),
            count,
            bar(*count, max)
        );
    }

    println!("\nFrequency by theme group");
    let themes = theme_frequency(&texts, config);
    let max = themes.iter().map(|&(_, c)| c).max().unwrap_or(0);
    for (name, count) in &themes {
        println!("  {:<22} {:>5}  {}", name, count, bar(*count, max));
    }

    let counts = word_counts(&texts, &config.keywords);

    println!("\nTop {} words outside the keyword list", TOP_WORDS);
    for (word, count) in most_common(&counts, TOP_WORDS) {
        println!("  {:<20} {:>5}", word, count);
    }

    println!("\n{} rarest words outside the keyword list", TOP_WORDS);
    for (word, count) in rarest(&counts, TOP_WORDS) {
        println!("  {:<20} {:>5}", word, count);
    }

    let by_year = year_counts(records);
    if !by_year.is_empty() {
        println!("\nPoems per year");
        let max = by_year.values().copied().max().unwrap_or(0);
        for (year, count) in &by_year {
            println!("  {} {:>4}  {}", year, count, bar(*count, max));
        }

        println!("\nMean poem length per year (chars)");
        for (year, length) in mean_length_by_year(records) {
            println!("  {} {:>8.1}", year, length);
        }
    }
}

fn bar(value: usize, max: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    // Ceiling so small nonzero counts stay visible.
    let len = (value * BAR_WIDTH).div_ceil(max);
    "#".repeat(len.min(BAR_WIDTH))
}

fn mean(values: impl Iterator<Item = usize>) -> f64 {
    let (sum, count) = values.fold((0usize, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
