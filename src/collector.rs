use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::{AuthorTarget, Config};
use crate::dataset::PoemRecord;
use crate::fetch::PageSource;
use crate::filter::matches_keywords;
use crate::parser::{links, poem};

/// Why a candidate link produced no record. Failures are per-candidate and
/// never abort the author pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch failed at some step of the candidate pipeline.
    FetchFailed,
    /// The page is not a single poem: no poem region, or region too long.
    NotPoem,
    /// The poem region was absent or empty where a body was required.
    RegionMissing,
    /// No keyword occurs in the poem text.
    NoKeywordMatch,
}

/// Collect keyword-matching poems for one author, up to the configured limit.
///
/// Discovers candidate links on the author's listing page, then runs each
/// candidate through classify → extract → keyword filter. A failed listing
/// fetch ends the pass with an empty result.
pub async fn collect(
    source: &dyn PageSource,
    config: &Config,
    author: &AuthorTarget,
) -> Vec<PoemRecord> {
    let listing_url = format!("{}/{}/", config.base_url, author.key);
    let listing = match source.fetch_html(&listing_url).await {
        Ok(html) => html,
        Err(err) => {
            warn!("{}: failed to load author listing: {}", author.name, err);
            return Vec::new();
        }
    };

    let candidates = {
        let doc = Html::parse_document(&listing);
        links::discover(&doc, &config.base_url, &author.key)
    };
    info!("{}: {} unique candidate links", author.name, candidates.len());

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut poems: Vec<PoemRecord> = Vec::new();
    for link in &candidates {
        if poems.len() >= config.limit {
            break;
        }
        match process_candidate(source, config, link).await {
            Ok(record) => {
                info!("{}: collected '{}'", author.name, record.title);
                poems.push(record);
                tokio::time::sleep(config.request_delay).await;
            }
            Err(reason) => debug!("{}: skipped {} ({:?})", author.name, link, reason),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "{}: {} poems with keyword matches",
        author.name,
        poems.len()
    );
    poems
}

/// Run one candidate through the pipeline. Classification, extraction and the
/// keyword filter each fetch the page themselves; the filter reads the poem
/// region from its own fetch, not from the extracted record.
async fn process_candidate(
    source: &dyn PageSource,
    config: &Config,
    url: &str,
) -> Result<PoemRecord, SkipReason> {
    let html = fetch_step(source, url).await?;
    let accepted = {
        let doc = Html::parse_document(&html);
        poem::is_poem(&doc, config.max_poem_length)
    };
    if !accepted {
        return Err(SkipReason::NotPoem);
    }

    let html = fetch_step(source, url).await?;
    let record = {
        let doc = Html::parse_document(&html);
        poem::extract(url, &doc)
    };

    let html = fetch_step(source, url).await?;
    let region_text = {
        let doc = Html::parse_document(&html);
        poem::poem_text(&doc)
    };
    let Some(region_text) = region_text else {
        return Err(SkipReason::RegionMissing);
    };
    if !matches_keywords(&region_text, &config.keywords) {
        return Err(SkipReason::NoKeywordMatch);
    }
    if record.text.is_empty() {
        // The extraction fetch saw no body; an empty record must not reach
        // the dataset.
        return Err(SkipReason::RegionMissing);
    }
    Ok(record)
}

async fn fetch_step(source: &dyn PageSource, url: &str) -> Result<String, SkipReason> {
    source.fetch_html(url).await.map_err(|err| {
        warn!("fetch failed for {}: {}", url, err);
        SkipReason::FetchFailed
    })
}

// ── Tests ──
