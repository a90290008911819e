use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Candidate poem URLs on an author's listing page.
///
/// Keeps hrefs under the author's own path that name a single `.html` page
/// and are not book/collection indexes (`_book`). In-page anchors, script
/// pseudo-links, mail links and empty hrefs are dropped. Set semantics
/// de-duplicate repeated links.
pub fn discover(doc: &Html, base_url: &str, author_key: &str) -> HashSet<String> {
    let prefix = format!("/{}/", author_key);
    let mut links = HashSet::new();

    for anchor in doc.select(&ANCHOR_SEL) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty()
            || href.starts_with("javascript:")
            || href.starts_with('#')
            || href.starts_with("mailto:")
        {
            continue;
        }
        if href.starts_with(&prefix) && href.ends_with(".html") && !href.contains("_book") {
            links.insert(format!("{}{}", base_url, href));
        }
    }

    links
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://knihi.com";

    fn discover_in(html: &str) -> HashSet<String> {
        discover(&Html::parse_document(html), BASE, "Jakub_Kolas")
    }

    #[test]
    fn keeps_only_author_poem_pages() {
        let html = r#"<html><body>
            <a href="/Jakub_Kolas/Viasna.html">Вясна</a>
            <a href="/Jakub_Kolas/Symon_muzyka_book.html">Сымон-музыка</a>
            <a href="/Janka_Kupala/Spadczyna.html">Спадчына</a>
            <a href="/Jakub_Kolas/pra_autara">Пра аўтара</a>
            <a href="/Jakub_Kolas/Rodnyja_vobrazy.html">Родныя вобразы</a>
        </body></html>"#;
        let links = discover_in(html);
        assert_eq!(links.len(), 2);
        assert!(links.contains("https://knihi.com/Jakub_Kolas/Viasna.html"));
        assert!(links.contains("https://knihi.com/Jakub_Kolas/Rodnyja_vobrazy.html"));
    }

    #[test]
    fn skips_pseudo_links() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">меню</a>
            <a href="#top">наверх</a>
            <a href="mailto:admin@knihi.com">пошта</a>
            <a href="">пуста</a>
            <a href="   ">прабелы</a>
        </body></html>"##;
        assert!(discover_in(html).is_empty());
    }

    #[test]
    fn excludes_book_index_even_when_prefix_and_suffix_match() {
        let html = r#"<a href="/Jakub_Kolas/zbor_book.html">кніга</a>"#;
        assert!(discover_in(html).is_empty());
    }

    #[test]
    fn duplicate_hrefs_collapse_to_one() {
        let html = r#"
            <a href="/Jakub_Kolas/Viasna.html">Вясна</a>
            <a href="/Jakub_Kolas/Viasna.html">Вясна (яшчэ раз)</a>
        "#;
        assert_eq!(discover_in(html).len(), 1);
    }

    #[test]
    fn trims_whitespace_around_href() {
        let html = r#"<a href="  /Jakub_Kolas/Viasna.html  ">Вясна</a>"#;
        let links = discover_in(html);
        assert!(links.contains("https://knihi.com/Jakub_Kolas/Viasna.html"));
    }

    #[test]
    fn realistic_listing_page() {
        let html = std::fs::read_to_string("tests/fixtures/listing.html").unwrap();
        let links = discover_in(&html);
        assert_eq!(links.len(), 3);
        assert!(links.contains("https://knihi.com/Jakub_Kolas/Viasna.html"));
        assert!(links.contains("https://knihi.com/Jakub_Kolas/Susiedzi.html"));
        assert!(links.contains("https://knihi.com/Jakub_Kolas/Zima.html"));
    }
}
