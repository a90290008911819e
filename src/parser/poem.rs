use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::dataset::PoemRecord;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());
static POETRY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.POETRY").unwrap());
static H2_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());
static ITALIC_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("i").unwrap());

/// Placeholders when the page carries fewer than two `<h2>` headings.
const UNTITLED: &str = "Без названия";
const UNKNOWN_AUTHOR: &str = "Неизвестен";

/// The structural marker for a poem body on this site.
fn poem_region(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&POETRY_SEL).next()
}

/// Region text with each fragment trimmed and concatenated. Used for the
/// length check only; line structure does not matter there.
fn compact_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Region text with line breaks preserved between fragments, surrounding
/// whitespace trimmed.
fn line_text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join("\n").trim().to_string()
}

/// Whether the document is a single poem: the poem region is present and its
/// text stays under the length cap. Prose pages and anthology indexes share
/// the markup but run long.
pub fn is_poem(doc: &Html, max_poem_length: usize) -> bool {
    match poem_region(doc) {
        Some(div) => compact_text(div).chars().count() <= max_poem_length,
        None => false,
    }
}

/// Poem body text, if the page has a poem region. The keyword filter runs on
/// this rather than on an already-extracted record.
pub fn poem_text(doc: &Html) -> Option<String> {
    poem_region(doc).map(line_text)
}

/// Extract the poem fields from a page. Malformed structure degrades to
/// placeholder or empty values, never to an error.
pub fn extract(url: &str, doc: &Html) -> PoemRecord {
    let headings: Vec<String> = doc
        .select(&H2_SEL)
        .map(|h| h.text().collect::<String>().trim().to_string())
        .collect();

    // First heading is the author, second the poem title in quotes.
    let (author, title) = if headings.len() >= 2 {
        (
            headings[0].clone(),
            headings[1].trim_matches('"').to_string(),
        )
    } else {
        (UNKNOWN_AUTHOR.to_string(), UNTITLED.to_string())
    };

    let year = doc
        .select(&ITALIC_SEL)
        .next()
        .and_then(|i| YEAR_RE.find(&compact_text(i)).map(|m| m.as_str().to_string()))
        .and_then(|digits| digits.parse::<u16>().ok());

    let text = poem_region(doc).map(line_text).unwrap_or_default();

    PoemRecord {
        title,
        author,
        year,
        url: url.to_string(),
        text,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    fn poetry_page(body: &str) -> String {
        format!(r#"<html><body><div class="POETRY">{}</div></body></html>"#, body)
    }

    #[test]
    fn classifier_accepts_region_at_length_cap() {
        let page = poetry_page(&"а".repeat(2000));
        assert!(is_poem(&doc(&page), 2000));
    }

    #[test]
    fn classifier_rejects_region_over_length_cap() {
        let page = poetry_page(&"а".repeat(2001));
        assert!(!is_poem(&doc(&page), 2000));
    }

    #[test]
    fn classifier_rejects_page_without_region() {
        let page = r#"<html><body><p>Апавяданне ў прозе.</p></body></html>"#;
        assert!(!is_poem(&doc(page), 2000));
    }

    #[test]
    fn length_check_ignores_markup_whitespace() {
        // Fragments are trimmed before counting, so indentation and <br/>
        // line structure do not push a poem over the cap.
        let body = format!("\n    {}\n    <br/>\n    {}\n", "а".repeat(1000), "б".repeat(1000));
        assert!(is_poem(&doc(&poetry_page(&body)), 2000));
    }

    #[test]
    fn extracts_author_title_and_strips_quotes() {
        let page = r#"<html><body>
            <h2>Якуб Колас</h2>
            <h2>"Вясна"</h2>
            <div class="POETRY">Ідзе вясна.</div>
        </body></html>"#;
        let record = extract("https://knihi.com/Jakub_Kolas/viasna.html", &doc(page));
        assert_eq!(record.author, "Якуб Колас");
        assert_eq!(record.title, "Вясна");
        assert_eq!(record.text, "Ідзе вясна.");
    }

    #[test]
    fn falls_back_to_placeholders_with_one_heading() {
        let page = r#"<html><body><h2>Якуб Колас</h2></body></html>"#;
        let record = extract("https://knihi.com/x.html", &doc(page));
        assert_eq!(record.author, "Неизвестен");
        assert_eq!(record.title, "Без названия");
        assert_eq!(record.text, "");
    }

    #[test]
    fn year_from_first_italic_element() {
        let page = r#"<html><body><i>1912 г.</i></body></html>"#;
        assert_eq!(extract("u", &doc(page)).year, Some(1912));
    }

    #[test]
    fn no_year_when_italic_has_no_digits() {
        let page = r#"<html><body><i>без даты</i></body></html>"#;
        assert_eq!(extract("u", &doc(page)).year, None);
    }

    #[test]
    fn no_year_without_italic_element() {
        let page = r#"<html><body><p>1912</p></body></html>"#;
        assert_eq!(extract("u", &doc(page)).year, None);
    }

    #[test]
    fn poem_text_preserves_line_breaks() {
        let page = poetry_page("Сонца грэе, прыпякае;<br/>Лёд на рэчцы трэскае.");
        assert_eq!(
            poem_text(&doc(&page)).unwrap(),
            "Сонца грэе, прыпякае;\nЛёд на рэчцы трэскае."
        );
    }

    #[test]
    fn poem_text_absent_without_region() {
        assert_eq!(poem_text(&doc("<html><body></body></html>")), None);
    }

    #[test]
    fn realistic_page_extracts_all_fields() {
        let html = std::fs::read_to_string("tests/fixtures/poem_spring.html").unwrap();
        let record = extract("https://knihi.com/Jakub_Kolas/Viasna.html", &doc(&html));
        assert_eq!(record.author, "Якуб Колас");
        assert_eq!(record.title, "Вясна");
        assert_eq!(record.year, Some(1910));
        assert!(record.text.starts_with("Сонца грэе"));
        assert!(record.text.lines().count() >= 4);
    }
}
