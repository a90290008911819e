/// True when any keyword occurs in the text, case-insensitively.
///
/// Substring match: a keyword also counts inside a longer word.
pub fn matches_keywords(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|word| text.contains(&word.to_lowercase()))
}

// ── Tests ──
