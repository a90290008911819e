use std::time::Duration;

/// One scrape target: the author's path segment on the site plus a display name.
#[derive(Debug, Clone)]
pub struct AuthorTarget {
    pub key: String,
    pub name: String,
}

/// Named group of thematic keywords, used by the frequency report.
#[derive(Debug, Clone)]
pub struct ThemeGroup {
    pub name: String,
    pub words: Vec<String>,
}

/// Run configuration. Built once in `main` and shared by reference; nothing
/// here is mutated after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub fetch_timeout: Duration,
    /// Politeness delay after each accepted poem.
    pub request_delay: Duration,
    /// Pages whose poem region is longer than this are treated as prose or
    /// anthology indexes, not single poems.
    pub max_poem_length: usize,
    /// Accepted poems per author in one run.
    pub limit: usize,
    pub keywords: Vec<String>,
    pub authors: Vec<AuthorTarget>,
    pub theme_groups: Vec<ThemeGroup>,
    /// Belarusian keyword → Russian label, for report output.
    pub keyword_translations: Vec<(String, String)>,
}

impl Config {
    /// Russian label for a keyword; falls back to the keyword itself.
    pub fn russian<'a>(&'a self, word: &'a str) -> &'a str {
        self.keyword_translations
            .iter()
            .find(|(bel, _)| bel == word)
            .map(|(_, ru)| ru.as_str())
            .unwrap_or(word)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://knihi.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36"
                .to_string(),
            fetch_timeout: Duration::from_secs(10),
            request_delay: Duration::from_millis(300),
            max_poem_length: 2000,
            limit: 101,
            keywords: strings(&[
                "кроў", "жыццё", "вецер", "зямля", "любоў", "смутак", "вясна", "зімa",
                "сонца", "душа", "сэрца", "боль", "шчасце", "святло", "цені", "надзея",
                "памяць", "воля",
            ]),
            authors: vec![AuthorTarget {
                key: "Jakub_Kolas".to_string(),
                name: "Якуб Колас".to_string(),
            }],
            theme_groups: vec![
                ThemeGroup {
                    name: "Природа".to_string(),
                    words: strings(&["вецер", "зямля", "вясна", "зімa", "сонца"]),
                },
                ThemeGroup {
                    name: "Чувства".to_string(),
                    words: strings(&[
                        "любоў", "смутак", "шчасце", "боль", "надзея", "воля", "кроў",
                        "святло",
                    ]),
                },
                ThemeGroup {
                    name: "Душевные состояния".to_string(),
                    words: strings(&["жыццё", "душа", "сэрца", "цені", "памяць"]),
                },
            ],
            keyword_translations: vec![
                ("кроў", "кровь"),
                ("жыццё", "жизнь"),
                ("вецер", "ветер"),
                ("зямля", "земля"),
                ("любоў", "любовь"),
                ("смутак", "грусть"),
                ("вясна", "весна"),
                ("зімa", "зима"),
                ("сонца", "солнце"),
                ("душа", "душа"),
                ("сэрца", "сердце"),
                ("боль", "боль"),
                ("шчасце", "счастье"),
                ("святло", "свет"),
                ("цені", "тени"),
                ("надзея", "надежда"),
                ("памяць", "память"),
                ("воля", "воля"),
            ]
            .into_iter()
            .map(|(b, r)| (b.to_string(), r.to_string()))
            .collect(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Tests ──
