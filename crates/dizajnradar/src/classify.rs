use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{Category, Status};

const CLOSED_AFTER_DAYS: i64 = 14;

fn rule(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("invalid classifier rule")
}

// First matching rule wins.
static CATEGORY_RULES: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    [
        (
            r"vizualni identitet|visual identity|logotip|brand",
            Category::VisualIdentity,
        ),
        (r"ilustraci|illustrat", Category::Illustration),
        (r"knjig|book", Category::BookDesign),
        (r"\bux\b|\bui\b|web|digital|interaction", Category::UxUi),
        (r"plakat|poster", Category::GraphicDesign),
        (r"modn|fashion", Category::FashionDesign),
        (
            r"produkt|product|industrijski|industrial",
            Category::IndustrialDesign,
        ),
        (r"architectur|arhitektur|interior", Category::Architecture),
        (
            r"typograph|tipografi|type design|font",
            Category::Typography,
        ),
        (r"packaging|package|ambalaž", Category::PackagingDesign),
        (r"communicat|komunikaci", Category::CommunicationDesign),
    ]
    .into_iter()
    .map(|(pattern, category)| (rule(pattern), category))
    .collect()
});

static RE_RESULTS: LazyLock<Regex> = LazyLock::new(|| {
    rule(r"rezultat|odabran|proglašen|završen|winner|result|selected|awarded")
});
static RE_NEWS_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    rule(r"izložb|exhibition|radionic|workshop|webinar|predavanj|zapošljav|job opening|oglas za posao")
});
static RE_CALL_FOR_ENTRIES: LazyLock<Regex> = LazyLock::new(|| {
    rule(r"natječaj|poziv|prijav|open call|call for|competition|submission")
});
static RE_PRIZE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| rule(r"([\d.,]+)\s*(?:EUR|€|eura)"));
static RE_PRIZE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| rule(r"nagrada|naknada|award|prize"));

static ORG_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        rule(r"(?:organizator|raspisivač|provoditelj)[:\s]+([A-ZČĆŽŠĐ][^.,;]{3,40})"),
        Regex::new(r"(POGON|Školska knjiga|ULUPUH|NSK|HDD|HDLU|HAC|HAKOM|KGZ)")
            .expect("invalid classifier rule"),
        rule(r"(Grad\s+\w+)"),
        rule(r"(Hrvatsko\s+\w+\s+\w+)"),
        rule(r"(Knjižnice\s+grada\s+\w+)"),
    ]
});

pub fn detect_category(text: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, category)| *category)
        .unwrap_or(Category::GraphicDesign)
}

// Result keywords win over the news rules.
pub fn detect_status(text: &str, deadline: Option<NaiveDate>, today: NaiveDate) -> Status {
    if RE_RESULTS.is_match(text) {
        return Status::Closed;
    }
    if RE_NEWS_NOISE.is_match(text) && !RE_CALL_FOR_ENTRIES.is_match(text) {
        return Status::News;
    }
    if let Some(d) = deadline
        && (today - d).num_days() > CLOSED_AFTER_DAYS
    {
        return Status::Closed;
    }
    Status::Active
}

pub fn extract_prize(text: &str) -> String {
    if let Some(c) = RE_PRIZE_AMOUNT.captures(text) {
        return format!("{} EUR", &c[1]);
    }
    if RE_PRIZE_MENTION.is_match(text) {
        return "Da (vidi detalje)".to_string();
    }
    "Nije navedeno".to_string()
}

pub fn extract_org(text: &str) -> Option<String> {
    ORG_RULES
        .iter()
        .find_map(|re| re.captures(text).map(|c| c[1].trim().to_string()))
}
