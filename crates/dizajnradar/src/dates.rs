use std::sync::LazyLock;

use chrono::{Datelike, Days, Months, NaiveDate};
use regex::Regex;

pub const DEFAULT_STALE_AFTER_DAYS: i64 = 180;

static RE_CROATIAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d{1,2})\.\s*(siječnja|veljače|ožujka|travnja|svibnja|lipnja|srpnja|kolovoza|rujna|listopada|studenoga|studenog|prosinca)\s*(\d{4})",
    )
    .expect("invalid regex: croatian date")
});
static RE_DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").expect("invalid regex: dotted date")
});
static RE_ENGLISH_MDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z]+)\s+(\d{1,2}),?\s*(\d{4})").expect("invalid regex: english m-d-y")
});
static RE_ENGLISH_DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s+([a-z]+)\s+(\d{4})").expect("invalid regex: english d-m-y")
});
static RE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("invalid regex: iso date"));
static RE_REMAINING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\+?\s*(day|week|month)").expect("invalid regex: remaining")
});
static RE_TITLE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("invalid regex: title year"));

fn croatian_month(token: &str) -> Option<u32> {
    match token.to_lowercase().as_str() {
        "siječnja" => Some(1),
        "veljače" => Some(2),
        "ožujka" => Some(3),
        "travnja" => Some(4),
        "svibnja" => Some(5),
        "lipnja" => Some(6),
        "srpnja" => Some(7),
        "kolovoza" => Some(8),
        "rujna" => Some(9),
        "listopada" => Some(10),
        "studenoga" | "studenog" => Some(11),
        "prosinca" => Some(12),
        _ => None,
    }
}

fn english_month(token: &str) -> Option<u32> {
    match token.to_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn build_date(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

// Croatian forms are tried first so they are not misread as ambiguous
// numeric dates.
pub fn find_date(text: &str) -> Option<NaiveDate> {
    // "26. siječnja 2026"
    if let Some(c) = RE_CROATIAN.captures(text)
        && let Some(month) = croatian_month(&c[2])
        && let Some(date) = build_date(&c[3], month, &c[1])
    {
        return Some(date);
    }
    // "5.12.2025"
    if let Some(c) = RE_DOTTED.captures(text)
        && let Some(date) = c[2]
            .parse()
            .ok()
            .and_then(|month| build_date(&c[3], month, &c[1]))
    {
        return Some(date);
    }
    // "February 20, 2026" / "20 February 2026"
    if let Some(c) = RE_ENGLISH_MDY.captures(text)
        && let Some(month) = english_month(&c[1])
        && let Some(date) = build_date(&c[3], month, &c[2])
    {
        return Some(date);
    }
    if let Some(c) = RE_ENGLISH_DMY.captures(text)
        && let Some(month) = english_month(&c[2])
        && let Some(date) = build_date(&c[3], month, &c[1])
    {
        return Some(date);
    }
    // "2026-02-20"
    if let Some(c) = RE_ISO.captures(text)
        && let Some(date) = c[2]
            .parse()
            .ok()
            .and_then(|month| build_date(&c[1], month, &c[3]))
    {
        return Some(date);
    }
    None
}

pub fn from_remaining(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let c = RE_REMAINING.captures(text)?;
    let n: u64 = c[1].parse().ok()?;
    match c[2].to_lowercase().as_str() {
        "day" => today.checked_add_days(Days::new(n)),
        "week" => today.checked_add_days(Days::new(n * 7)),
        _ => today.checked_add_months(Months::new(n as u32)),
    }
}

pub fn is_stale(deadline: Option<NaiveDate>, today: NaiveDate, threshold_days: i64) -> bool {
    match deadline {
        Some(d) => (today - d).num_days() > threshold_days,
        None => false,
    }
}

pub fn is_old_by_title(title: &str, today: NaiveDate) -> bool {
    RE_TITLE_YEAR
        .captures(title)
        .and_then(|c| c[1].parse::<i32>().ok())
        .is_some_and(|year| today.year() - year > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_find_date_croatian() {
        let cases = [
            ("Rok za prijavu: 26. siječnja 2026.", date(2026, 1, 26)),
            ("do 5. prosinca 2025", date(2025, 12, 5)),
            ("natječaj traje do 1. studenoga 2025", date(2025, 11, 1)),
            ("zaključno s 9. studenog 2025", date(2025, 11, 9)),
            ("Prijave do 14.   veljače 2026", date(2026, 2, 14)),
        ];
        for (text, expected) in cases {
            assert_eq!(find_date(text), Some(expected), "text: {text}");
        }
    }

    #[test]
    fn test_find_date_dotted() {
        assert_eq!(find_date("rok: 5.12.2025"), Some(date(2025, 12, 5)));
        assert_eq!(find_date("do 05.3.2026 u podne"), Some(date(2026, 3, 5)));
    }

    #[test]
    fn test_find_date_english() {
        let cases = [
            ("Deadline: February 20, 2026", date(2026, 2, 20)),
            ("Closing on 8 May 2026", date(2026, 5, 8)),
            ("submissions close 15 Sep 2026", date(2026, 9, 15)),
            ("Jan 3 2027 at midnight", date(2027, 1, 3)),
        ];
        for (text, expected) in cases {
            assert_eq!(find_date(text), Some(expected), "text: {text}");
        }
    }

    #[test]
    fn test_find_date_iso() {
        assert_eq!(find_date("updated 2026-02-20"), Some(date(2026, 2, 20)));
    }

    #[test]
    fn test_find_date_priority() {
        assert_eq!(
            find_date("objava 1.1.2020, rok 26. siječnja 2026"),
            Some(date(2026, 1, 26))
        );
    }

    #[test]
    fn test_find_date_rejects_unknown_months() {
        assert_eq!(find_date("rok je 26. sijecnja 2026"), None);
        assert_eq!(find_date("due Febuary 20, 2026"), None);
        assert_eq!(find_date("no dates here"), None);
        assert_eq!(find_date(""), None);
    }

    #[test]
    fn test_find_date_rejects_impossible_calendar_dates() {
        assert_eq!(find_date("do 31. veljače 2026"), None);
    }

    #[test]
    fn test_from_remaining() {
        let today = date(2026, 2, 1);
        assert_eq!(
            from_remaining("10 days remaining", today),
            Some(date(2026, 2, 11))
        );
        assert_eq!(
            from_remaining("2+ weeks remaining", today),
            Some(date(2026, 2, 15))
        );
        assert_eq!(
            from_remaining("3 months remaining", today),
            Some(date(2026, 5, 1))
        );
        assert_eq!(from_remaining("closing soon", today), None);
    }

    #[test]
    fn test_is_stale() {
        let today = date(2026, 2, 1);
        assert!(is_stale(Some(date(2024, 1, 1)), today, 180));
        assert!(!is_stale(Some(date(2026, 1, 31)), today, 180));
        assert!(!is_stale(None, today, 180));
        assert!(!is_stale(Some(date(2025, 8, 5)), today, 180));
        assert!(is_stale(Some(date(2025, 8, 4)), today, 180));
    }

    #[test]
    fn test_is_old_by_title() {
        let today = date(2026, 2, 1);
        assert!(is_old_by_title("BIG SEE 2018", today));
        assert!(!is_old_by_title("Design Award 2026", today));
        assert!(!is_old_by_title("ZGRAF 13", today));
        assert!(!is_old_by_title("Bijenale 2025", today));
        assert!(is_old_by_title("Bijenale 2024", today));
    }
}
