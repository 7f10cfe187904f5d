use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use crate::classify::{detect_category, detect_status};
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError, elem_text};
use crate::text::decode_entities;
use crate::types::{Competition, Status};

pub(crate) const LISTING_URL: &str = "https://ulupuh.hr/natjecaji-i-izlozbe/";
pub(crate) const HOME_URL: &str = "https://ulupuh.hr/";
const MAX_ENTRIES: usize = 5;

static RE_SKIP_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)kontakt|about|impresum").expect("invalid regex: skip path"));
static RE_RELEVANT_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)natječaj|izložb|zgraf|poziv|award").expect("invalid regex: relevant title")
});

pub struct Ulupuh;

#[async_trait]
impl Source for Ulupuh {
    fn name(&self) -> &'static str {
        "ulupuh.hr"
    }

    async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        today: NaiveDate,
    ) -> Result<Vec<Competition>, SourceError> {
        let html = match fetcher.fetch(LISTING_URL).await {
            Some(html) => html,
            None => fetcher
                .fetch(HOME_URL)
                .await
                .ok_or_else(|| SourceError::ListingUnavailable(HOME_URL.to_string()))?,
        };

        let document = Html::parse_document(&html);
        let anchors = Selector::parse("a[href]").unwrap();
        let mut seen = HashSet::new();
        let mut competitions = Vec::new();
        for anchor in document.select(&anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.contains("ulupuh") || RE_SKIP_PATH.is_match(href) {
                continue;
            }
            let title = decode_entities(elem_text(anchor).trim());
            if !RE_RELEVANT_TITLE.is_match(&title) {
                continue;
            }
            if !seen.insert(href.to_string()) {
                continue;
            }
            let status = detect_status(&title, None, today);
            if status == Status::News {
                log::debug!("[ulupuh.hr] skipping news entry '{}'", title);
                continue;
            }
            competitions.push(Competition {
                title: title.clone(),
                link: href.to_string(),
                org: "ULUPUH".to_string(),
                category: detect_category(&title),
                status,
                deadline: None,
                prize: "Vidi detalje".to_string(),
            });
            if competitions.len() >= MAX_ENTRIES {
                break;
            }
        }
        Ok(competitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StubFetcher;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_filters_news_and_noise() {
        let fetcher = StubFetcher::new().with_fixture(LISTING_URL, "ulupuh_listing.html");
        let competitions = Ulupuh.scrape(&fetcher, today()).await.unwrap();
        assert_eq!(competitions.len(), 2);
        assert_eq!(
            competitions[0].title,
            "Natječaj za 13. ZGRAF — prijave otvorene"
        );
        assert_eq!(competitions[0].status, Status::Active);
        assert_eq!(competitions[1].title, "Poziv za izlaganje: ULUPUH Award");
    }

    #[tokio::test]
    async fn test_scrape_falls_back_to_homepage() {
        let fetcher = StubFetcher::new().with_fixture(HOME_URL, "ulupuh_listing.html");
        let competitions = Ulupuh.scrape(&fetcher, today()).await.unwrap();
        assert_eq!(competitions.len(), 2);
    }

    #[tokio::test]
    async fn test_scrape_both_pages_down() {
        let result = Ulupuh.scrape(&StubFetcher::new(), today()).await;
        assert!(matches!(result, Err(SourceError::ListingUnavailable(_))));
    }
}
