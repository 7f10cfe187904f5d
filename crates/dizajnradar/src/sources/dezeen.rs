use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use crate::classify::detect_category;
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError, elem_text};
use crate::text::decode_entities;
use crate::types::{Competition, Status};

pub(crate) const LISTING_URL: &str = "https://www.dezeen.com/competitions/";
const MAX_ENTRIES: usize = 8;

// Dezeen articles carry their publication date in the URL.
static RE_DATED_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://www\.dezeen\.com/\d{4}/\d{2}/\d{2}/").expect("invalid regex: dezeen url")
});

pub struct Dezeen;

#[async_trait]
impl Source for Dezeen {
    fn name(&self) -> &'static str {
        "dezeen.com"
    }

    async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        _today: NaiveDate,
    ) -> Result<Vec<Competition>, SourceError> {
        let html = fetcher
            .fetch(LISTING_URL)
            .await
            .ok_or_else(|| SourceError::ListingUnavailable(LISTING_URL.to_string()))?;

        let document = Html::parse_document(&html);
        let anchors = Selector::parse("a[href]").unwrap();
        let mut seen = HashSet::new();
        let mut competitions = Vec::new();
        for anchor in document.select(&anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !RE_DATED_ARTICLE.is_match(href) {
                continue;
            }
            let title = decode_entities(elem_text(anchor).trim());
            let length = title.chars().count();
            if !(15..=120).contains(&length) {
                continue;
            }
            if !seen.insert(href.to_string()) {
                continue;
            }
            competitions.push(Competition {
                title: title.clone(),
                link: href.to_string(),
                org: "Dezeen".to_string(),
                category: detect_category(&title),
                status: Status::Active,
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
    use crate::types::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_competitions_feed() {
        let fetcher = StubFetcher::new().with_fixture(LISTING_URL, "dezeen_competitions.html");
        let competitions = Dezeen.scrape(&fetcher, today()).await.unwrap();
        assert_eq!(competitions.len(), 2);
        assert_eq!(
            competitions[0].title,
            "Competition: design a modular lighting system"
        );
        assert_eq!(competitions[0].org, "Dezeen");
        assert_eq!(competitions[1].category, Category::Architecture);
    }

    #[tokio::test]
    async fn test_scrape_dead_listing() {
        let result = Dezeen.scrape(&StubFetcher::new(), today()).await;
        assert!(matches!(result, Err(SourceError::ListingUnavailable(_))));
    }
}
