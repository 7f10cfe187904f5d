use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use regex::Regex;
use scraper::{Html, Selector};

use crate::classify::detect_status;
use crate::dates::find_date;
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError, elem_text};
use crate::text::{decode_entities, strip_tags, take_chars};
use crate::types::{Category, Competition, Status};

const HEAD_CHARS: usize = 5000;

const AWARD_PAGES: [(&str, Category); 6] = [
    (
        "https://bigsee.eu/big-see-architecture-award/",
        Category::Architecture,
    ),
    (
        "https://bigsee.eu/big-see-product-design-award/",
        Category::IndustrialDesign,
    ),
    (
        "https://bigsee.eu/big-see-visionaries/",
        Category::GraphicDesign,
    ),
    (
        "https://bigsee.eu/big-see-interior-design-award/",
        Category::Architecture,
    ),
    (
        "https://bigsee.eu/big-see-fashion-design-award/",
        Category::FashionDesign,
    ),
    (
        "https://bigsee.eu/big-see-wood-design-award/",
        Category::IndustrialDesign,
    ),
];

static RE_TITLE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-–|].*$").expect("invalid regex: title tail"));

pub struct BigSee;

fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let h1 = Selector::parse("h1").unwrap();
    let title_tag = Selector::parse("title").unwrap();
    let raw = document
        .select(&h1)
        .next()
        .or_else(|| document.select(&title_tag).next())
        .map(elem_text)?;
    let decoded = decode_entities(raw.trim());
    let cleaned = RE_TITLE_TAIL.replace(&decoded, "").trim().to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

#[async_trait]
impl Source for BigSee {
    fn name(&self) -> &'static str {
        "bigsee.eu"
    }

    async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        today: NaiveDate,
    ) -> Result<Vec<Competition>, SourceError> {
        let pages = join_all(AWARD_PAGES.iter().map(|(url, _)| fetcher.fetch(url))).await;

        let mut competitions = Vec::new();
        let mut any_page = false;
        for ((url, category), page) in AWARD_PAGES.iter().zip(pages) {
            let Some(html) = page else {
                continue;
            };
            any_page = true;
            let title = page_title(&html).unwrap_or_else(|| "BIG SEE Award".to_string());
            let text = strip_tags(take_chars(&html, HEAD_CHARS));
            let deadline = find_date(&text);
            let status = detect_status(&text, deadline, today);
            if status == Status::News {
                log::debug!("[bigsee.eu] skipping news-like page '{}'", title);
                continue;
            }
            competitions.push(Competition {
                title,
                link: url.to_string(),
                org: "BIG SEE / Zavod Big".to_string(),
                category: *category,
                status,
                deadline,
                prize: "Međunarodna nagrada".to_string(),
            });
        }
        if !any_page {
            return Err(SourceError::ListingUnavailable("bigsee.eu".to_string()));
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
    async fn test_scrape_award_pages() {
        let fetcher = StubFetcher::new().with_fixture(
            "https://bigsee.eu/big-see-architecture-award/",
            "bigsee_architecture.html",
        );
        let competitions = BigSee.scrape(&fetcher, today()).await.unwrap();
        assert_eq!(competitions.len(), 1, "unreachable award pages are skipped");

        let award = &competitions[0];
        assert_eq!(award.title, "BIG SEE Architecture Award 2026");
        assert_eq!(award.link, "https://bigsee.eu/big-see-architecture-award/");
        assert_eq!(award.category, Category::Architecture);
        assert_eq!(award.status, Status::Active);
        assert_eq!(award.deadline, NaiveDate::from_ymd_opt(2026, 3, 15));
    }

    #[tokio::test]
    async fn test_scrape_skips_news_like_pages() {
        let fetcher = StubFetcher::new().with_page(
            "https://bigsee.eu/big-see-visionaries/",
            "<html><body><h1>BIG SEE Visionaries</h1>\
             <p>Exhibition of last season's laureates, touring the region.</p></body></html>",
        );
        let competitions = BigSee.scrape(&fetcher, today()).await.unwrap();
        assert!(competitions.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_all_pages_down() {
        let result = BigSee.scrape(&StubFetcher::new(), today()).await;
        assert!(matches!(result, Err(SourceError::ListingUnavailable(_))));
    }

    #[test]
    fn test_page_title_strips_site_suffix() {
        assert_eq!(
            page_title("<html><head><title>BIG SEE Visionaries | BIG SEE</title></head></html>"),
            Some("BIG SEE Visionaries".to_string())
        );
    }
}
