use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use crate::classify::detect_category;
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError, elem_text, org_from_title};
use crate::text::decode_entities;
use crate::types::{Competition, Status};

pub(crate) const LISTING_URL: &str = "https://graphiccompetitions.com/";
const SITE_PREFIX: &str = "https://graphiccompetitions.com/";
const MAX_ENTRIES: usize = 10;

static RE_SKIP_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)privacy|terms|about|contact|type/|category/").expect("invalid regex: skip path")
});

pub struct GraphicCompetitions;

fn is_entry_link(href: &str) -> bool {
    match href.strip_prefix(SITE_PREFIX) {
        // Entries live at /<discipline>/<competition-slug>.
        Some(path) => match path.split_once('/') {
            Some((section, rest)) => !section.is_empty() && !rest.is_empty(),
            None => false,
        },
        None => false,
    }
}

#[async_trait]
impl Source for GraphicCompetitions {
    fn name(&self) -> &'static str {
        "graphiccompetitions.com"
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
            if !is_entry_link(href) || RE_SKIP_PATH.is_match(href) {
                continue;
            }
            let title = decode_entities(elem_text(anchor).trim());
            let length = title.chars().count();
            if !(10..=100).contains(&length) {
                continue;
            }
            if !seen.insert(href.to_string()) {
                continue;
            }
            competitions.push(Competition {
                title: title.clone(),
                link: href.to_string(),
                org: org_from_title(&title),
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
