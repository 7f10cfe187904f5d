use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use scraper::{ElementRef, Html, Selector};

use crate::classify::{detect_category, detect_status, extract_org, extract_prize};
use crate::dates::{DEFAULT_STALE_AFTER_DAYS, find_date, is_stale};
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError, elem_text};
use crate::text::{decode_entities, squash_whitespace, strip_tags, take_chars};
use crate::types::{Competition, Status};

pub(crate) const LISTING_URL: &str = "https://dizajn.hr/natjecaji/";
const MAX_DETAIL_FETCHES: usize = 15;
const BODY_TEXT_CHARS: usize = 2000;
const SNIPPET_CHARS: usize = 500;
const DEFAULT_ORG: &str = "HDD / dizajn.hr";

pub struct DizajnHr;

struct Entry {
    title: String,
    link: String,
    snippet: String,
}

fn parse_listing(html: &str) -> Vec<Entry> {
    let document = Html::parse_document(html);
    let heading = Selector::parse("h2 > a").unwrap();
    document
        .select(&heading)
        .filter_map(|anchor| {
            let link = anchor.value().attr("href")?.to_string();
            let title = decode_entities(elem_text(anchor).trim());
            if title.is_empty() || link.is_empty() {
                return None;
            }
            Some(Entry {
                title,
                link,
                snippet: listing_snippet(anchor),
            })
        })
        .collect()
}

fn listing_snippet(anchor: ElementRef) -> String {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .map(|container| take_chars(&squash_whitespace(&elem_text(container)), SNIPPET_CHARS).to_string())
        .unwrap_or_default()
}

fn detail_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let og = Selector::parse(r#"meta[property="og:description"]"#).unwrap();
    let description = document
        .select(&og)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(decode_entities)
        .unwrap_or_default();
    let body = strip_tags(html);
    format!("{} {}", description, take_chars(&body, BODY_TEXT_CHARS))
}

#[async_trait]
impl Source for DizajnHr {
    fn name(&self) -> &'static str {
        "dizajn.hr"
    }

    async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        today: NaiveDate,
    ) -> Result<Vec<Competition>, SourceError> {
        let html = fetcher
            .fetch(LISTING_URL)
            .await
            .ok_or_else(|| SourceError::ListingUnavailable(LISTING_URL.to_string()))?;

        let mut entries = parse_listing(&html);
        entries.truncate(MAX_DETAIL_FETCHES);
        log::info!("[dizajn.hr] fetching {} detail pages...", entries.len());
        let pages = join_all(entries.iter().map(|entry| fetcher.fetch(&entry.link))).await;

        let mut competitions = Vec::new();
        for (entry, page) in entries.iter().zip(pages) {
            let full_text = match page {
                Some(page_html) => detail_text(&page_html),
                None => entry.snippet.clone(),
            };
            let deadline = find_date(&full_text);
            let combined = format!("{} {}", entry.title, full_text);
            let status = detect_status(&combined, deadline, today);
            if status == Status::News {
                log::debug!("[dizajn.hr] skipping news entry '{}'", entry.title);
                continue;
            }
            if is_stale(deadline, today, DEFAULT_STALE_AFTER_DAYS) {
                log::debug!("[dizajn.hr] skipping stale entry '{}'", entry.title);
                continue;
            }
            competitions.push(Competition {
                title: entry.title.clone(),
                link: entry.link.clone(),
                org: extract_org(&full_text).unwrap_or_else(|| DEFAULT_ORG.to_string()),
                category: detect_category(&combined),
                status,
                deadline,
                prize: extract_prize(&full_text),
            });
        }
        Ok(competitions)
    }
}
