use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::classify::detect_category;
use crate::dates::{find_date, from_remaining};
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError, elem_text, org_from_title};
use crate::text::{decode_entities, squash_whitespace, strip_tags, take_chars};
use crate::types::{Competition, Status};

pub(crate) const LISTING_URL: &str =
    "https://www.contestwatchers.com/category/visual-arts/graphic-design/";
const SITE_PREFIX: &str = "https://www.contestwatchers.com/";
const MAX_ENTRIES: usize = 20;
const CARD_CHARS: usize = 600;
const SCAN_CHARS: usize = 3000;
const DEFAULT_ORG: &str = "Međunarodni natječaj";

static RE_REMAINING_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+\+?\s*(?:days?|weeks?|months?)\s*remaining)")
        .expect("invalid regex: remaining phrase")
});
static RE_CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:expiring|closing|expires?|closes?)\s+(?:on\s+)?(\d{1,2}\s+[a-z]+\s+\d{4})")
        .expect("invalid regex: closing phrase")
});
static RE_DEADLINE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)deadline[:\s]*([^.!?\n]{5,60})").expect("invalid regex: deadline label")
});
static RE_APPLY_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)enter|submit|visit|official|website|apply").expect("invalid regex: apply hint")
});

pub struct ContestWatchers;

struct Entry {
    title: String,
    link: String,
    remaining: Option<String>,
    free: bool,
}

fn is_entry_link(href: &str) -> bool {
    match href.strip_prefix(SITE_PREFIX) {
        Some(path) => {
            !path.is_empty()
                && !path.starts_with("category")
                && !path.starts_with("page")
                && !path.starts_with("feed")
        }
        None => false,
    }
}

fn card_text(anchor: ElementRef) -> String {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .map(|card| take_chars(&squash_whitespace(&elem_text(card)), CARD_CHARS).to_string())
        .unwrap_or_default()
}

fn parse_listing(html: &str) -> Vec<Entry> {
    let document = Html::parse_document(html);
    let heading = Selector::parse("h2 > a, h3 > a").unwrap();
    let mut entries = Vec::new();
    for anchor in document.select(&heading) {
        let Some(link) = anchor.value().attr("href") else {
            continue;
        };
        if !is_entry_link(link) {
            continue;
        }
        let title = decode_entities(elem_text(anchor).trim());
        if title.is_empty() {
            continue;
        }
        let card = card_text(anchor);
        entries.push(Entry {
            title,
            link: link.to_string(),
            remaining: RE_REMAINING_PHRASE
                .captures(&card)
                .map(|c| c[1].to_string()),
            free: card.contains("Free"),
        });
    }
    entries
}

fn detail_deadline(text: &str) -> Option<NaiveDate> {
    // "Contests Expiring on 8 May 2026" / "Closing on ..."
    if let Some(c) = RE_CLOSING.captures(text)
        && let Some(date) = find_date(&c[1])
    {
        return Some(date);
    }
    match RE_DEADLINE_LABEL.captures(text) {
        Some(c) => find_date(&c[1]),
        None => find_date(take_chars(text, SCAN_CHARS)),
    }
}

fn external_link(document: &Html) -> Option<String> {
    let anchors = Selector::parse("a[href]").unwrap();
    let mut fallback = None;
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with("http") || href.contains("contestwatchers.com") {
            continue;
        }
        let label = elem_text(anchor);
        if label.to_lowercase().contains("visit official website") {
            return Some(href.to_string());
        }
        if fallback.is_none() && RE_APPLY_HINT.is_match(&label) {
            fallback = Some(href.to_string());
        }
    }
    fallback
}

#[async_trait]
impl Source for ContestWatchers {
    fn name(&self) -> &'static str {
        "contestwatchers.com"
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
        entries.truncate(MAX_ENTRIES);
        log::info!(
            "[contestwatchers.com] fetching {} detail pages...",
            entries.len()
        );
        let pages = join_all(entries.iter().map(|entry| fetcher.fetch(&entry.link))).await;

        let mut competitions = Vec::new();
        for (entry, page) in entries.iter().zip(pages) {
            let mut deadline = None;
            let mut link = entry.link.clone();
            if let Some(page_html) = page {
                let document = Html::parse_document(&page_html);
                deadline = detail_deadline(&strip_tags(&page_html));
                if let Some(external) = external_link(&document) {
                    link = external;
                }
            }
            if deadline.is_none()
                && let Some(remaining) = &entry.remaining
            {
                deadline = from_remaining(remaining, today);
            }

            let org = org_from_title(&entry.title);
            competitions.push(Competition {
                title: entry.title.clone(),
                link,
                org: if org.is_empty() {
                    DEFAULT_ORG.to_string()
                } else {
                    org
                },
                category: detect_category(&entry.title),
                status: Status::Active,
                deadline,
                prize: if entry.free {
                    "Besplatna prijava".to_string()
                } else {
                    "Vidi detalje".to_string()
                },
            });
        }
        Ok(competitions)
    }
}
