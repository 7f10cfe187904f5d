use async_trait::async_trait;
use chrono::NaiveDate;

use crate::dates::find_date;
use crate::fetch::PageFetcher;
use crate::sources::{Source, SourceError};
use crate::text::strip_tags;
use crate::types::{Category, Competition, Status};

pub(crate) const REGISTRATION_URL: &str = "https://competition.adesignaward.com/registration.html";

pub struct ADesignAward;

#[async_trait]
impl Source for ADesignAward {
    fn name(&self) -> &'static str {
        "adesignaward.com"
    }

    async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        _today: NaiveDate,
    ) -> Result<Vec<Competition>, SourceError> {
        let html = fetcher
            .fetch(REGISTRATION_URL)
            .await
            .ok_or_else(|| SourceError::ListingUnavailable(REGISTRATION_URL.to_string()))?;
        let deadline = find_date(&strip_tags(&html));
        Ok(vec![Competition {
            title: "A' Design Award & Competition 2026".to_string(),
            link: REGISTRATION_URL.to_string(),
            org: "A' Design Award".to_string(),
            category: Category::GraphicDesign,
            status: Status::Active,
            deadline,
            prize: "Međunarodna nagrada + promocija".to_string(),
        }])
    }
}
