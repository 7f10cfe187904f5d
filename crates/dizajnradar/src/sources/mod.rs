pub(crate) mod adesign;
pub(crate) mod big_see;
pub(crate) mod contest_watchers;
pub(crate) mod dezeen;
pub(crate) mod dizajn_hr;
pub(crate) mod european_design;
pub(crate) mod graphic_competitions;
pub(crate) mod ulupuh;

pub use adesign::ADesignAward;
pub use big_see::BigSee;
pub use contest_watchers::ContestWatchers;
pub use dezeen::Dezeen;
pub use dizajn_hr::DizajnHr;
pub use european_design::EuropeanDesign;
pub use graphic_competitions::GraphicCompetitions;
pub use ulupuh::Ulupuh;

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use scraper::ElementRef;

use crate::fetch::PageFetcher;
use crate::types::Competition;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("listing page unavailable: {0}")]
    ListingUnavailable(String),
}

// ListingUnavailable is the only error that crosses this boundary; anything
// short of a dead listing page degrades to partial or empty output.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;

    async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        today: NaiveDate,
    ) -> Result<Vec<Competition>, SourceError>;
}

pub fn sources() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(DizajnHr),
        Box::new(ContestWatchers),
        Box::new(BigSee),
        Box::new(EuropeanDesign),
        Box::new(GraphicCompetitions),
        Box::new(ADesignAward),
        Box::new(Dezeen),
        Box::new(Ulupuh),
    ]
}

pub(crate) fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

static RE_TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\d{4}.*$").expect("invalid regex: trailing year"));
static RE_TRAILING_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-–:].*$").expect("invalid regex: trailing clause"));

pub(crate) fn org_from_title(title: &str) -> String {
    let head = RE_TRAILING_YEAR.replace(title, "");
    let head = RE_TRAILING_CLAUSE.replace(&head, "");
    crate::text::take_chars(head.trim(), 50).to_string()
}
