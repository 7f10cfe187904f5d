use chrono::NaiveDate;
use futures::future::join_all;

use crate::fetch::PageFetcher;
use crate::sources;
use crate::types::Competition;

// An empty combined result is the caller's signal of systemic breakage.
pub async fn scrape_all(fetcher: &dyn PageFetcher, today: NaiveDate) -> Vec<Competition> {
    let sources = sources::sources();
    log::info!("Scraping {} sources...", sources.len());
    let outcomes = join_all(sources.iter().map(|source| source.scrape(fetcher, today))).await;

    let mut all = Vec::new();
    for (source, outcome) in sources.iter().zip(outcomes) {
        match outcome {
            Ok(records) => {
                log::info!("[{}] {} competitions", source.name(), records.len());
                all.extend(records);
            }
            Err(e) => log::warn!("[{}] source failed: {}", source.name(), e),
        }
    }
    log::info!("Total from all sources: {}", all.len());
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StubFetcher;
    use crate::sources::{dizajn_hr, graphic_competitions};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_all_isolates_failing_sources() {
        let fetcher = StubFetcher::new()
            .with_fixture(dizajn_hr::LISTING_URL, "dizajn_hr_listing.html")
            .with_fixture(
                "https://dizajn.hr/natjecaj-pula/",
                "dizajn_hr_detail.html",
            )
            .with_fixture(
                graphic_competitions::LISTING_URL,
                "graphiccompetitions_home.html",
            );

        let all = scrape_all(&fetcher, today()).await;
        assert_eq!(
            all.len(),
            4,
            "2 from dizajn.hr + 2 from the directory; dead sources contribute zero"
        );
        assert!(all.iter().any(|c| c.link.contains("dizajn.hr")));
        assert!(all.iter().any(|c| c.link.contains("graphiccompetitions.com")));
    }

    #[tokio::test]
    async fn test_scrape_all_total_failure_yields_empty() {
        let all = scrape_all(&StubFetcher::new(), today()).await;
        assert!(all.is_empty());
    }
}
