use std::time::Duration;

use reqwest::{Client, StatusCode, header};

use crate::types::Competition;

const TABLE: &str = "natjecaji";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Matches every row; PostgREST refuses an unconditional DELETE.
const CLEAR_FILTER: &str = "title=neq.___KEEP___";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Store rejected {operation}: {status} — {body}")]
    Rejected {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub key: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("SUPABASE_URL").ok().filter(|v| !v.is_empty()),
            key: std::env::var("SUPABASE_KEY").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.url, &self.key) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    client: Client,
    base_url: String,
    key: String,
}

impl Store {
    pub fn new(base_url: &str, key: &str) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    // Clear-then-insert is not transactional; a failed insert after a
    // successful delete is surfaced, not rolled back.
    pub async fn replace_all(&self, records: &[Competition]) -> Result<usize, StoreError> {
        self.clear().await?;
        self.insert(records).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/{}?{}", self.base_url, TABLE, CLEAR_FILTER);
        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await?;
        self.check("delete", response).await.map(|_| ())
    }

    async fn insert(&self, records: &[Competition]) -> Result<usize, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, TABLE);
        log::info!("Writing {} competitions to the store...", records.len());
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .body(serde_json::to_string(records)?)
            .send()
            .await?;
        let body = self.check("insert", response).await?;
        let inserted: Vec<Competition> = serde_json::from_str(&body)?;
        Ok(inserted.len())
    }

    async fn check(
        &self,
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                operation,
                status,
                body,
            });
        }
        Ok(body)
    }
}

pub fn preview_table(records: &[Competition]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<45}  {:<8}  {:<10}  {}\n",
        "title", "status", "deadline", "link"
    ));
    for record in records {
        out.push_str(&format!("{}\n", record));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Status};
    use chrono::NaiveDate;

    #[test]
    fn test_store_config_credentials() {
        let config = StoreConfig {
            url: Some("https://example.supabase.co".to_string()),
            key: None,
        };
        assert!(config.credentials().is_none());

        let config = StoreConfig {
            url: Some("https://example.supabase.co".to_string()),
            key: Some("service-role".to_string()),
        };
        assert_eq!(
            config.credentials(),
            Some(("https://example.supabase.co", "service-role"))
        );
    }

    #[test]
    fn test_preview_table() {
        let records = vec![Competition {
            title: "Natječaj za vizualni identitet".to_string(),
            link: "https://dizajn.hr/natjecaj/".to_string(),
            org: "HDD".to_string(),
            category: Category::VisualIdentity,
            status: Status::Active,
            deadline: NaiveDate::from_ymd_opt(2026, 5, 26),
            prize: "5.000 EUR".to_string(),
        }];
        let table = preview_table(&records);
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("Natječaj za vizualni identitet"));
        assert!(table.contains("2026-05-26"));
        assert!(table.contains("Aktivno"));
    }

    #[test]
    fn test_record_serialization_uses_croatian_labels() {
        let record = Competition {
            title: "Test".to_string(),
            link: "https://example.org/".to_string(),
            org: "Org".to_string(),
            category: Category::PackagingDesign,
            status: Status::Closed,
            deadline: None,
            prize: "Nije navedeno".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "Dizajn ambalaže");
        assert_eq!(json["status"], "Završeno");
        assert_eq!(json["deadline"], serde_json::Value::Null);
    }
}
