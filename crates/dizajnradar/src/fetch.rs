use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// Several of the sources refuse the default reqwest agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (like Gecko) Chrome/131.0 Safari/537.36";

// None covers every failure mode: timeout, network error, non-2xx status.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            log::debug!("Fetch of {} returned {}", url, response.status());
            return None;
        }
        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                log::debug!("Decode failed for {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) struct StubFetcher {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
        }
    }

    pub(crate) fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn with_fixture(self, url: &str, fixture: &str) -> Self {
        let body = std::fs::read_to_string(format!("fixtures/{fixture}"))
            .unwrap_or_else(|e| panic!("Failed to read fixture {fixture}: {e}"));
        self.with_page(url, body)
    }
}

#[cfg(test)]
#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.pages.get(url).cloned()
    }
}
