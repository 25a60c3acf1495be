// ABOUTME: Blocking HTTP feed source for the blog's Atom API
// ABOUTME: Handles throttling, Basic auth headers, and fail-fast errors

use crate::{auth::Credentials, util::truncate_str, Error, FeedPage, Result};
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://blog.hatena.ne.jp";

/// Anything that can hand back one page of the feed for a URL.
pub trait FeedSource {
    fn fetch_page(&self, url: &str) -> Result<FeedPage>;
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    throttle_min: u64,
    throttle_max: u64,
}

impl ApiClient {
    pub fn new(credentials: Credentials, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(ApiClient {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_API_BASE.into())
                .trim_end_matches('/')
                .to_string(),
            credentials,
            throttle_min: 100,
            throttle_max: 300,
        })
    }

    pub fn with_throttle(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.throttle_min = min_ms.min(max_ms);
        self.throttle_max = min_ms.max(max_ms);
        self
    }

    pub fn disable_throttle(mut self) -> Self {
        self.throttle_min = 0;
        self.throttle_max = 0;
        self
    }

    /// First page of a blog's entry collection.
    pub fn entries_url(&self, blog_id: &str) -> String {
        format!(
            "{}/{}/{}/atom/entry",
            self.base_url, self.credentials.account_id, blog_id
        )
    }

    fn throttle(&self) {
        if self.throttle_max > 0 {
            let sleep_ms = rand::thread_rng().gen_range(self.throttle_min..=self.throttle_max);
            std::thread::sleep(Duration::from_millis(sleep_ms));
        }
    }

    fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .basic_auth(
                &self.credentials.account_id,
                Some(self.credentials.api_key()),
            )
            .header("Accept", "application/atom+xml")
            .header(
                "User-Agent",
                concat!("blogsync/", env!("CARGO_PKG_VERSION"), " (Rust)"),
            )
            .send()?;

        self.throttle();

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(Error::Api {
                url: url.into(),
                status: status.as_u16(),
                message: truncate_str(&message, 100),
            });
        }

        Ok(response.text()?)
    }
}

impl FeedSource for ApiClient {
    fn fetch_page(&self, url: &str) -> Result<FeedPage> {
        let body = self.get(url)?;
        FeedPage::from_xml(&body).map_err(|e| {
            debug!(url, preview = %truncate_str(&body, 500), "unparsable feed response");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("alice", "key")
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new(creds(), None).unwrap();
        assert_eq!(client.base_url, DEFAULT_API_BASE);
        assert_eq!(client.credentials.account_id, "alice");
    }

    #[test]
    fn test_api_client_custom_base_trims_slash() {
        let client = ApiClient::new(creds(), Some("http://localhost:8080/".into())).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_entries_url() {
        let client = ApiClient::new(creds(), None).unwrap();
        assert_eq!(
            client.entries_url("alice.example.com"),
            "https://blog.hatena.ne.jp/alice/alice.example.com/atom/entry"
        );
    }

    #[test]
    fn test_api_client_throttle_config() {
        let client = ApiClient::new(creds(), None).unwrap().with_throttle(50, 150);
        assert_eq!(client.throttle_min, 50);
        assert_eq!(client.throttle_max, 150);
    }

    #[test]
    fn test_api_client_throttle_reversed_range() {
        let client = ApiClient::new(creds(), None).unwrap().with_throttle(300, 100);
        assert_eq!(client.throttle_min, 100);
        assert_eq!(client.throttle_max, 300);
        client.throttle();
    }

    #[test]
    fn test_api_client_disable_throttle() {
        let client = ApiClient::new(creds(), None).unwrap().disable_throttle();
        assert_eq!(client.throttle_min, 0);
        assert_eq!(client.throttle_max, 0);
    }
}
