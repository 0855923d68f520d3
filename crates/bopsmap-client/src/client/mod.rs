//! HTTP client for the BOPS public planning-applications API.

mod fetch_all;

use std::time::Duration;

use bopsmap_core::AppConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::pagination::first_page_url;
use crate::types::RawPage;

pub use fetch_all::LoadOutcome;

/// Maximum number of pages to fetch in one load.
/// Guards against next links that cycle through several URLs.
pub(super) const MAX_PAGES: usize = 1_000;

/// HTTP client for the planning-applications endpoints.
///
/// Every request carries an explicit timeout. Failures are typed and never
/// retried.
pub struct BopsClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) page_size: usize,
    /// Pause between consecutive page requests.
    pub(super) inter_request_delay_ms: u64,
}

impl BopsClient {
    /// Creates a `BopsClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        page_size: usize,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            page_size,
            inter_request_delay_ms: 0,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Ok(Self::new(
            &config.api_base_url,
            config.page_size,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_inter_request_delay(config.inter_request_delay_ms))
    }

    #[must_use]
    pub fn with_inter_request_delay(mut self, delay_ms: u64) -> Self {
        self.inter_request_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// URL of the first search page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base URL is malformed.
    pub fn search_url(&self) -> Result<String, ClientError> {
        first_page_url(&self.base_url, self.page_size)
    }

    /// Fetches and decodes one page of search results.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidUrl`]: `url` is not an absolute URL.
    /// - [`ClientError::NotFound`]: HTTP 404.
    /// - [`ClientError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ClientError::Http`]: network, TLS, or timeout failure.
    /// - [`ClientError::Deserialize`]: the body is empty or not a page.
    pub async fn fetch_page(&self, url: &str) -> Result<RawPage, ClientError> {
        let parsed = parse_absolute(url)?;
        self.get_json(parsed, &format!("search page {url}")).await
    }

    /// Fetches the document list for one application, as raw JSON.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_page`].
    pub async fn fetch_documents(&self, reference: &str) -> Result<serde_json::Value, ClientError> {
        let mut url = parse_absolute(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "base URL cannot have path segments".to_owned(),
            })?
            .pop_if_empty()
            .push(reference.trim())
            .push("documents");

        self.get_json(url, &format!("documents for {reference}"))
            .await
    }

    /// Sends a GET, maps non-2xx statuses to typed errors, and decodes the
    /// body as JSON.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn parse_absolute(url: &str) -> Result<Url, ClientError> {
    Url::parse(url).map_err(|e| ClientError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
