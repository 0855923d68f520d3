//! Postcode geocoding via a postcodes.io-compatible API.

use std::future::Future;
use std::time::Duration;

use bopsmap_core::{AppConfig, Coordinates};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ClientError;

/// Resolves a postcode to a map position.
pub trait Geocoder {
    fn geocode(
        &self,
        postcode: &str,
    ) -> impl Future<Output = Result<Coordinates, ClientError>> + Send;
}

#[derive(Debug, Deserialize)]
struct PostcodeResponse {
    status: u16,
    #[serde(default)]
    result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    longitude: Option<f64>,
    latitude: Option<f64>,
}

/// Client for `GET {base}/{postcode}`.
pub struct PostcodeClient {
    client: Client,
    base_url: String,
}

impl PostcodeClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.postcode_api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    fn lookup_url(&self, postcode: &str) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base URL cannot have path segments".to_owned()))?
            .pop_if_empty()
            .push(postcode.trim());
        Ok(url)
    }

    async fn lookup(&self, postcode: &str) -> Result<Coordinates, ClientError> {
        let geocode_error = |reason: String| ClientError::Geocode {
            postcode: postcode.to_owned(),
            reason,
        };

        let url = self.lookup_url(postcode)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(geocode_error("postcode not recognised".to_owned()));
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: PostcodeResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("postcode lookup for {postcode}"),
                source: e,
            })?;

        if parsed.status != 200 {
            return Err(geocode_error(format!("lookup returned status {}", parsed.status)));
        }

        match parsed.result {
            Some(PostcodeResult {
                longitude: Some(longitude),
                latitude: Some(latitude),
            }) => Ok(Coordinates::new(longitude, latitude)),
            _ => Err(geocode_error("result has no coordinates".to_owned())),
        }
    }
}

impl Geocoder for PostcodeClient {
    fn geocode(
        &self,
        postcode: &str,
    ) -> impl Future<Output = Result<Coordinates, ClientError>> + Send {
        self.lookup(postcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_url_appends_encoded_postcode() {
        let client =
            PostcodeClient::new("https://api.postcodes.io/postcodes/", 5, "bopsmap-test").unwrap();
        assert_eq!(
            client.lookup_url("SE1 2QH").unwrap().as_str(),
            "https://api.postcodes.io/postcodes/SE1%202QH"
        );
    }

    #[test]
    fn lookup_url_rejects_invalid_base() {
        let client = PostcodeClient::new("nonsense", 5, "bopsmap-test").unwrap();
        assert!(matches!(
            client.lookup_url("SE1 2QH"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }
}
