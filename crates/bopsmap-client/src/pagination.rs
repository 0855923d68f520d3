//! Page-link handling for the planning-applications search endpoint.
//!
//! The first request is built from the configured base URL and page size.
//! Every later request uses the `links.next` value from the previous page
//! exactly as given; it is never rebuilt or re-parameterised.
//!
//! ```text
//! GET {base}search?maxresults=50
//!   -> links.next = "https://.../search?page=2&maxresults=50"
//! GET https://.../search?page=2&maxresults=50
//!   -> links.next = null   (done)
//! ```

use reqwest::Url;

use crate::error::ClientError;
use crate::types::RawPage;

/// Builds the first search URL: `{base_url}search?maxresults={page_size}`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] if `base_url` cannot be parsed.
pub fn first_page_url(base_url: &str, page_size: usize) -> Result<String, ClientError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .and_then(|u| u.join("search"))
        .map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

    url.query_pairs_mut()
        .append_pair("maxresults", &page_size.to_string());

    Ok(url.to_string())
}

/// Decides which URL to fetch after `current_url`.
///
/// Returns `Ok(None)` on the last page.
///
/// # Errors
///
/// Returns [`ClientError::RepeatedNextLink`] when the next link points back
/// at the page just fetched, which would otherwise loop forever.
pub fn next_page_url(current_url: &str, page: &RawPage) -> Result<Option<String>, ClientError> {
    match page.next_link() {
        None => Ok(None),
        Some(next) if next == current_url => Err(ClientError::RepeatedNextLink {
            url: next.to_owned(),
        }),
        Some(next) => Ok(Some(next.to_owned())),
    }
}
