//! Response types for the BOPS public planning-applications API.
//!
//! ## Observed shape of `GET .../planning_applications/search`
//!
//! ```text
//! {
//!   "metadata": { "page": 1, "results": 50, "from": 1, "to": 50,
//!                 "total_pages": 4, "total_results": 187 },
//!   "links": { "first": "...", "last": "...", "prev": null, "next": "..." },
//!   "data": [ { "application": {...}, "property": {...}, "proposal": {...} } ]
//! }
//! ```
//!
//! Only `links.next` and `metadata.total_results` are read from the envelope.
//!
//! ### `data`
//! Normally a JSON array. Older builds serialized it as an object keyed by
//! stringified ordinals (`"0"`, `"1"`, ...); both are accepted. Entries stay
//! as raw [`serde_json::Value`] until normalization so one malformed entry
//! cannot fail the whole page.
//!
//! ### Coordinates
//! `property.address.latitude` / `longitude` arrive as numbers, numeric
//! strings, or `null`. Anything unparseable becomes `None`.
//!
//! ### `links.next`
//! An absolute URL, or `null` on the last page. It is followed verbatim.
//!
//! ### Consultation
//! Present only for applications open to public comment, either under
//! `application.consultation` or at the top level.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// One page of search results.
#[derive(Debug, Default, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub data: RawData,

    #[serde(default)]
    pub links: Option<PageLinks>,

    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

impl RawPage {
    /// Total result count reported in the page metadata, if any.
    #[must_use]
    pub fn reported_total(&self) -> Option<u64> {
        self.metadata.as_ref().and_then(|m| m.total_results)
    }

    /// The next-page link, if the page carries a non-blank one.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.next.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Page entries, as an array or as an ordinal-keyed object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawData {
    List(Vec<serde_json::Value>),
    Keyed(BTreeMap<String, serde_json::Value>),
}

impl Default for RawData {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl RawData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::List(v) => v.len(),
            Self::Keyed(m) => m.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in payload order. Keyed objects are ordered by numeric key,
    /// with any non-numeric keys after them in string order.
    #[must_use]
    pub fn into_entries(self) -> Vec<serde_json::Value> {
        match self {
            Self::List(v) => v,
            Self::Keyed(m) => {
                let mut entries: Vec<(Option<usize>, String, serde_json::Value)> = m
                    .into_iter()
                    .map(|(k, v)| (k.parse::<usize>().ok(), k, v))
                    .collect();
                entries.sort_by(|a, b| {
                    (a.0.is_none(), a.0, &a.1).cmp(&(b.0.is_none(), b.0, &b.1))
                });
                entries.into_iter().map(|(_, _, v)| v).collect()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageMetadata {
    /// Result count the API reports across all pages.
    #[serde(default, alias = "totalResults")]
    pub total_results: Option<u64>,
}

/// A single planning application as returned by the API.
#[derive(Debug, Default, Deserialize)]
pub struct RawApplication {
    #[serde(default)]
    pub property: Option<RawProperty>,

    #[serde(default)]
    pub application: Option<RawApplicationDetail>,

    #[serde(default)]
    pub proposal: Option<RawProposal>,

    #[serde(default)]
    pub consultation: Option<RawConsultation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProperty {
    #[serde(default)]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default, rename = "singleLine")]
    pub single_line: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawApplicationDetail {
    #[serde(default)]
    pub reference: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// ISO-8601 timestamp, e.g. `"2024-03-01T09:30:00.000+00:00"`.
    #[serde(default, rename = "receivedAt", alias = "receivedDate")]
    pub received_at: Option<String>,

    #[serde(default)]
    pub consultation: Option<RawConsultation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProposal {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawConsultation {
    #[serde(default, rename = "publicUrl", alias = "public_url")]
    pub public_url: Option<String>,
}

/// Accepts a number, a numeric string, or anything else (as `None`).
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_link_ignores_null_and_blank() {
        let page: RawPage = serde_json::from_value(json!({"data": [], "links": {"next": null}}))
            .unwrap();
        assert!(page.next_link().is_none());

        let page: RawPage =
            serde_json::from_value(json!({"data": [], "links": {"next": "  "}})).unwrap();
        assert!(page.next_link().is_none());

        let page: RawPage = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(page.next_link().is_none());
    }

    #[test]
    fn next_link_is_returned_verbatim() {
        let page: RawPage = serde_json::from_value(json!({
            "data": [],
            "links": {"next": "https://example.org/search?page=2&maxresults=50"}
        }))
        .unwrap();
        assert_eq!(
            page.next_link(),
            Some("https://example.org/search?page=2&maxresults=50")
        );
    }

    #[test]
    fn keyed_data_is_ordered_numerically() {
        let page: RawPage = serde_json::from_value(json!({
            "data": {"10": "ten", "2": "two", "0": "zero", "x": "other"}
        }))
        .unwrap();
        let entries = page.data.into_entries();
        assert_eq!(entries, vec![json!("zero"), json!("two"), json!("ten"), json!("other")]);
    }

    #[test]
    fn coordinates_accept_numbers_strings_and_null() {
        let addr: RawAddress = serde_json::from_value(json!({
            "singleLine": "1 A St",
            "latitude": "51.5",
            "longitude": -0.5
        }))
        .unwrap();
        assert_eq!(addr.latitude, Some(51.5));
        assert_eq!(addr.longitude, Some(-0.5));

        let addr: RawAddress =
            serde_json::from_value(json!({"latitude": null, "longitude": "n/a"})).unwrap();
        assert_eq!(addr.latitude, None);
        assert_eq!(addr.longitude, None);
    }

    #[test]
    fn metadata_accepts_snake_and_camel_case() {
        let meta: PageMetadata =
            serde_json::from_value(json!({"page": 1, "total_results": 187})).unwrap();
        assert_eq!(meta.total_results, Some(187));
        let meta: PageMetadata = serde_json::from_value(json!({"totalResults": 3})).unwrap();
        assert_eq!(meta.total_results, Some(3));
    }

    #[test]
    fn reported_total_reads_page_metadata() {
        let page: RawPage = serde_json::from_value(json!({
            "metadata": {"page": 1, "total_results": 187},
            "data": []
        }))
        .unwrap();
        assert_eq!(page.reported_total(), Some(187));

        let page: RawPage = serde_json::from_value(json!({"data": []})).unwrap();
        assert_eq!(page.reported_total(), None);
    }
}
