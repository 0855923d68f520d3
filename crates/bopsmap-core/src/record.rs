//! Normalized planning-application records and the keyed store they are
//! folded into while pages arrive.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Serialized form of [`Reference::Unknown`].
pub const UNKNOWN_REFERENCE: &str = "unknown";

/// Dotted lowercase localization keys such as `en.application.reference`.
static I18N_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]+(\.[a-z0-9_]+)+$").expect("valid i18n key regex"));

/// External case identifier for a planning application.
///
/// Upstream occasionally ships untranslated template strings instead of a
/// real reference; those collapse to [`Reference::Unknown`] so they never
/// match a user search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reference {
    Known(String),
    Unknown,
}

impl Reference {
    /// Builds a reference from the raw upstream value, applying the
    /// placeholder policy.
    ///
    /// A value is treated as unknown when it is absent, blank, contains a
    /// `translation missing` marker, carries template braces (`{{`, `}}`,
    /// `%{`), or is shaped like a dotted i18n key.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Unknown;
        };

        if looks_like_placeholder(value) {
            tracing::debug!(raw = value, "placeholder reference replaced with unknown");
            return Self::Unknown;
        }

        Self::Known(value.to_owned())
    }

    /// Returns the reference string, or `"unknown"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(s) => s,
            Self::Unknown => UNKNOWN_REFERENCE,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Exact comparison against user input. Unknown references never match.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        matches!(self, Self::Known(s) if s == input)
    }
}

fn looks_like_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("translation missing")
        || value.contains("{{")
        || value.contains("}}")
        || value.contains("%{")
        || I18N_KEY_RE.is_match(value)
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        if value == UNKNOWN_REFERENCE {
            Self::Unknown
        } else {
            Self::from_raw(Some(value.as_str()))
        }
    }
}

impl From<Reference> for String {
    fn from(value: Reference) -> Self {
        match value {
            Reference::Known(s) => s,
            Reference::Unknown => UNKNOWN_REFERENCE.to_owned(),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A flattened planning application.
///
/// `key` is the ordinal assigned from `(page, index-within-page)` and is
/// internal bookkeeping only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub key: usize,
    pub title: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: String,
    pub reference: Reference,
    pub description: String,
    pub received_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

impl Record {
    /// A record with every field blank, used when the upstream entry is too
    /// malformed to read anything from it.
    #[must_use]
    pub fn blank(key: usize) -> Self {
        Self {
            key,
            title: String::new(),
            latitude: None,
            longitude: None,
            status: String::new(),
            reference: Reference::Unknown,
            description: String::new(),
            received_date: None,
            public_url: None,
        }
    }
}

/// Computes the global ordinal for a record.
#[must_use]
pub fn record_key(page_ordinal: usize, index_within_page: usize, page_size: usize) -> usize {
    index_within_page + page_ordinal * page_size
}

/// Records keyed by ordinal, iterated in ascending key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: BTreeMap<usize, Record>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record under its own key, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, record: Record) -> Self {
        self.records.insert(record.key, record);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: usize) -> Option<&Record> {
        self.records.get(&key)
    }

    /// Iterates records in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.records.keys().copied()
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), RecordStore::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_keeps_well_formed_value() {
        assert_eq!(
            Reference::from_raw(Some(" 21-12345-ABCD ")),
            Reference::Known("21-12345-ABCD".to_owned())
        );
    }

    #[test]
    fn reference_absent_or_blank_is_unknown() {
        assert_eq!(Reference::from_raw(None), Reference::Unknown);
        assert_eq!(Reference::from_raw(Some("   ")), Reference::Unknown);
    }

    #[test]
    fn reference_translation_missing_is_unknown() {
        let raw = "translation missing: en.planning_applications.reference";
        assert_eq!(Reference::from_raw(Some(raw)), Reference::Unknown);
    }

    #[test]
    fn reference_template_braces_are_unknown() {
        assert_eq!(Reference::from_raw(Some("{{reference}}")), Reference::Unknown);
        assert_eq!(Reference::from_raw(Some("%{reference}")), Reference::Unknown);
    }

    #[test]
    fn reference_dotted_i18n_key_is_unknown() {
        assert_eq!(
            Reference::from_raw(Some("en.application.reference")),
            Reference::Unknown
        );
    }

    #[test]
    fn unknown_reference_never_matches_input() {
        assert!(!Reference::Unknown.matches("unknown"));
        assert!(Reference::Known("21-12345".to_owned()).matches("21-12345"));
    }

    #[test]
    fn reference_serializes_as_plain_string() {
        let known = serde_json::to_string(&Reference::Known("21-12345".to_owned())).unwrap();
        assert_eq!(known, "\"21-12345\"");
        let unknown = serde_json::to_string(&Reference::Unknown).unwrap();
        assert_eq!(unknown, "\"unknown\"");
        let back: Reference = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(back, Reference::Unknown);
    }

    #[test]
    fn record_key_offsets_by_page() {
        assert_eq!(record_key(0, 0, 50), 0);
        assert_eq!(record_key(0, 49, 50), 49);
        assert_eq!(record_key(2, 3, 50), 103);
    }

    #[test]
    fn record_without_public_url_omits_the_field() {
        let json = serde_json::to_value(Record::blank(0)).unwrap();
        assert!(json.get("publicUrl").is_none());
        assert!(json.get("receivedDate").is_some());
    }

    #[test]
    fn store_iterates_in_ascending_key_order() {
        let store = RecordStore::new()
            .with(Record::blank(10))
            .with(Record::blank(2))
            .with(Record::blank(7));
        let keys: Vec<usize> = store.keys().collect();
        assert_eq!(keys, vec![2, 7, 10]);
    }
}
