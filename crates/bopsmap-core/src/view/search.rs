//! Search-box classification: reference match, reference shape, postcode
//! shape, or nothing recognisable.
//!
//! Postcode lookups need the network, so this module only decides *what*
//! the input is. Resolution against a geocoder lives in the client crate.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::feature::{Feature, FeatureCollection};

/// Two digits, five digits, then an optional 4–8 character suffix; dashes
/// optional. Matched as a prefix, so longer suffixes still count as
/// reference-shaped.
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}-?[0-9]{5}(?:-?[0-9A-Z]{4,8})?").expect("valid reference regex")
});

static POSTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,4}\s?[A-Z0-9]{3}$").expect("valid postcode regex"));

/// What the search box input turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery<'a> {
    /// An exact reference match.
    Reference(&'a Feature),
    /// Reference-shaped, but no loaded application carries it.
    ReferenceNotFound,
    /// Postcode-shaped; carries the upper-cased postcode for the geocoder.
    Postcode(String),
    /// Neither a reference nor a postcode.
    Invalid,
}

/// User-facing search failures. Each renders as its own inline message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a valid reference")]
    ReferenceNotFound,

    #[error("Please enter a valid postcode")]
    InvalidPostcode,

    #[error("Please enter a valid postcode or reference")]
    InvalidInput,

    #[error("Application {reference} has no map location")]
    MissingLocation { reference: String },
}

/// Returns the last feature whose reference equals `input` exactly.
///
/// Every feature is checked; duplicates resolve to the last one.
#[must_use]
pub fn find_reference<'a>(collection: &'a FeatureCollection, input: &str) -> Option<&'a Feature> {
    collection
        .iter()
        .rev()
        .find(|f| f.properties.reference.matches(input))
}

#[must_use]
pub fn looks_like_reference(input: &str) -> bool {
    REFERENCE_RE.is_match(&input.to_uppercase())
}

#[must_use]
pub fn looks_like_postcode(input: &str) -> bool {
    POSTCODE_RE.is_match(&input.to_uppercase())
}

/// Classifies search input with reference matching taking precedence over
/// postcode interpretation.
#[must_use]
pub fn classify_search<'a>(collection: &'a FeatureCollection, input: &str) -> SearchQuery<'a> {
    let input = input.trim();

    if let Some(feature) = find_reference(collection, input) {
        return SearchQuery::Reference(feature);
    }
    if looks_like_reference(input) {
        return SearchQuery::ReferenceNotFound;
    }
    if looks_like_postcode(input) {
        return SearchQuery::Postcode(input.to_uppercase());
    }
    SearchQuery::Invalid
}
