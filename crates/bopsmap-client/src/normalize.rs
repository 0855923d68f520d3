//! Normalization from raw API pages to [`bopsmap_core::Record`]s.
//!
//! Each page is folded into the [`RecordStore`] it is given. Keys come from
//! `(page ordinal, index within page)` only, so the upstream ordering of
//! pages and entries fully determines which record gets which key.

use bopsmap_core::{record_key, Record, RecordStore, Reference};
use chrono::NaiveDate;

use crate::types::{RawApplication, RawConsultation, RawPage};

/// Folds every entry of `page` into `store`.
///
/// Entries that cannot be read at all still occupy their key as a blank
/// record, so the key space stays dense.
#[must_use]
pub fn normalize_page(
    page: RawPage,
    page_ordinal: usize,
    page_size: usize,
    store: RecordStore,
) -> RecordStore {
    if page.data.len() > page_size {
        tracing::warn!(
            page = page_ordinal,
            entries = page.data.len(),
            page_size,
            "page holds more entries than the page size; keys will overlap the next page"
        );
    }

    page.data
        .into_entries()
        .into_iter()
        .enumerate()
        .fold(store, |store, (index, entry)| {
            let key = record_key(page_ordinal, index, page_size);
            store.with(normalize_entry(entry, key))
        })
}

/// Normalizes one raw entry, falling back to a blank record if its shape is
/// unusable.
#[must_use]
pub fn normalize_entry(entry: serde_json::Value, key: usize) -> Record {
    match serde_json::from_value::<RawApplication>(entry) {
        Ok(app) => normalize_application(app, key),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed application entry; keeping blank record");
            Record::blank(key)
        }
    }
}

fn consultation_url(consultation: Option<RawConsultation>) -> Option<String> {
    consultation
        .and_then(|c| c.public_url)
        .map(|u| u.trim().to_owned())
        .filter(|u| !u.is_empty())
}

/// Flattens a [`RawApplication`] into a [`Record`]. Missing nested fields
/// become empty strings or `None`.
#[must_use]
pub fn normalize_application(app: RawApplication, key: usize) -> Record {
    let address = app.property.and_then(|p| p.address).unwrap_or_default();
    let detail = app.application.unwrap_or_default();
    let description = app
        .proposal
        .and_then(|p| p.description)
        .unwrap_or_default();

    // Either placement counts; a usable nested URL wins over the top-level one.
    let public_url = consultation_url(detail.consultation)
        .or_else(|| consultation_url(app.consultation));

    Record {
        key,
        title: address.single_line.unwrap_or_default(),
        latitude: address.latitude,
        longitude: address.longitude,
        status: detail.status.unwrap_or_default(),
        reference: Reference::from_raw(detail.reference.as_deref()),
        description,
        received_date: detail.received_at.as_deref().and_then(parse_received_date),
        public_url,
    }
}

/// Parses the date part (first 10 characters) of an ISO-8601 timestamp.
#[must_use]
pub fn parse_received_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
