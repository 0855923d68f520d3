//! Table rows and the status filter, sort, and text search applied to them.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::display::{capitalize_address, humanize_status};
use crate::feature::{Coordinates, Feature, FeatureCollection};
use crate::record::Reference;

/// One display-ready table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub address: String,
    pub reference: Reference,
    pub description: String,
    pub received_date: Option<NaiveDate>,
    /// Sentence-cased status as shown in the table.
    pub status: String,
    pub coordinates: Option<Coordinates>,
}

impl TableRow {
    #[must_use]
    pub fn from_feature(feature: &Feature) -> Self {
        let props = &feature.properties;
        Self {
            address: capitalize_address(&props.name),
            reference: props.reference.clone(),
            description: props.description.clone(),
            received_date: props.received_date,
            status: humanize_status(&props.status),
            coordinates: feature.coordinates(),
        }
    }
}

/// Builds one row per feature, in collection order.
#[must_use]
pub fn rows_from(collection: &FeatureCollection) -> Vec<TableRow> {
    collection.iter().map(TableRow::from_feature).collect()
}

/// Status dropdown selection. `"None"` is the no-filter sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    #[must_use]
    pub fn accepts(&self, row: &TableRow) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => humanize_status(status) == row.status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(trimmed.to_owned()))
        }
    }
}

/// Sort dropdown selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    Reference,
    DateAscending,
    DateDescending,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "ref" | "reference" => Ok(Self::Reference),
            "date_asc" => Ok(Self::DateAscending),
            "date_des" | "date_desc" => Ok(Self::DateDescending),
            other => Err(format!(
                "unknown sort key '{other}' (expected none, ref, date_asc, date_des)"
            )),
        }
    }
}

/// Keeps rows whose status matches the filter.
#[must_use]
pub fn filter_by_status(rows: &[TableRow], filter: &StatusFilter) -> Vec<TableRow> {
    rows.iter().filter(|r| filter.accepts(r)).cloned().collect()
}

/// Returns the rows stably reordered by `key`. Rows without a received date
/// sort before dated rows ascending and after them descending.
#[must_use]
pub fn sort_rows(rows: &[TableRow], key: SortKey) -> Vec<TableRow> {
    let mut sorted = rows.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Reference => sorted.sort_by(compare_reference),
        SortKey::DateAscending => sorted.sort_by(|a, b| a.received_date.cmp(&b.received_date)),
        SortKey::DateDescending => sorted.sort_by(|a, b| b.received_date.cmp(&a.received_date)),
    }
    sorted
}

fn compare_reference(a: &TableRow, b: &TableRow) -> Ordering {
    a.reference
        .as_str()
        .to_lowercase()
        .cmp(&b.reference.as_str().to_lowercase())
}

/// Case-insensitive substring search over address, reference, and
/// description. An empty needle keeps every row.
#[must_use]
pub fn search_rows(rows: &[TableRow], needle: &str) -> Vec<TableRow> {
    let needle = needle.trim().to_uppercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| {
            r.address.to_uppercase().contains(&needle)
                || (r.reference.is_known() && r.reference.as_str().to_uppercase().contains(&needle))
                || r.description.to_uppercase().contains(&needle)
        })
        .cloned()
        .collect()
}
