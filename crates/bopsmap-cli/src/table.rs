//! `table` command: filter, sort, and print application rows.

use bopsmap_client::{resolve_center, PostcodeClient};
use bopsmap_core::view::{
    filter_by_status, rows_from, search_rows, sort_rows, within_bounds, within_radius, Bounds,
    SortKey, StatusFilter, TableRow,
};
use bopsmap_core::{AppConfig, Coordinates, FeatureCollection};
use chrono::NaiveDate;

use crate::load::obtain_collection;

const DESCRIPTION_WIDTH: usize = 60;

#[derive(Debug, Clone, Default)]
pub(crate) struct TableOptions {
    pub status: StatusFilter,
    pub sort: SortKey,
    pub search: Option<String>,
    /// Radius search centre (as typed) and radius in km.
    pub near: Option<(String, f64)>,
    pub bbox: Option<Bounds>,
}

/// Print the filtered, sorted application table.
///
/// # Errors
///
/// Returns an error if the collection cannot be obtained or the postcode
/// client cannot be built. An unresolvable `--near` centre prints its
/// user-facing message and lists nothing.
pub(crate) async fn run_table(
    config: &AppConfig,
    options: &TableOptions,
    cached: bool,
) -> anyhow::Result<()> {
    let collection = obtain_collection(config, cached).await?;

    let center = match &options.near {
        Some((query, _)) => {
            let geocoder = PostcodeClient::from_config(config)
                .map_err(|e| anyhow::anyhow!("failed to build postcode client: {e}"))?;
            match resolve_center(&collection, query, &geocoder).await {
                Ok(coords) => Some(coords),
                Err(e) => {
                    println!("{e}");
                    return Ok(());
                }
            }
        }
        None => None,
    };

    let rows = build_rows(&collection, options, center);
    print_rows(&rows);
    Ok(())
}

/// Applies every selected view to the collection's rows.
///
/// Order: map box (with status), radius, status, text search, then sort.
pub(crate) fn build_rows(
    collection: &FeatureCollection,
    options: &TableOptions,
    center: Option<Coordinates>,
) -> Vec<TableRow> {
    let mut rows = rows_from(collection);

    if let Some(bounds) = &options.bbox {
        rows = within_bounds(&rows, bounds, &options.status);
    }
    if let (Some(center), Some((_, radius_km))) = (center, &options.near) {
        rows = within_radius(&rows, center, *radius_km);
    }
    rows = filter_by_status(&rows, &options.status);
    if let Some(needle) = &options.search {
        rows = search_rows(&rows, needle);
    }
    sort_rows(&rows, options.sort)
}

fn print_rows(rows: &[TableRow]) {
    if rows.is_empty() {
        println!("no applications match");
        return;
    }

    let header = format!(
        "{:<22}{:<12}{:<22}{:<40}DESCRIPTION",
        "REFERENCE", "RECEIVED", "STATUS", "ADDRESS"
    );
    println!("{header}");
    for row in rows {
        println!(
            "{:<22}{:<12}{:<22}{:<40}{}",
            row.reference,
            fmt_date(row.received_date),
            row.status,
            truncate(&row.address, 38),
            truncate(&row.description, DESCRIPTION_WIDTH)
        );
    }
    println!("{} application(s)", rows.len());
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}
