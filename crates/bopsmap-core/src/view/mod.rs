//! Pure query functions over a loaded [`FeatureCollection`](crate::FeatureCollection).
//!
//! Nothing here mutates the collection; every function returns a fresh view
//! that the presentation layer renders as it sees fit.

mod proximity;
mod search;
mod table;

pub use proximity::{distance_km, within_bounds, within_radius, Bounds, KM_PER_DEGREE};
pub use search::{
    classify_search, find_reference, looks_like_postcode, looks_like_reference, SearchError,
    SearchQuery,
};
pub use table::{
    filter_by_status, rows_from, search_rows, sort_rows, SortKey, StatusFilter, TableRow,
};
