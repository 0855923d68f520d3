pub mod client;
pub mod error;
pub mod geocode;
pub mod normalize;
pub mod pagination;
pub mod search;
pub mod types;

pub use client::{BopsClient, LoadOutcome};
pub use error::ClientError;
pub use geocode::{Geocoder, PostcodeClient};
pub use normalize::{normalize_application, normalize_entry, normalize_page};
pub use search::{resolve_center, resolve_search};
pub use types::{RawApplication, RawPage};
