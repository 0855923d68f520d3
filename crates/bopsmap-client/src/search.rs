//! Resolves search-box input to a map position.

use bopsmap_core::view::{classify_search, SearchError, SearchQuery};
use bopsmap_core::{Coordinates, FeatureCollection};

use crate::geocode::Geocoder;

/// Resolves `input` to coordinates to pan the map to.
///
/// A loaded application reference takes precedence; postcode-shaped input
/// goes through `geocoder`. Every rejection is one of the user-facing
/// [`SearchError`] messages.
///
/// # Errors
///
/// - [`SearchError::ReferenceNotFound`]: reference-shaped, no match loaded.
/// - [`SearchError::MissingLocation`]: matched an application with no
///   coordinates.
/// - [`SearchError::InvalidPostcode`]: the geocoder rejected the postcode.
/// - [`SearchError::InvalidInput`]: neither shape.
pub async fn resolve_search<G: Geocoder>(
    collection: &FeatureCollection,
    input: &str,
    geocoder: &G,
) -> Result<Coordinates, SearchError> {
    match classify_search(collection, input) {
        SearchQuery::Reference(feature) => {
            feature
                .coordinates()
                .ok_or_else(|| SearchError::MissingLocation {
                    reference: feature.properties.reference.to_string(),
                })
        }
        SearchQuery::ReferenceNotFound => Err(SearchError::ReferenceNotFound),
        SearchQuery::Postcode(postcode) => {
            geocoder.geocode(&postcode).await.map_err(|e| {
                tracing::warn!(postcode = %postcode, error = %e, "postcode lookup failed");
                SearchError::InvalidPostcode
            })
        }
        SearchQuery::Invalid => Err(SearchError::InvalidInput),
    }
}

/// Like [`resolve_search`], but a literal `lon,lat` pair is used as-is.
///
/// # Errors
///
/// Same as [`resolve_search`].
pub async fn resolve_center<G: Geocoder>(
    collection: &FeatureCollection,
    input: &str,
    geocoder: &G,
) -> Result<Coordinates, SearchError> {
    match parse_lon_lat(input) {
        Some(coords) => Ok(coords),
        None => resolve_search(collection, input, geocoder).await,
    }
}

fn parse_lon_lat(input: &str) -> Option<Coordinates> {
    let (lon, lat) = input.split_once(',')?;
    let longitude: f64 = lon.trim().parse().ok()?;
    let latitude: f64 = lat.trim().parse().ok()?;
    (longitude.is_finite() && latitude.is_finite()).then(|| Coordinates::new(longitude, latitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lon_lat_accepts_pair() {
        let c = parse_lon_lat("-0.125, 51.5").unwrap();
        assert!((c.longitude - -0.125).abs() < f64::EPSILON);
        assert!((c.latitude - 51.5).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_lon_lat_rejects_other_input() {
        assert!(parse_lon_lat("SE1 2QH").is_none());
        assert!(parse_lon_lat("21-12345").is_none());
        assert!(parse_lon_lat("abc,1").is_none());
        assert!(parse_lon_lat("NaN,1").is_none());
    }
}
