//! Radius and visible-area selection.
//!
//! Distances are planar: latitude and longitude are treated as flat
//! Cartesian axes and degrees convert to kilometres with a single constant.
//! That holds at borough scale only; a wider area needs a great-circle
//! formula instead.

use geo::{coord, Intersects, Rect};

use crate::feature::Coordinates;
use crate::view::table::{StatusFilter, TableRow};

/// Kilometres per degree used for the flat-plane approximation.
pub const KM_PER_DEGREE: f64 = 110.7;

/// Slack on the radius comparison so a zero radius still matches the
/// centre itself.
const RADIUS_TOLERANCE_KM: f64 = 1e-9;

/// Planar distance between two points, in kilometres.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lon = a.longitude - b.longitude;
    let d_lat = a.latitude - b.latitude;
    d_lon.hypot(d_lat) * KM_PER_DEGREE
}

/// Rows whose point lies within `radius_km` of `center`. Rows without
/// coordinates are never selected.
#[must_use]
pub fn within_radius(rows: &[TableRow], center: Coordinates, radius_km: f64) -> Vec<TableRow> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Vec::new();
    }
    rows.iter()
        .filter(|r| {
            r.coordinates
                .is_some_and(|c| distance_km(c, center) <= radius_km + RADIUS_TOLERANCE_KM)
        })
        .cloned()
        .collect()
}

/// The map's visible box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Edges count as inside.
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        let rect = Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        );
        rect.intersects(&coord! { x: point.longitude, y: point.latitude })
    }
}

/// "Search this area": rows inside `bounds` that also pass the status filter.
#[must_use]
pub fn within_bounds(rows: &[TableRow], bounds: &Bounds, status: &StatusFilter) -> Vec<TableRow> {
    rows.iter()
        .filter(|r| r.coordinates.is_some_and(|c| bounds.contains(c)) && status.accepts(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Reference;

    fn row(reference: &str, status: &str, coords: Option<(f64, f64)>) -> TableRow {
        TableRow {
            address: "1 Test St".to_owned(),
            reference: Reference::Known(reference.to_owned()),
            description: String::new(),
            received_date: None,
            status: status.to_owned(),
            coordinates: coords.map(|(lon, lat)| Coordinates::new(lon, lat)),
        }
    }

    fn refs(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.reference.as_str()).collect()
    }

    #[test]
    fn one_degree_is_the_fixed_constant() {
        let d = distance_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - KM_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_selects_only_exact_centre() {
        let center = Coordinates::new(-0.0877, 51.5035);
        let rows = vec![
            row("a", "Pending", Some((-0.0877, 51.5035))),
            row("b", "Pending", Some((-0.0878, 51.5035))),
            row("c", "Pending", None),
        ];
        assert_eq!(refs(&within_radius(&rows, center, 0.0)), vec!["a"]);
    }

    #[test]
    fn radius_selects_nearby_rows() {
        let center = Coordinates::new(-0.09, 51.50);
        let rows = vec![
            // ~0.55 km north
            row("near", "Pending", Some((-0.09, 51.505))),
            // ~5.5 km north
            row("far", "Pending", Some((-0.09, 51.55))),
        ];
        assert_eq!(refs(&within_radius(&rows, center, 1.0)), vec!["near"]);
        assert_eq!(refs(&within_radius(&rows, center, 10.0)), vec!["near", "far"]);
    }

    #[test]
    fn negative_radius_selects_nothing() {
        let rows = vec![row("a", "Pending", Some((0.0, 0.0)))];
        assert!(within_radius(&rows, Coordinates::new(0.0, 0.0), -1.0).is_empty());
    }

    #[test]
    fn bounds_include_edges() {
        let bounds = Bounds::new(51.0, -1.0, 52.0, 0.0);
        assert!(bounds.contains(Coordinates::new(-1.0, 51.0)));
        assert!(bounds.contains(Coordinates::new(-0.5, 51.5)));
        assert!(!bounds.contains(Coordinates::new(0.1, 51.5)));
    }

    #[test]
    fn bounds_and_status_are_intersected() {
        let bounds = Bounds::new(51.4, -0.2, 51.6, 0.0);
        let rows = vec![
            row("in-pending", "Pending", Some((-0.1, 51.5))),
            row("in-returned", "Returned", Some((-0.1, 51.5))),
            row("out-pending", "Pending", Some((0.5, 51.5))),
            row("nowhere", "Pending", None),
        ];

        assert_eq!(
            refs(&within_bounds(&rows, &bounds, &StatusFilter::All)),
            vec!["in-pending", "in-returned"]
        );
        assert_eq!(
            refs(&within_bounds(
                &rows,
                &bounds,
                &StatusFilter::Only("Pending".to_owned())
            )),
            vec!["in-pending"]
        );
    }
}
