//! GeoJSON-shaped point features and the projection from a [`RecordStore`].
//!
//! Geometry coordinates are written longitude first, as GeoJSON requires.
//! Records with missing coordinates still produce a feature; the missing
//! axis is serialized as `null` and consumers decide how to cope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordStore, Reference};

/// Name written on every projected collection.
pub const COLLECTION_NAME: &str = "PlanningApplications";

/// A resolved longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[longitude, latitude]`.
    Point { coordinates: [Option<f64>; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProperties {
    pub name: String,
    pub description: String,
    pub status: String,
    pub reference: Reference,
    pub received_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

impl Feature {
    /// Builds the feature for one record.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            geometry: Geometry::Point {
                coordinates: [record.longitude, record.latitude],
            },
            properties: FeatureProperties {
                name: record.title.clone(),
                description: record.description.clone(),
                status: record.status.clone(),
                reference: record.reference.clone(),
                received_date: record.received_date,
                public_url: record.public_url.clone(),
            },
        }
    }

    /// Returns the point when both axes are present and finite.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        let Geometry::Point {
            coordinates: [Some(longitude), Some(latitude)],
        } = self.geometry
        else {
            return None;
        };
        (longitude.is_finite() && latitude.is_finite())
            .then(|| Coordinates::new(longitude, latitude))
    }

    /// Text lines a map popup shows for this feature.
    ///
    /// The full block (reference, planned work, status) needs both a
    /// description and a status; with only a description the popup shows
    /// the planned work; otherwise just the name.
    #[must_use]
    pub fn popup_lines(&self) -> Vec<String> {
        let props = &self.properties;
        let mut lines = vec![props.name.clone()];
        let has_description = !props.description.is_empty();
        let has_status = !props.status.is_empty();

        if has_description && has_status {
            lines.push(format!("Reference: {}", props.reference));
            lines.push(format!("Planned work: {}", props.description));
            lines.push(format!("Current status: {}", props.status));
        } else if has_description {
            lines.push(format!("Planned work: {}", props.description));
        }
        lines
    }
}

/// Ordered, immutable collection of point features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    name: String,
    features: Vec<Feature>,
}

impl FeatureCollection {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            name: COLLECTION_NAME.to_owned(),
            features,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// Projects every record, in ascending key order, to one point feature.
#[must_use]
pub fn project(records: &RecordStore) -> FeatureCollection {
    FeatureCollection::new(records.iter().map(Feature::from_record).collect())
}
