#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trash report record and category taxonomy.
//!
//! This crate defines the canonical report shape used across the whole
//! trash-map system, together with the per-category weights the dirtiness
//! scorer multiplies together. Categorical fields are optional; each enum
//! documents the value that stands in when a report leaves it out.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Material classification of the reported trash.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrashType {
    /// Bottles, bags, packaging film
    Plastic,
    /// Cardboard, newspaper, paper packaging
    Paper,
    /// Cans, scrap metal
    Metal,
    /// Bottles and shards
    Glass,
    /// Food waste, garden waste
    Organic,
    /// Discarded devices, batteries, cables
    Electronic,
    /// Several materials dumped together
    Mixed,
    /// Reporter could not tell
    Unknown,
}

impl TrashType {
    /// Returns the scoring weight for this material.
    ///
    /// Materials that smell, attract pests or spread easily weigh more;
    /// [`Self::Unknown`] is neutral.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Organic => 1.5,
            Self::Mixed => 1.4,
            Self::Plastic => 1.2,
            Self::Electronic => 1.1,
            Self::Paper | Self::Unknown => 1.0,
            Self::Glass => 0.9,
            Self::Metal => 0.8,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Plastic,
            Self::Paper,
            Self::Metal,
            Self::Glass,
            Self::Organic,
            Self::Electronic,
            Self::Mixed,
            Self::Unknown,
        ]
    }
}

/// How spread out the trash is at the reported spot.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sparcity {
    /// A few isolated items
    Low,
    /// Assumed when the reporter did not say.
    #[default]
    Medium,
    /// Trash covering most of the area
    High,
}

impl Sparcity {
    /// Returns the scoring multiplier for this level.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.5,
            Self::High => 2.0,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Overall cleanliness of the surroundings.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Cleanliness {
    /// Mostly clean apart from the reported trash
    Good,
    /// Assumed when the reporter did not say.
    #[default]
    Moderate,
    /// Visibly neglected
    Poor,
    /// Heavily littered
    VeryPoor,
}

impl Cleanliness {
    /// Returns the scoring multiplier for this level. Lower cleanliness
    /// means a higher multiplier.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Good => 0.5,
            Self::Moderate => 1.0,
            Self::Poor => 1.5,
            Self::VeryPoor => 2.0,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Good, Self::Moderate, Self::Poor, Self::VeryPoor]
    }
}

/// A geotagged trash report as stored by the report repository.
///
/// Reports are never mutated by the query engine; every derived value
/// (distance, dirtiness) is recomputed per query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrashReport {
    /// Opaque unique identifier.
    pub id: String,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// When the report was created.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Material classification. Unrecognized values load as `None`.
    #[serde(default, deserialize_with = "lenient_category")]
    pub trash_type: Option<TrashType>,
    /// Estimated weight in kilograms.
    #[serde(default)]
    pub estimated_kg: Option<f64>,
    /// Spread of the trash. Unrecognized values load as `None`.
    #[serde(default, deserialize_with = "lenient_category")]
    pub sparcity: Option<Sparcity>,
    /// Cleanliness of the surroundings. Unrecognized values load as `None`.
    #[serde(default, deserialize_with = "lenient_category")]
    pub cleanliness: Option<Cleanliness>,
    /// Handle of the stored photo.
    #[serde(default)]
    pub image_reference: Option<String>,
}

impl TrashReport {
    /// Returns `(latitude, longitude)` when both coordinates are present.
    ///
    /// Reports without a location are non-spatial and are skipped by every
    /// spatial query.
    #[must_use]
    pub const fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Returns the sparcity, substituting [`Sparcity::Medium`] when absent.
    #[must_use]
    pub fn sparcity_or_default(&self) -> Sparcity {
        self.sparcity.unwrap_or_default()
    }

    /// Returns the cleanliness, substituting [`Cleanliness::Moderate`] when
    /// absent.
    #[must_use]
    pub fn cleanliness_or_default(&self) -> Cleanliness {
        self.cleanliness.unwrap_or_default()
    }

    /// Returns the trash type, substituting [`TrashType::Unknown`] when
    /// absent.
    #[must_use]
    pub fn trash_type_or_unknown(&self) -> TrashType {
        self.trash_type.unwrap_or(TrashType::Unknown)
    }
}

/// Deserializes an optional category string, mapping values outside the
/// taxonomy to `None` instead of failing the whole record.
fn lenient_category<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_parse_back() {
        for t in TrashType::all() {
            assert_eq!(t.as_ref().parse::<TrashType>().unwrap(), *t);
        }
        assert_eq!("very_poor".parse::<Cleanliness>().unwrap(), Cleanliness::VeryPoor);
        assert!("filthy".parse::<Cleanliness>().is_err());
    }

    #[test]
    fn defaults_are_neutral_levels() {
        let report = TrashReport::default();
        assert_eq!(report.sparcity_or_default(), Sparcity::Medium);
        assert_eq!(report.cleanliness_or_default(), Cleanliness::Moderate);
        assert_eq!(report.trash_type_or_unknown(), TrashType::Unknown);
        assert!((TrashType::Unknown.weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn location_requires_both_coordinates() {
        let mut report = TrashReport {
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..TrashReport::default()
        };
        assert_eq!(report.location(), Some((0.0, 0.0)));

        report.longitude = None;
        assert_eq!(report.location(), None);
    }

    #[test]
    fn unrecognized_categories_load_as_absent() {
        let json = r#"{
            "id": "r-1",
            "latitude": 51.5,
            "longitude": -0.12,
            "trash_type": "styrofoam",
            "sparcity": "high",
            "cleanliness": "spotless"
        }"#;
        let report: TrashReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.trash_type, None);
        assert_eq!(report.sparcity, Some(Sparcity::High));
        assert_eq!(report.cleanliness, None);
        assert_eq!(report.estimated_kg, None);
    }

    #[test]
    fn serializes_snake_case_categories() {
        let report = TrashReport {
            id: "r-2".to_string(),
            cleanliness: Some(Cleanliness::VeryPoor),
            ..TrashReport::default()
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["cleanliness"], "very_poor");
        assert!(value["trash_type"].is_null());
    }
}
