#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial primitives for report queries.
//!
//! Provides the haversine great-circle distance used by every query and the
//! fixed-size degree grid used to bucket reports into hotspot candidates.
//! The grid is a deliberate approximation: a 0.01° cell is roughly 1.1 km
//! tall everywhere but its width shrinks towards the poles.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Edge length of a grid cell in decimal degrees.
pub const GRID_CELL_DEGREES: f64 = 0.01;

/// Great-circle distance in kilometers between two points given in decimal
/// degrees.
///
/// Symmetric in its arguments and zero for identical points. Finite inputs
/// always produce a finite, non-negative result; out-of-range coordinates
/// are not rejected.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    // Absolute deltas keep the result bit-identical when the points swap.
    let dlat = (lat2 - lat1).abs();
    let dlon = (lon2 - lon1).abs();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// A cell of the [`GRID_CELL_DEGREES`] coordinate grid.
///
/// Cells are identified by integer indices so equal cells compare and hash
/// exactly; [`GridCell::latitude`] and [`GridCell::longitude`] give the
/// snapped coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    /// Latitude index (`latitude / GRID_CELL_DEGREES`, rounded).
    pub lat_index: i64,
    /// Longitude index (`longitude / GRID_CELL_DEGREES`, rounded).
    pub lng_index: i64,
}

impl GridCell {
    /// Snaps a coordinate to its containing cell.
    ///
    /// Each axis is rounded to the nearest multiple of the cell size, with
    /// exact halves going to the even index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing(lat: f64, lng: f64) -> Self {
        Self {
            lat_index: (lat / GRID_CELL_DEGREES).round_ties_even() as i64,
            lng_index: (lng / GRID_CELL_DEGREES).round_ties_even() as i64,
        }
    }

    /// Snapped latitude of this cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn latitude(self) -> f64 {
        self.lat_index as f64 * GRID_CELL_DEGREES
    }

    /// Snapped longitude of this cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn longitude(self) -> f64 {
        self.lng_index as f64 * GRID_CELL_DEGREES
    }
}
