//! Geometry primitives for GPS track points.
//!
//! Provides the [`GeoPoint`] type and compass-bearing math used by the
//! maneuver classifier and the overlay exporter.
//!
//! All angles are in degrees, measured clockwise from true north
//! (0 = North, 90 = East).

use chrono::NaiveDateTime;
use serde::Deserialize;

/// A single GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Time of the fix, stored as recorded (no zone conversion).
    #[serde(default, rename = "time")]
    pub timestamp: Option<NaiveDateTime>,
}

impl GeoPoint {
    /// Create a point without a timestamp.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            timestamp: None,
        }
    }

    /// Create a point with an explicit timestamp.
    pub fn with_timestamp(lat: f64, lon: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            lat,
            lon,
            timestamp: Some(timestamp),
        }
    }

    /// Whether both points sit on exactly the same coordinates.
    pub fn coincides_with(&self, other: &GeoPoint) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

/// Initial great-circle bearing from `from` to `to`.
///
/// Returns degrees in `[0, 360)`. Swapping the arguments yields the
/// reciprocal bearing. Coincident points return 0.0.
pub fn heading(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlon = (to.lon - from.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Normalize an angle to the `[0, 360)` range.
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
///
/// Positive values are clockwise (turning to starboard).
pub fn signed_angle_delta(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}
