//! Maneuver subtracks handed to the classifier.
//!
//! Segmenting a full GPS log into subtracks happens upstream. This module
//! only models the result and loads it from a JSON document:
//!
//! ```json
//! [
//!   {
//!     "tack_side": "port",
//!     "points": [
//!       { "lat": 53.5, "lon": 10.0, "time": "2024-06-01T14:03:27" },
//!       { "lat": 53.6, "lon": 10.1 }
//!     ]
//!   }
//! ]
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::geo::GeoPoint;

/// Side of the boat the wind comes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TackSide {
    Port,
    Starboard,
}

impl TackSide {
    /// Name used in placemark labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            TackSide::Port => "Port",
            TackSide::Starboard => "Starboard",
        }
    }
}

impl fmt::Display for TackSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered run of GPS fixes covering one maneuver.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Subtrack {
    /// Tack side assigned by the segmenter; `None` when it could not decide.
    #[serde(default)]
    pub tack_side: Option<TackSide>,
    /// Fixes in recording order.
    #[serde(default)]
    pub points: Vec<GeoPoint>,
}

impl Subtrack {
    /// Create a subtrack with a known tack side.
    pub fn new(tack_side: TackSide, points: Vec<GeoPoint>) -> Self {
        Self {
            tack_side: Some(tack_side),
            points,
        }
    }

    /// Create a subtrack whose tack side is unset.
    pub fn untagged(points: Vec<GeoPoint>) -> Self {
        Self {
            tack_side: None,
            points,
        }
    }

    /// First fix, if any.
    pub fn first_point(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    /// First two fixes, which give the initial direction of travel.
    ///
    /// `None` when there are fewer than two fixes.
    pub fn initial_leg(&self) -> Option<(&GeoPoint, &GeoPoint)> {
        match self.points.as_slice() {
            [first, second, ..] => Some((first, second)),
            _ => None,
        }
    }
}

/// Errors raised while loading subtracks from disk.
#[derive(Debug, Error)]
pub enum TrackLoadError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a valid subtrack document.
    #[error("invalid subtrack document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse subtracks from a JSON string.
pub fn parse_subtracks(json: &str) -> Result<Vec<Subtrack>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load subtracks from a JSON file.
pub fn load_subtracks(path: &Path) -> Result<Vec<Subtrack>, TrackLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| TrackLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let subtracks = parse_subtracks(&contents).map_err(|source| TrackLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        count = subtracks.len(),
        "Loaded subtracks"
    );

    Ok(subtracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_subtracks() {
        let json = r#"[
            {
                "tack_side": "port",
                "points": [
                    { "lat": 53.5, "lon": 10.0, "time": "2024-06-01T14:03:27" },
                    { "lat": 53.6, "lon": 10.1 }
                ]
            },
            { "tack_side": null, "points": [] },
            { "points": [ { "lat": 1.0, "lon": 2.0 } ] }
        ]"#;

        let subtracks = parse_subtracks(json).unwrap();
        assert_eq!(subtracks.len(), 3);

        assert_eq!(subtracks[0].tack_side, Some(TackSide::Port));
        assert_eq!(subtracks[0].points.len(), 2);
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(14, 3, 27)
            .unwrap();
        assert_eq!(subtracks[0].points[0].timestamp, Some(expected));
        assert_eq!(subtracks[0].points[1].timestamp, None);

        assert_eq!(subtracks[1].tack_side, None);
        assert!(subtracks[1].points.is_empty());
        assert_eq!(subtracks[2].tack_side, None);
    }

    #[test]
    fn test_parse_rejects_unknown_side() {
        let json = r#"[{ "tack_side": "leeward", "points": [] }]"#;
        assert!(parse_subtracks(json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_subtracks(Path::new("/nonexistent/subtracks.json")).unwrap_err();
        assert!(matches!(err, TrackLoadError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/subtracks.json"));
    }

    #[test]
    fn test_initial_leg() {
        assert!(Subtrack::untagged(vec![]).initial_leg().is_none());
        assert!(Subtrack::untagged(vec![GeoPoint::new(0.0, 0.0)])
            .initial_leg()
            .is_none());

        let subtrack = Subtrack::new(
            TackSide::Port,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(1.0, 0.0),
                GeoPoint::new(2.0, 1.0),
            ],
        );
        let (first, second) = subtrack.initial_leg().unwrap();
        assert_eq!(*first, GeoPoint::new(0.0, 0.0));
        assert_eq!(*second, GeoPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_tack_side_display() {
        assert_eq!(TackSide::Port.to_string(), "Port");
        assert_eq!(format!("{}", TackSide::Starboard), "Starboard");
    }
}
