//! SailTrack - sailing maneuver classification and KML overlay export
//!
//! Takes maneuver subtracks cut from a GPS log, decides whether each one was
//! a tack or a jibe relative to the wind, and renders them as a styled KML
//! overlay with direction markers.
//!
//! ```text
//! geo ──► maneuver (turn + label) ──► kml (style + writer + export)
//! ```

pub mod config;
pub mod error;
pub mod geo;
pub mod kml;
pub mod logging;
pub mod maneuver;
pub mod track;

pub use error::{ExportError, ExportResult};
pub use geo::{heading, GeoPoint};
pub use kml::{export_maneuvers, write_maneuvers, ExportSummary, StylePalette};
pub use maneuver::{classify, detect_turn_type, ManeuverCategory, TurnType};
pub use track::{Subtrack, TackSide};
