//! Maneuver classification.
//!
//! Combines the turn detector with the tack side assigned upstream:
//!
//! ```text
//! Subtrack ──► detect_turn_type ──► TurnType ──┐
//!    │                                         ├──► ManeuverCategory + name
//!    └──────────────── tack_side ──────────────┘
//! ```

mod label;
mod turn;

pub use label::{
    format_timestamp, label, ManeuverCategory, ManeuverLabel, NO_TIME, TIMESTAMP_FORMAT,
    UNKNOWN_STYLE_ID,
};
pub use turn::{detect_turn_type, TurnType};

use crate::track::Subtrack;

/// Full classification result for one subtrack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedManeuver {
    pub turn: TurnType,
    pub label: ManeuverLabel,
}

impl ClassifiedManeuver {
    /// Category shortcut.
    pub fn category(&self) -> ManeuverCategory {
        self.label.category
    }
}

/// Classify the subtrack at zero-based `index` against `wind_direction`.
pub fn classify(subtrack: &Subtrack, index: usize, wind_direction: f64) -> ClassifiedManeuver {
    let turn = detect_turn_type(&subtrack.points, wind_direction);
    let label = label(subtrack, index, turn);

    tracing::debug!(
        index,
        points = subtrack.points.len(),
        turn = %turn,
        category = %label.category,
        "Classified maneuver"
    );

    ClassifiedManeuver { turn, label }
}
