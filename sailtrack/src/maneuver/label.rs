//! Maneuver categories and placemark labels.

use std::fmt;

use chrono::NaiveDateTime;

use super::turn::TurnType;
use crate::track::{Subtrack, TackSide};

/// Timestamp layout used in placemark names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text used in place of a timestamp when none is available.
pub const NO_TIME: &str = "no_time";

/// Style id referenced by placemarks that could not be classified.
pub const UNKNOWN_STYLE_ID: &str = "unknown";

/// Classified maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManeuverCategory {
    PortJibe,
    PortTack,
    StarboardJibe,
    StarboardTack,
    Unknown,
}

/// One row of the category table.
struct CategoryEntry {
    side: TackSide,
    turn: TurnType,
    category: ManeuverCategory,
}

/// Every classifiable `(side, turn)` pair. Anything else is `Unknown`.
static CATEGORY_TABLE: [CategoryEntry; 4] = [
    CategoryEntry {
        side: TackSide::Port,
        turn: TurnType::Jibe,
        category: ManeuverCategory::PortJibe,
    },
    CategoryEntry {
        side: TackSide::Port,
        turn: TurnType::Tack,
        category: ManeuverCategory::PortTack,
    },
    CategoryEntry {
        side: TackSide::Starboard,
        turn: TurnType::Jibe,
        category: ManeuverCategory::StarboardJibe,
    },
    CategoryEntry {
        side: TackSide::Starboard,
        turn: TurnType::Tack,
        category: ManeuverCategory::StarboardTack,
    },
];

impl ManeuverCategory {
    /// All categories that have a style of their own, in style-dictionary order.
    pub const STYLED: [ManeuverCategory; 4] = [
        ManeuverCategory::PortJibe,
        ManeuverCategory::PortTack,
        ManeuverCategory::StarboardJibe,
        ManeuverCategory::StarboardTack,
    ];

    /// Look up the category for a tack side and turn type.
    pub fn from_parts(side: Option<TackSide>, turn: TurnType) -> Self {
        let Some(side) = side else {
            return ManeuverCategory::Unknown;
        };

        CATEGORY_TABLE
            .iter()
            .find(|entry| entry.side == side && entry.turn == turn)
            .map(|entry| entry.category)
            .unwrap_or(ManeuverCategory::Unknown)
    }

    /// Style id used in the overlay document.
    pub fn style_id(&self) -> &'static str {
        match self {
            ManeuverCategory::PortJibe => "portJibe",
            ManeuverCategory::PortTack => "portTack",
            ManeuverCategory::StarboardJibe => "starboardJibe",
            ManeuverCategory::StarboardTack => "starboardTack",
            ManeuverCategory::Unknown => UNKNOWN_STYLE_ID,
        }
    }

    /// Tack side and turn type for classified categories.
    pub fn parts(&self) -> Option<(TackSide, TurnType)> {
        CATEGORY_TABLE
            .iter()
            .find(|entry| entry.category == *self)
            .map(|entry| (entry.side, entry.turn))
    }

    /// Human-readable name, e.g. "Port Tack".
    pub fn title(&self) -> String {
        match self.parts() {
            Some((side, turn)) => format!("{} {}", side, turn),
            None => "Unknown".to_string(),
        }
    }
}

impl fmt::Display for ManeuverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Category and display name assigned to one subtrack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManeuverLabel {
    pub category: ManeuverCategory,
    pub display_name: String,
}

/// Format a fix timestamp for a placemark name, falling back to [`NO_TIME`].
pub fn format_timestamp(timestamp: Option<&NaiveDateTime>) -> String {
    match timestamp {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => NO_TIME.to_string(),
    }
}

/// Label the subtrack at zero-based `index` in the export sequence.
///
/// The name reads `#<ordinal> <Side> <Turn> (<time>)`, with `Unknown` in
/// place of side and turn when the maneuver could not be classified.
pub fn label(subtrack: &Subtrack, index: usize, turn: TurnType) -> ManeuverLabel {
    let category = ManeuverCategory::from_parts(subtrack.tack_side, turn);
    let time = format_timestamp(subtrack.first_point().and_then(|p| p.timestamp.as_ref()));

    ManeuverLabel {
        category,
        display_name: format!("#{} {} ({})", index + 1, category.title(), time),
    }
}
