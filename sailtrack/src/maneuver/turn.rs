//! Jibe/tack detection from the course sailed through a maneuver.
//!
//! # Wind-relative course
//!
//! Leg headings are expressed relative to the wind direction (the direction
//! the wind blows FROM), so that:
//!
//! - `0°` points straight into the wind (the wind axis)
//! - `180°` points dead downwind (the downwind axis)
//!
//! The course is then unwrapped leg by leg, accumulating the signed turn
//! between consecutive legs. Turning the bow through the wind axis is a tack;
//! turning the stern through it (crossing the downwind axis) is a jibe.
//!
//! ```text
//!                 wind axis (0°)  -> Tack
//!                       |
//!          port side    |    starboard side
//!                       |
//!              downwind axis (180°) -> Jibe
//! ```
//!
//! # Boundary rule
//!
//! Axis checks are inclusive: a leg pointing exactly along an axis counts as
//! crossing it. When the course touches several axes, the first one reached
//! along the course decides.

use std::fmt;

use crate::geo::{heading, normalize_degrees, signed_angle_delta, GeoPoint};

/// Spacing between the wind axis and the downwind axis on the unwrapped course.
const HALF_TURN_DEG: f64 = 180.0;

/// Kind of turn a maneuver performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnType {
    /// Stern passed through the wind.
    Jibe,
    /// Bow passed through the wind.
    Tack,
    /// Not enough data, or the course crossed neither axis.
    Unknown,
}

impl TurnType {
    /// Name used in placemark labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnType::Jibe => "Jibe",
            TurnType::Tack => "Tack",
            TurnType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify the turn sailed along `points` for a wind blowing from
/// `wind_direction` degrees.
///
/// Legs between coincident points are skipped since their bearing is
/// undefined. Returns [`TurnType::Unknown`] for fewer than two points, when
/// no usable leg remains, or when the course crosses neither axis.
pub fn detect_turn_type(points: &[GeoPoint], wind_direction: f64) -> TurnType {
    if points.len() < 2 {
        return TurnType::Unknown;
    }

    let headings: Vec<f64> = points
        .windows(2)
        .filter(|leg| !leg[0].coincides_with(&leg[1]))
        .map(|leg| heading(&leg[0], &leg[1]))
        .collect();

    let Some((&first, rest)) = headings.split_first() else {
        return TurnType::Unknown;
    };

    let wind = normalize_degrees(wind_direction);
    let mut relative = normalize_degrees(first - wind);

    if let Some(turn) = first_axis_crossed(relative, relative) {
        return turn;
    }

    let mut previous = first;
    for &current in rest {
        let next = relative + signed_angle_delta(previous, current);
        if let Some(turn) = first_axis_crossed(relative, next) {
            return turn;
        }
        relative = next;
        previous = current;
    }

    TurnType::Unknown
}

/// First axis met when sweeping the unwrapped course from `start` to `end`.
///
/// Both ends are inclusive. Even multiples of 180° are the wind axis, odd
/// multiples the downwind axis.
fn first_axis_crossed(start: f64, end: f64) -> Option<TurnType> {
    let candidate = if end >= start {
        (start / HALF_TURN_DEG).ceil()
    } else {
        (start / HALF_TURN_DEG).floor()
    };

    let axis = candidate * HALF_TURN_DEG;
    let within = if end >= start {
        axis <= end
    } else {
        axis >= end
    };

    if !within {
        return None;
    }

    if (candidate as i64).rem_euclid(2) == 0 {
        Some(TurnType::Tack)
    } else {
        Some(TurnType::Jibe)
    }
}
