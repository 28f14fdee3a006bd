//! Style dictionary for the overlay document.
//!
//! Colors use KML's `aabbggrr` hex layout as plain 8-digit strings.

use crate::maneuver::ManeuverCategory;

/// Style id of the directional arrow markers.
pub const ARROW_STYLE_ID: &str = "arrow";

/// Default arrow icon.
pub const DEFAULT_ARROW_ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/arrow.png";

/// Default line width for maneuver lines.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Default arrow icon scale.
pub const DEFAULT_ARROW_SCALE: f64 = 1.0;

/// Line style for one maneuver category.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

/// Icon style for directional markers.
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub href: String,
    pub scale: f64,
}

/// Colors and icon used when rendering maneuvers.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePalette {
    pub port_jibe: LineStyle,
    pub port_tack: LineStyle,
    pub starboard_jibe: LineStyle,
    pub starboard_tack: LineStyle,
    pub arrow: IconStyle,
}

impl Default for StylePalette {
    fn default() -> Self {
        let line = |color: &str| LineStyle {
            color: color.to_string(),
            width: DEFAULT_LINE_WIDTH,
        };

        Self {
            port_jibe: line("ff00ffff"),
            port_tack: line("ff0000ff"),
            starboard_jibe: line("ff00ff00"),
            starboard_tack: line("ffff0000"),
            arrow: IconStyle {
                href: DEFAULT_ARROW_ICON.to_string(),
                scale: DEFAULT_ARROW_SCALE,
            },
        }
    }
}

impl StylePalette {
    /// Line style for a category. `Unknown` has none.
    pub fn line_style(&self, category: ManeuverCategory) -> Option<&LineStyle> {
        match category {
            ManeuverCategory::PortJibe => Some(&self.port_jibe),
            ManeuverCategory::PortTack => Some(&self.port_tack),
            ManeuverCategory::StarboardJibe => Some(&self.starboard_jibe),
            ManeuverCategory::StarboardTack => Some(&self.starboard_tack),
            ManeuverCategory::Unknown => None,
        }
    }

    /// Mutable line style for a category.
    pub fn line_style_mut(&mut self, category: ManeuverCategory) -> Option<&mut LineStyle> {
        match category {
            ManeuverCategory::PortJibe => Some(&mut self.port_jibe),
            ManeuverCategory::PortTack => Some(&mut self.port_tack),
            ManeuverCategory::StarboardJibe => Some(&mut self.starboard_jibe),
            ManeuverCategory::StarboardTack => Some(&mut self.starboard_tack),
            ManeuverCategory::Unknown => None,
        }
    }

    /// Line styles in dictionary order, paired with their style ids.
    pub fn line_styles(&self) -> impl Iterator<Item = (&'static str, &LineStyle)> {
        ManeuverCategory::STYLED.into_iter().filter_map(move |category| {
            self.line_style(category)
                .map(|style| (category.style_id(), style))
        })
    }
}

/// Whether `color` is an 8-digit `aabbggrr` hex string.
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 8 && color.chars().all(|c| c.is_ascii_hexdigit())
}

/// Format a width or scale the way KML documents usually carry them:
/// integral values without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_colors() {
        let palette = StylePalette::default();
        let styles: Vec<_> = palette
            .line_styles()
            .map(|(id, style)| (id, style.color.as_str()))
            .collect();

        assert_eq!(
            styles,
            vec![
                ("portJibe", "ff00ffff"),
                ("portTack", "ff0000ff"),
                ("starboardJibe", "ff00ff00"),
                ("starboardTack", "ffff0000"),
            ]
        );
        assert_eq!(palette.arrow.href, DEFAULT_ARROW_ICON);
    }

    #[test]
    fn test_unknown_has_no_line_style() {
        let mut palette = StylePalette::default();
        assert!(palette.line_style(ManeuverCategory::Unknown).is_none());
        assert!(palette.line_style_mut(ManeuverCategory::Unknown).is_none());
    }

    #[test]
    fn test_line_style_mut_updates_palette() {
        let mut palette = StylePalette::default();
        if let Some(style) = palette.line_style_mut(ManeuverCategory::PortTack) {
            style.color = "80123456".to_string();
        }
        assert_eq!(palette.port_tack.color, "80123456");
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("ff00ffff"));
        assert!(is_valid_color("DEADBEEF"));
        assert!(!is_valid_color("ff00ff"));
        assert!(!is_valid_color("ff00ffzz"));
        assert!(!is_valid_color(""));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.75), "0.75");
    }
}
