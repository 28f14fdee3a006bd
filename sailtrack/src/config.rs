//! Configuration file support.
//!
//! Settings live in an INI file, by default at
//! `<config dir>/sailtrack/config.ini`:
//!
//! ```ini
//! [export]
//! wind_direction = 215
//!
//! [styles]
//! port_jibe = ff00ffff
//! port_tack = ff0000ff
//! starboard_jibe = ff00ff00
//! starboard_tack = ffff0000
//! line_width = 1
//! arrow_icon = http://maps.google.com/mapfiles/kml/shapes/arrow.png
//! arrow_scale = 1
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use ini::{Ini, Properties};
use thiserror::Error;

use crate::kml::{is_valid_color, StylePalette};
use crate::maneuver::ManeuverCategory;

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "sailtrack";

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.ini";

const SECTION_EXPORT: &str = "export";
const SECTION_STYLES: &str = "styles";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to load config {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// INI text could not be parsed.
    #[error("invalid config: {0}")]
    Parse(String),

    /// A key holds a value of the wrong shape.
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: &'static str,
    },
}

/// `[export]` settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSettings {
    /// Wind direction used when none is given on the command line.
    pub wind_direction: Option<f64>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub export: ExportSettings,
    pub palette: StylePalette,
}

/// Default configuration file path.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_ini(&ini)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse configuration from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(SECTION_EXPORT)) {
            config.export.wind_direction = parse_number(section, SECTION_EXPORT, "wind_direction")?;
        }

        if let Some(section) = ini.section(Some(SECTION_STYLES)) {
            apply_styles(section, &mut config.palette)?;
        }

        Ok(config)
    }
}

fn apply_styles(section: &Properties, palette: &mut StylePalette) -> Result<(), ConfigError> {
    let color_keys = [
        ("port_jibe", ManeuverCategory::PortJibe),
        ("port_tack", ManeuverCategory::PortTack),
        ("starboard_jibe", ManeuverCategory::StarboardJibe),
        ("starboard_tack", ManeuverCategory::StarboardTack),
    ];

    for (key, category) in color_keys {
        let Some(value) = section.get(key) else {
            continue;
        };
        let value = value.trim();
        if !is_valid_color(value) {
            return Err(ConfigError::InvalidValue {
                key: format!("{}.{}", SECTION_STYLES, key),
                value: value.to_string(),
                reason: "expected 8 hex digits (aabbggrr)",
            });
        }
        if let Some(style) = palette.line_style_mut(category) {
            style.color = value.to_lowercase();
        }
    }

    if let Some(width) = parse_number(section, SECTION_STYLES, "line_width")? {
        for category in ManeuverCategory::STYLED {
            if let Some(style) = palette.line_style_mut(category) {
                style.width = width;
            }
        }
    }

    if let Some(href) = section.get("arrow_icon") {
        palette.arrow.href = href.trim().to_string();
    }

    if let Some(scale) = parse_number(section, SECTION_STYLES, "arrow_scale")? {
        palette.arrow.scale = scale;
    }

    Ok(())
}

fn parse_number(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<f64>, ConfigError> {
    let Some(raw) = section.get(key) else {
        return Ok(None);
    };

    let value = raw.trim();
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ConfigError::InvalidValue {
            key: format!("{}.{}", section_name, key),
            value: value.to_string(),
            reason: "expected a number",
        }),
    }
}
