//! TOML-based monitor configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::MonitorError;
use crate::model::registry::{DEFAULT_ROOMS, DEFAULT_WARNING_THRESHOLD_W};
use crate::model::{RoomRegistry, Sockets};

/// Top-level monitor configuration parsed from TOML.
///
/// All fields have defaults matching the `house` preset. Load from TOML with
/// [`MonitorConfig::from_toml_file`] or use [`MonitorConfig::house`] for the
/// built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Load simulation parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Warning threshold.
    #[serde(default)]
    pub warning: WarningConfig,
    /// Room set and initial socket counts.
    #[serde(default)]
    pub rooms: RoomsConfig,
}

/// Load simulation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed.
    pub seed: u64,
    /// Lowest per-socket draw in watts (inclusive).
    pub lower_w: u32,
    /// Highest per-socket draw in watts (inclusive).
    pub upper_w: u32,
    /// Interval between automatic updates in the TUI, in milliseconds.
    pub tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            lower_w: 50,
            upper_w: 150,
            tick_ms: 1000,
        }
    }
}

/// Warning threshold settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarningConfig {
    /// Watts above which a phase triggers a warning.
    pub threshold_w: f64,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            threshold_w: DEFAULT_WARNING_THRESHOLD_W,
        }
    }
}

/// Room set and initial socket counts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomsConfig {
    /// Room names in display order; must be unique and non-empty.
    pub names: Vec<String>,
    /// Socket count every room starts with (must be >= 1).
    pub default_sockets: u32,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            names: DEFAULT_ROOMS.iter().map(ToString::to_string).collect(),
            default_sockets: 1,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.lower_w"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl MonitorConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["house", "studio", "workshop"];

    /// Four-room home with one socket each and a 300 W warning.
    pub fn house() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            warning: WarningConfig::default(),
            rooms: RoomsConfig::default(),
        }
    }

    /// Two-room flat with a lower warning threshold.
    pub fn studio() -> Self {
        Self {
            simulation: SimulationConfig {
                lower_w: 30,
                upper_w: 120,
                ..SimulationConfig::default()
            },
            warning: WarningConfig { threshold_w: 200.0 },
            rooms: RoomsConfig {
                names: vec!["Kitchen".to_string(), "Studio".to_string()],
                default_sockets: 1,
            },
        }
    }

    /// Heavy-load workshop with several sockets per room.
    pub fn workshop() -> Self {
        Self {
            simulation: SimulationConfig {
                lower_w: 200,
                upper_w: 800,
                tick_ms: 500,
                ..SimulationConfig::default()
            },
            warning: WarningConfig {
                threshold_w: 2500.0,
            },
            rooms: RoomsConfig {
                names: vec![
                    "Workshop".to_string(),
                    "Garage".to_string(),
                    "Office".to_string(),
                ],
                default_sockets: 2,
            },
        }
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "house" => Ok(Self::house()),
            "studio" => Ok(Self::studio()),
            "workshop" => Ok(Self::workshop()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every violation found.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.lower_w > s.upper_w {
            errors.push(ConfigError::new(
                "simulation.lower_w",
                "must be <= simulation.upper_w",
            ));
        }
        if s.tick_ms == 0 {
            errors.push(ConfigError::new("simulation.tick_ms", "must be > 0"));
        }

        let w = &self.warning;
        if !w.threshold_w.is_finite() || w.threshold_w < 0.0 {
            errors.push(ConfigError::new("warning.threshold_w", "must be >= 0"));
        }

        let r = &self.rooms;
        if r.names.is_empty() {
            errors.push(ConfigError::new("rooms.names", "must list at least one room"));
        }
        for (i, name) in r.names.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("rooms.names[{i}]"),
                    "must not be blank",
                ));
            } else if r.names[..i].contains(name) {
                errors.push(ConfigError::new(
                    format!("rooms.names[{i}]"),
                    format!("duplicate room \"{name}\""),
                ));
            }
        }
        if r.default_sockets == 0 {
            errors.push(ConfigError::new("rooms.default_sockets", "must be >= 1"));
        }

        errors
    }

    /// Builds the room registry described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns the registry's construction error for duplicate rooms, a zero
    /// socket count, or an invalid threshold. Run [`MonitorConfig::validate`]
    /// first for field-level messages.
    pub fn build_registry(&self) -> Result<RoomRegistry, MonitorError> {
        let sockets = Sockets::new(self.rooms.default_sockets).ok_or_else(|| {
            MonitorError::InvalidSocketCount {
                room: "*".to_string(),
                value: self.rooms.default_sockets.to_string(),
            }
        })?;
        RoomRegistry::new(
            self.rooms.names.iter().cloned(),
            sockets,
            self.warning.threshold_w,
        )
    }
}
