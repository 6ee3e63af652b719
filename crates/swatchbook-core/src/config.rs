//! Engine configuration.

use crate::history::MAX_UNDO_HISTORY;
use crate::palette::{DEFAULT_PALETTE_SIZE, MAX_COLORS, MIN_COLORS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// How long the "copied" indicator stays up, in milliseconds.
pub const DEFAULT_COPIED_INDICATOR_MS: u64 = 1000;

/// Horizontal gap kept between the picker popup and the viewport edge.
pub const DEFAULT_POPUP_MARGIN: f64 = 8.0;

/// Vertical gap between the anchor's bottom edge and the popup.
pub const DEFAULT_POPUP_OFFSET: f64 = 10.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Decimal places kept when quantizing picker drags.
///
/// Coarser values make drag feedback steadier; finer values track the
/// pointer more closely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerPrecision {
    pub hue_decimals: u32,
    pub sv_decimals: u32,
}

impl Default for PickerPrecision {
    fn default() -> Self {
        Self {
            hue_decimals: 2,
            sv_decimals: 4,
        }
    }
}

/// Tunables for the palette engine and picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries in a freshly generated palette.
    pub default_palette_size: usize,
    pub min_colors: usize,
    pub max_colors: usize,
    /// Undo states kept per history stack.
    pub max_history: usize,
    pub copied_indicator_ms: u64,
    pub precision: PickerPrecision,
    pub popup_margin: f64,
    pub popup_offset: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_palette_size: DEFAULT_PALETTE_SIZE,
            min_colors: MIN_COLORS,
            max_colors: MAX_COLORS,
            max_history: MAX_UNDO_HISTORY,
            copied_indicator_ms: DEFAULT_COPIED_INDICATOR_MS,
            precision: PickerPrecision::default(),
            popup_margin: DEFAULT_POPUP_MARGIN,
            popup_offset: DEFAULT_POPUP_OFFSET,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the cardinality bounds are consistent.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_colors < MIN_COLORS {
            return Err(ConfigError::Invalid(format!(
                "min_colors must be at least {}, got {}",
                MIN_COLORS, self.min_colors
            )));
        }
        if self.min_colors > self.max_colors {
            return Err(ConfigError::Invalid(format!(
                "min_colors ({}) exceeds max_colors ({})",
                self.min_colors, self.max_colors
            )));
        }
        if !(self.min_colors..=self.max_colors).contains(&self.default_palette_size) {
            return Err(ConfigError::Invalid(format!(
                "default_palette_size ({}) outside {}..={}",
                self.default_palette_size, self.min_colors, self.max_colors
            )));
        }
        if self.max_history == 0 {
            return Err(ConfigError::Invalid("max_history must be positive".to_string()));
        }
        Ok(())
    }

    pub fn copied_indicator(&self) -> Duration {
        Duration::from_millis(self.copied_indicator_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_palette_size, 5);
        assert_eq!(config.min_colors, 2);
        assert_eq!(config.max_colors, 8);
        assert_eq!(config.precision.hue_decimals, 2);
        assert_eq!(config.precision.sv_decimals, 4);
        assert_eq!(config.copied_indicator(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = EngineConfig::from_json(r#"{ "max_history": 10, "precision": { "hue_decimals": 1 } }"#)
            .unwrap();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.precision.hue_decimals, 1);
        assert_eq!(config.precision.sv_decimals, 4);
        assert_eq!(config.max_colors, 8);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let result = EngineConfig::from_json(r#"{ "min_colors": 6, "max_colors": 4 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EngineConfig::from_json(r#"{ "default_palette_size": 9 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EngineConfig::from_json(r#"{ "min_colors": 1 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_palette_size": 3, "copied_indicator_ms": 250 }}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.default_palette_size, 3);
        assert_eq!(config.copied_indicator(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_missing_file() {
        let result = EngineConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
