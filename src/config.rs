//! Configuration file support.
//!
//! Settings are stored as versioned JSON. Every field has a default, so older
//! or hand-trimmed files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::geometry::MinSize;
use crate::model::ImageSize;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Get all log levels in order from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Pointer interaction tunables for the annotation session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Half-size of the square hit window around each resize handle, in pixels
    pub handle_size: i32,
    /// Smallest width a room rectangle can be resized to
    pub min_area_width: i32,
    /// Smallest height a room rectangle can be resized to
    pub min_area_height: i32,
    /// New area size as a fraction of the canvas, `[width, height]`
    pub default_area_fraction: [f64; 2],
    /// Floor for the size of a new area, `[width, height]`
    pub default_area_min: [i32; 2],
}

impl InteractionSettings {
    /// Minimum rectangle size as used by the resize math.
    pub fn min_size(&self) -> MinSize {
        MinSize {
            w: self.min_area_width,
            h: self.min_area_height,
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            handle_size: constants::HANDLE_SIZE,
            min_area_width: constants::MIN_AREA_WIDTH,
            min_area_height: constants::MIN_AREA_HEIGHT,
            default_area_fraction: constants::DEFAULT_AREA_FRACTION,
            default_area_min: constants::DEFAULT_AREA_MIN,
        }
    }
}

/// Application configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory of guidance JSON files; the built-in data set is used when unset
    #[serde(default)]
    pub guidance_dir: Option<PathBuf>,

    /// Pointer interaction tunables
    #[serde(default)]
    pub interaction: InteractionSettings,

    /// Canvas size assumed while no image is loaded
    #[serde(default = "default_fallback_canvas")]
    pub fallback_canvas: ImageSize,

    /// Detected-room dot radius as a fraction of the smaller image side
    #[serde(default = "default_room_marker_radius_fraction")]
    pub room_marker_radius_fraction: f64,
}

fn default_fallback_canvas() -> ImageSize {
    ImageSize::new(constants::FALLBACK_CANVAS_WIDTH, constants::FALLBACK_CANVAS_HEIGHT)
}

fn default_room_marker_radius_fraction() -> f64 {
    constants::ROOM_MARKER_RADIUS_FRACTION
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            guidance_dir: None,
            interaction: InteractionSettings::default(),
            fallback_canvas: default_fallback_canvas(),
            room_marker_radius_fraction: default_room_marker_radius_fraction(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "vastu-config.json"
    }

    /// Get the default config file path for auto-load/save.
    /// Not available on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("vastu").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("vastu")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let mut config = AppConfig::new();
        config.log_level = LogLevel::Debug;
        config.guidance_dir = Some(PathBuf::from("/opt/vastu/guidance"));
        config.interaction.handle_size = 8;

        let json = config.to_json().expect("Failed to serialize");
        let loaded = AppConfig::from_json(&json).expect("Failed to deserialize");

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.guidance_dir, None);
        assert_eq!(config.interaction.handle_size, 12);
        assert_eq!(config.interaction.min_size(), MinSize { w: 40, h: 30 });
        assert_eq!(config.interaction.default_area_fraction, [0.15, 0.12]);
        assert_eq!(config.interaction.default_area_min, [80, 60]);
        assert_eq!(config.fallback_canvas, ImageSize::new(800, 600));
        assert_eq!(config.room_marker_radius_fraction, 0.04);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{"version": 1, "interaction": {"handle_size": 6}}"#;
        let config = AppConfig::from_json(json).expect("Failed to deserialize");
        assert_eq!(config.interaction.handle_size, 6);
        assert_eq!(config.interaction.min_area_width, 40);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.fallback_canvas, ImageSize::new(800, 600));
    }

    #[test]
    fn test_version_too_new() {
        let json = r#"{"version": 999}"#;
        let result = AppConfig::from_json(json);
        assert!(matches!(
            result,
            Err(ConfigError::VersionTooNew {
                file_version: 999,
                ..
            })
        ));
    }

    #[test]
    fn test_log_level_serialization() {
        for level in LogLevel::all() {
            let json = serde_json::to_string(level).expect("Failed to serialize");
            let loaded: LogLevel = serde_json::from_str(&json).expect("Failed to deserialize");
            assert_eq!(*level, loaded);
        }
        assert_eq!(
            serde_json::to_string(&LogLevel::Warn).expect("Failed to serialize"),
            "\"warn\""
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("vastu-config-test-{}", std::process::id()));
        let path = dir.join("nested").join(AppConfig::default_filename());

        let mut config = AppConfig::new();
        config.log_level = LogLevel::Trace;
        config.save(&path).expect("Failed to save");

        let loaded = AppConfig::load(&path).expect("Failed to load");
        assert_eq!(loaded.log_level, LogLevel::Trace);

        std::fs::remove_dir_all(&dir).ok();
    }
}
