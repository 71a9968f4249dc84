//! Configuration system
//!
//! All recognized viewer options, with file loading for TOML and RON.
//! Values are validated once, at controller construction; after that the
//! configuration is read-only.

use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Pointer interaction options
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Whether pointer interaction moves the camera at all
    pub enabled: bool,

    /// Allow panning the look target
    pub pan: bool,

    /// Allow zooming the framing distance
    pub zoom: bool,
}

impl Default for InteractionConfig {
    /// Interaction off: presentation embeds drive the camera themselves
    fn default() -> Self {
        Self {
            enabled: false,
            pan: true,
            zoom: true,
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Multiplicative slack around the minimal framing distance (> 1
    /// leaves breathing room around the object)
    pub fit_margin: f32,

    /// Object spin rate in radians per second
    pub spin_rate: f32,

    /// Upper bound applied to the device pixel ratio
    pub pixel_ratio_cap: f32,

    /// Fraction of visible region area below which rendering is suspended
    pub visibility_threshold: f32,

    /// Pointer interaction options
    pub interaction: InteractionConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            fit_margin: 1.28,
            spin_rate: 0.1,
            pixel_ratio_cap: 2.0,
            visibility_threshold: 0.1,
            interaction: InteractionConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Validate the configuration
    ///
    /// Rejects values the viewer cannot operate with. A fit margin at or
    /// below 1 is allowed but logged, since it leaves no breathing room.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be inside (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.fit_margin > 0.0) || !self.fit_margin.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "fit_margin must be positive, got {}",
                self.fit_margin
            )));
        }
        if self.fit_margin <= 1.0 {
            log::warn!(
                "fit_margin {} leaves no breathing room around the object",
                self.fit_margin
            );
        }
        if !self.spin_rate.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "spin_rate must be finite, got {}",
                self.spin_rate
            )));
        }
        if !(self.pixel_ratio_cap >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "pixel_ratio_cap must be at least 1, got {}",
                self.pixel_ratio_cap
            )));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::Invalid(format!(
                "visibility_threshold must be inside [0, 1], got {}",
                self.visibility_threshold
            )));
        }
        Ok(())
    }
}

impl Config for ViewerConfig {}
