//! Interaction configuration
//!
//! Tunables for gesture mapping, the placed asset and the status indicator.
//! Every field has a default, so a config file only needs the values it
//! overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which asset gets placed on tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Scene path understood by the asset source
    pub path: String,
    /// Node name searched recursively inside that scene
    pub node: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            path: "art.scnassets/chair.dae".to_string(),
            node: "chairNode".to_string(),
        }
    }
}

/// Status indicator labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub detecting: String,
    pub detected: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            detecting: "Detecting plane...".to_string(),
            detected: "Plane detected".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArConfig {
    /// Degrees of yaw per pixel of horizontal pan
    pub rotation_degrees_per_pixel: f32,
    /// Pixels per world unit for long-press drags (K)
    pub translation_scale: f32,
    /// Seconds the "plane detected" status stays visible
    pub status_hide_delay_secs: f32,
    pub asset: AssetConfig,
    pub status: StatusConfig,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            rotation_degrees_per_pixel: 1.0,
            translation_scale: 700.0,
            status_hide_delay_secs: 1.0,
            asset: AssetConfig::default(),
            status: StatusConfig::default(),
        }
    }
}

impl ArConfig {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("furniture-ar").join("config.toml"))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ArConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from the default location, or defaults if no file exists there
    pub fn load_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the gesture handlers cannot use
    pub fn validate(&self) -> Result<()> {
        if !self.rotation_degrees_per_pixel.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "rotation_degrees_per_pixel must be finite, got {}",
                self.rotation_degrees_per_pixel
            )));
        }
        if !self.translation_scale.is_finite() || self.translation_scale <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "translation_scale must be positive, got {}",
                self.translation_scale
            )));
        }
        if !self.status_hide_delay_secs.is_finite() || self.status_hide_delay_secs < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "status_hide_delay_secs must be non-negative, got {}",
                self.status_hide_delay_secs
            )));
        }
        if self.asset.node.is_empty() {
            return Err(Error::InvalidConfig("asset.node must not be empty".to_string()));
        }
        Ok(())
    }

    /// Radians of yaw per pixel of horizontal pan
    pub fn radians_per_pixel(&self) -> f32 {
        self.rotation_degrees_per_pixel * (std::f32::consts::PI / 180.0)
    }

    /// Hide delay; unusable values collapse to zero
    pub fn status_hide_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.status_hide_delay_secs).unwrap_or(Duration::ZERO)
    }
}
