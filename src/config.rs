//! Configuration - Navigation tuning values
//!
//! The constants the navigation layer consumes but does not own: the default
//! route, the fixed scroll offset under the sticky header, the activation
//! lookahead, the top-of-page threshold and the layout settle delay.
//!
//! The lookahead, threshold and settle delay are empirical tuning values.
//! They are plain configuration here with no derivation behind the defaults.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::AppConfig;
//!
//! let config = AppConfig::from_toml_str(r#"
//!     [navigation]
//!     default_route = "download"
//!     offset_top = 80.0
//! "#)?;
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::types::Route;

// =============================================================================
// SECTIONS
// =============================================================================

/// Router and tracker settings (`[navigation]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Route used whenever the URL fragment is empty.
    pub default_route: Route,
    /// Pixels between the viewport top and a section top after scrolling to it.
    pub offset_top: f64,
    /// Added to the scroll offset before looking up the containing section.
    pub activation_lookahead: f64,
    /// Scroll offsets below this force the default route.
    pub top_threshold: f64,
    /// Delay before the first section measurement.
    pub settle_delay_ms: u64,
}

impl NavigationConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_route: Route::from_literal("download"),
            offset_top: 80.0,
            activation_lookahead: 150.0,
            top_threshold: 100.0,
            settle_delay_ms: 100,
        }
    }
}

/// Scroll-driven visibility thresholds (`[animation]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub back_to_top_threshold: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            back_to_top_threshold: 300.0,
        }
    }
}

/// Element identifiers (`[selectors]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub back_to_top: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            back_to_top: "back-to-top".to_string(),
        }
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// Complete configuration for a mounted navigation layer.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub navigation: NavigationConfig,
    pub animation: AnimationConfig,
    pub selectors: Selectors,
}

impl AppConfig {
    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_toml_str(&input)
    }

    /// Reject negative or non-finite pixel values.
    pub fn validate(&self) -> Result<()> {
        let pixels = [
            ("navigation.offset_top", self.navigation.offset_top),
            (
                "navigation.activation_lookahead",
                self.navigation.activation_lookahead,
            ),
            ("navigation.top_threshold", self.navigation.top_threshold),
            (
                "animation.back_to_top_threshold",
                self.animation.back_to_top_threshold,
            ),
        ];
        for (field, value) in pixels {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }
}
