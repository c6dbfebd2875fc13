// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! Parses an optional `docnav.toml` with serde. Every field has a default, so
//! an empty document (or no file at all) yields [`Config::default`].
//!
//! ```toml
//! language_param = "lang"
//!
//! [scroll]
//! near_top = -200.0
//! near_bottom = 100.0
//! top_snap = 30.0
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scroll-spy thresholds.
    pub scroll: ScrollThresholds,
    /// Query parameter that carries the selected snippet language.
    pub language_param: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll: ScrollThresholds::default(),
            language_param: "lang".to_owned(),
        }
    }
}

/// Heuristic scroll-spy thresholds, in content viewport units.
///
/// These are tuned empirically and not derived from the viewport height.
/// Tall or very short viewports may want different values.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollThresholds {
    /// A section whose top is at or above this line has been scrolled past.
    pub near_top: f64,
    /// A section whose top is at or above this line is being read.
    pub near_bottom: f64,
    /// Scroll offsets at or below this snap to the first section when scrolling up.
    pub top_snap: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            near_top: -200.0,
            near_bottom: 100.0,
            top_snap: 30.0,
        }
    }
}

impl ScrollThresholds {
    /// Check that values are finite and `near_top < near_bottom`.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.near_top, self.near_bottom, self.top_snap]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidConfig(
                "thresholds must be finite".to_owned(),
            ));
        }
        if self.near_top >= self.near_bottom {
            return Err(Error::InvalidConfig(format!(
                "near_top ({}) must be above near_bottom ({})",
                self.near_top, self.near_bottom
            )));
        }
        if self.top_snap < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "top_snap ({}) must not be negative",
                self.top_snap
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds and the language parameter name.
    pub fn validate(&self) -> Result<()> {
        self.scroll.validate()?;
        if self.language_param.is_empty() {
            return Err(Error::InvalidConfig(
                "language_param must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
