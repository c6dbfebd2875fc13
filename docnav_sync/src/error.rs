// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for the fallible edges of the engine: configuration and snapshot loading.
//!
//! Navigation itself never fails; lookup misses are silent no-ops.

use std::path::PathBuf;

/// Error loading configuration or a document snapshot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read a file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Configuration is not valid TOML or has unexpected fields.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Document snapshot is not valid JSON or does not match the render contract.
    #[error("invalid document snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    /// A configuration value is out of range.
    #[error("invalid configuration value: {0}")]
    InvalidConfig(String),
}

/// Result alias for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
