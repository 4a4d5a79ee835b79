// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::Path;

use chrono::Duration;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CourierError, Result};

/// Default file name looked up by the `courier` binary.
pub const DEFAULT_CONFIG_FILE: &str = "courier.json";

/// Persistent pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Document formats accepted by validation.
    pub allowed_formats: Vec<String>,
    /// Documents created strictly more than this many days before "now" are
    /// rejected.
    pub max_age_days: u32,
    /// Upper bound on files processed at the same time by `send_all`.
    pub max_parallel_files: usize,
    /// Log per-file progress at info level instead of debug.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_formats: vec!["4.0".to_owned(), "3.1".to_owned()],
            max_age_days: 30,
            max_parallel_files: 4,
            verbose: false,
        }
    }
}

impl PipelineConfig {
    /// Load settings from a JSON file.
    ///
    /// A missing file is not an error: the defaults are used and the fact is
    /// logged. A file that exists but cannot be read or parsed is reported as
    /// [`CourierError::Config`] naming the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "settings file missing, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            CourierError::Config(format!("cannot read settings file {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            CourierError::Config(format!("cannot parse settings file {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), ?config, "settings loaded");
        Ok(config)
    }

    /// The business rules validation applies.
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            allowed_formats: self.allowed_formats.clone(),
            max_age: Duration::days(i64::from(self.max_age_days)),
        }
    }

    /// Worker count for batches, never zero.
    pub fn parallelism(&self) -> usize {
        self.max_parallel_files.max(1)
    }
}

/// Format allow-list plus the maximum submission age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allowed_formats: Vec<String>,
    pub max_age: Duration,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        PipelineConfig::default().validation_policy()
    }
}

impl ValidationPolicy {
    pub fn max_age_days(&self) -> u32 {
        u32::try_from(self.max_age.num_days()).unwrap_or(u32::MAX)
    }
}
