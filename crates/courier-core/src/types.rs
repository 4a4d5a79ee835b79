// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Courier submission pipeline.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one `send_all` batch, carried in its tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file exactly as the caller handed it over: a name and opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A recognised document.
///
/// `format` and `created` are fixed by recognition. The only way to obtain a
/// document with different content is [`Document::with_content`], which
/// derives a new value and leaves the other fields untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    content: Vec<u8>,
    created: DateTime<Utc>,
    format: String,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        created: DateTime<Utc>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            created,
            format: format.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Derive the same document carrying `content` (used for the signed
    /// variant).
    pub fn with_content(self, content: Vec<u8>) -> Self {
        Self { content, ..self }
    }
}

/// Opaque signing credential passed through to the cryptographer.
///
/// The pipeline never looks inside; cloning is cheap so one credential can be
/// shared by every file of a batch.
#[derive(Clone)]
pub struct SigningCredential {
    label: String,
    material: Arc<[u8]>,
}

impl SigningCredential {
    pub fn new(label: impl Into<String>, material: impl Into<Vec<u8>>) -> Self {
        let material: Vec<u8> = material.into();
        Self {
            label: label.into(),
            material: Arc::from(material),
        }
    }

    /// Human-readable name, safe to log.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Raw key material. Only signing implementations should read this.
    pub fn material(&self) -> &[u8] {
        &self.material
    }
}

// Key material must never end up in logs.
impl fmt::Debug for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredential")
            .field("label", &self.label)
            .field("material", &format_args!("<{} bytes>", self.material.len()))
            .finish()
    }
}

/// Per-file result of the pipeline: the original file plus, on failure, one
/// human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub file: RawFile,
    pub error: Option<String>,
}

impl Outcome {
    pub fn success(file: RawFile) -> Self {
        Self { file, error: None }
    }

    pub fn failure(file: RawFile, error: impl Into<String>) -> Self {
        Self {
            file,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
