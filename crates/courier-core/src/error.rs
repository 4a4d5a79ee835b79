// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Courier.

use std::fmt;

use thiserror::Error;

/// Top-level error type for all Courier operations.
#[derive(Debug, Error)]
pub enum CourierError {
    // -- Pipeline stages --
    #[error("cannot recognize file: {0}")]
    Recognition(String),

    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("cannot send document: {0}")]
    Delivery(String),

    #[error("invalid signing credential: {0}")]
    Credential(String),

    #[error("capability defect: {0}")]
    CapabilityDefect(String),

    // -- Host / orchestration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("batch orchestration failed: {0}")]
    Orchestration(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CourierError>;

/// How far past the allowed window a document was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staleness {
    /// Whole days between creation and the reference time.
    pub age_days: i64,
    /// The configured maximum age in days.
    pub max_age_days: u32,
}

/// Every business rule a recognised document broke.
///
/// Both rules are always evaluated, so a document can carry a format and a
/// staleness violation at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    /// The format value when it is not on the allow-list.
    pub unsupported_format: Option<String>,
    /// Set when the document is older than the window.
    pub stale: Option<Staleness>,
}

impl ValidationFailure {
    /// True when no rule was broken.
    pub fn is_empty(&self) -> bool {
        self.unsupported_format.is_none() && self.stale.is_none()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid document: ")?;
        let mut wrote = false;
        if let Some(format) = &self.unsupported_format {
            write!(f, "unsupported format '{format}'")?;
            wrote = true;
        }
        if let Some(stale) = &self.stale {
            if wrote {
                f.write_str("; ")?;
            }
            write!(
                f,
                "document is {} days old (maximum {} days)",
                stale.age_days, stale.max_age_days
            )?;
            wrote = true;
        }
        if !wrote {
            f.write_str("no rule violated")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_only_message() {
        let failure = ValidationFailure {
            unsupported_format: Some("1.0".into()),
            stale: None,
        };
        assert_eq!(
            CourierError::Validation(failure).to_string(),
            "invalid document: unsupported format '1.0'"
        );
    }

    #[test]
    fn combined_message_names_both_rules() {
        let failure = ValidationFailure {
            unsupported_format: Some("wrong".into()),
            stale: Some(Staleness {
                age_days: 32,
                max_age_days: 30,
            }),
        };
        let msg = failure.to_string();
        assert!(msg.contains("unsupported format 'wrong'"), "{msg}");
        assert!(msg.contains("32 days old (maximum 30 days)"), "{msg}");
    }

    #[test]
    fn stage_errors_have_distinct_prefixes() {
        assert_eq!(
            CourierError::Recognition("bad header".into()).to_string(),
            "cannot recognize file: bad header"
        );
        assert_eq!(
            CourierError::Delivery("outbox full".into()).to_string(),
            "cannot send document: outbox full"
        );
    }
}
