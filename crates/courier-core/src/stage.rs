// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline stages and the result extension that tags failures with the stage
// they came from.

use std::fmt;

use crate::error::{CourierError, Result};
use crate::types::{Outcome, RawFile};

/// The four stages every file passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Recognize,
    Validate,
    Sign,
    Send,
}

impl Stage {
    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recognize => "recognize",
            Self::Validate => "validate",
            Self::Sign => "sign",
            Self::Send => "send",
        }
    }

    /// The stage an error belongs to. Defects and batch-level errors belong
    /// to no single stage.
    pub fn of(err: &CourierError) -> Option<Self> {
        match err {
            CourierError::Recognition(_) => Some(Self::Recognize),
            CourierError::Validation(_) => Some(Self::Validate),
            CourierError::Signing(_) | CourierError::Credential(_) => Some(Self::Sign),
            CourierError::Delivery(_) => Some(Self::Send),
            _ => None,
        }
    }

    /// Re-tag an error coming out of this stage so the outcome message says
    /// which stage failed. Errors that already belong to the stage pass
    /// through verbatim.
    pub fn refine(self, err: CourierError) -> CourierError {
        match (self, err) {
            (Self::Recognize, err @ CourierError::Recognition(_)) => err,
            (Self::Recognize, other) => CourierError::Recognition(other.to_string()),
            (Self::Validate, err) => err,
            (Self::Sign, err @ (CourierError::Signing(_) | CourierError::Credential(_))) => err,
            (Self::Sign, other) => CourierError::Signing(other.to_string()),
            (Self::Send, err @ CourierError::Delivery(_)) => err,
            (Self::Send, other) => CourierError::Delivery(other.to_string()),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Railway helpers on top of `Result`.
///
/// `and_then` / `?` already skip every later step once a failure appears;
/// these add stage tagging and the final conversion into an [`Outcome`].
pub trait ResultExt<T> {
    /// Tag a failure with `stage`, leaving success untouched.
    fn at_stage(self, stage: Stage) -> Result<T>;

    /// Finish the chain for `file`: success drops the value, failure keeps
    /// the rendered message.
    fn into_outcome(self, file: RawFile) -> Outcome;
}

impl<T> ResultExt<T> for Result<T> {
    fn at_stage(self, stage: Stage) -> Result<T> {
        self.map_err(|err| stage.refine(err))
    }

    fn into_outcome(self, file: RawFile) -> Outcome {
        match self {
            Ok(_) => Outcome::success(file),
            Err(err) => Outcome::failure(file, err.to_string()),
        }
    }
}
