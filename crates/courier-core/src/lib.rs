// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Courier: Core types, errors, configuration and clock shared across all crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod stage;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PipelineConfig, ValidationPolicy};
pub use error::{CourierError, Result, Staleness, ValidationFailure};
pub use stage::{ResultExt, Stage};
pub use types::*;
