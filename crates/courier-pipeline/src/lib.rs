// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Courier Pipeline: recognises, validates, signs and sends documents through
// host-supplied capabilities, producing exactly one outcome per input file.

pub mod capabilities;
pub mod file_sender;
pub mod validation;

pub use capabilities::{Cryptographer, Recognizer, Sender};
pub use file_sender::FileSender;
