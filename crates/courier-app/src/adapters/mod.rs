// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host implementations of the pipeline's recognition and delivery
// capabilities.

pub mod outbox;
pub mod recognizer;

pub use outbox::OutboxSender;
pub use recognizer::HeaderRecognizer;
