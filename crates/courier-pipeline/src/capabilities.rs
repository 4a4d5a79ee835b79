// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capabilities supplied by the host.
//
// The pipeline only ever sees these traits. Recognition, signing and delivery
// are implemented elsewhere (see `courier-security` and the `courier` binary)
// or by fakes in tests.

use courier_core::error::Result;
use courier_core::types::{Document, RawFile, SigningCredential};

/// Classify raw bytes into a typed document.
pub trait Recognizer: Send + Sync {
    /// Returns `CourierError::Recognition` when the content does not match any
    /// supported document shape.
    fn recognize(&self, file: &RawFile) -> Result<Document>;
}

/// Produce signed bytes for a document body.
pub trait Cryptographer: Send + Sync {
    /// Sign `content` with `credential`.
    ///
    /// Expected to succeed for any well-formed credential. An `Err` here is a
    /// defect of the signing capability and ends up verbatim in the file's
    /// outcome.
    fn sign(&self, content: &[u8], credential: &SigningCredential) -> Result<Vec<u8>>;
}

/// Deliver a fully prepared document.
pub trait Sender: Send + Sync {
    /// Returns `CourierError::Delivery` when the destination rejects the
    /// document or cannot be reached.
    fn send(&self, document: &Document) -> Result<()>;
}
