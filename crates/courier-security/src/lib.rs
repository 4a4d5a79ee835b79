// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// courier-security: host-side signing for the Courier pipeline.
//
// Provides ECDSA P-256 signing credentials, a `ring`-backed implementation of
// the pipeline's `Cryptographer` capability, verification of signed
// envelopes, and SHA-256 content fingerprints.

pub mod credentials;
pub mod integrity;
pub mod signer;

pub use credentials::{generate_credential, load_credential, public_key};
pub use integrity::{fingerprint, verify_fingerprint};
pub use signer::{EcdsaCryptographer, verify_signed};
