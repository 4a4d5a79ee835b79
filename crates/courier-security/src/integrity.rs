// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content fingerprints: SHA-256 digests used to identify documents in logs
// without printing their bytes.

use courier_core::error::CourierError;
use sha2::{Digest, Sha256};

/// SHA-256 of `data` as a lowercase hex string.
pub fn fingerprint(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check `data` against an expected hex digest.
///
/// A mismatch is reported as a delivery error: the outbox sender checks its
/// staged copy against the document's fingerprint before publishing it.
pub fn verify_fingerprint(data: &[u8], expected_hex: &str) -> Result<(), CourierError> {
    let actual = fingerprint(data);
    if actual.eq_ignore_ascii_case(expected_hex) {
        Ok(())
    } else {
        Err(CourierError::Delivery(format!(
            "fingerprint mismatch: expected {expected_hex}, got {actual}"
        )))
    }
}
