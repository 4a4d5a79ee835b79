// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ECDSA implementation of the pipeline's `Cryptographer` capability.
//
// Signed envelope layout:
//
//   content || signature (ASN.1 DER) || signature length (u16, big-endian)
//
// The trailer keeps the original bytes readable at the front of the file and
// lets `verify_signed` split the envelope without any other framing.

use courier_core::error::{CourierError, Result};
use courier_core::types::SigningCredential;
use courier_pipeline::Cryptographer;
use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_ASN1, UnparsedPublicKey};
use tracing::debug;

use crate::credentials::key_pair;
use crate::integrity::fingerprint;

const LEN_TRAILER: usize = 2;

/// Signs document content with an ECDSA P-256 credential.
pub struct EcdsaCryptographer {
    rng: SystemRandom,
}

impl EcdsaCryptographer {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for EcdsaCryptographer {
    fn default() -> Self {
        Self::new()
    }
}

impl Cryptographer for EcdsaCryptographer {
    fn sign(&self, content: &[u8], credential: &SigningCredential) -> Result<Vec<u8>> {
        let pair = key_pair(credential, &self.rng)?;
        let signature = pair
            .sign(&self.rng, content)
            .map_err(|e| CourierError::Signing(format!("ECDSA signing failed: {e}")))?;
        let signature = signature.as_ref();
        let sig_len = u16::try_from(signature.len())
            .map_err(|_| CourierError::Signing("signature too long for envelope".into()))?;

        let mut envelope = Vec::with_capacity(content.len() + signature.len() + LEN_TRAILER);
        envelope.extend_from_slice(content);
        envelope.extend_from_slice(signature);
        envelope.extend_from_slice(&sig_len.to_be_bytes());

        debug!(
            credential = credential.label(),
            content = %fingerprint(content),
            sig_len,
            "content signed"
        );
        Ok(envelope)
    }
}

/// Check a signed envelope against `public_key` and return the original
/// content.
pub fn verify_signed(public_key: &[u8], envelope: &[u8]) -> Result<Vec<u8>> {
    if envelope.len() < LEN_TRAILER {
        return Err(CourierError::Signing("envelope too short".into()));
    }
    let (body, trailer) = envelope.split_at(envelope.len() - LEN_TRAILER);
    let sig_len = usize::from(u16::from_be_bytes([trailer[0], trailer[1]]));
    if sig_len > body.len() {
        return Err(CourierError::Signing(format!(
            "envelope declares a {sig_len}-byte signature but holds {} bytes",
            body.len()
        )));
    }
    let (content, signature) = body.split_at(body.len() - sig_len);

    UnparsedPublicKey::new(&ECDSA_P256_SHA256_ASN1, public_key)
        .verify(content, signature)
        .map_err(|_| CourierError::Signing("signature verification failed".into()))?;
    Ok(content.to_vec())
}
