// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signing credentials: ECDSA P-256 keys stored as PKCS#8 v1 DER inside an
// opaque `SigningCredential`.
//
// The pipeline treats credentials as opaque handles. Only this crate knows
// that the material is a PKCS#8 document.

use courier_core::error::{CourierError, Result};
use courier_core::types::SigningCredential;
use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_ASN1_SIGNING, EcdsaKeyPair, KeyPair};
use tracing::{debug, instrument};

/// Generate a fresh ECDSA P-256 key using the OS CSPRNG.
#[instrument]
pub fn generate_credential(label: &str) -> Result<SigningCredential> {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
        .map_err(|e| CourierError::Credential(format!("key generation failed: {e}")))?;

    debug!(pkcs8_len = pkcs8.as_ref().len(), "ECDSA P-256 key generated");
    Ok(SigningCredential::new(label, pkcs8.as_ref().to_vec()))
}

/// Wrap existing PKCS#8 DER bytes, rejecting anything `ring` cannot parse.
pub fn load_credential(label: &str, pkcs8_der: Vec<u8>) -> Result<SigningCredential> {
    let credential = SigningCredential::new(label, pkcs8_der);
    key_pair(&credential, &SystemRandom::new())?;
    Ok(credential)
}

/// The uncompressed SEC1 public key (65 bytes for P-256) matching
/// `credential`, for verifying signed envelopes.
pub fn public_key(credential: &SigningCredential) -> Result<Vec<u8>> {
    let pair = key_pair(credential, &SystemRandom::new())?;
    Ok(pair.public_key().as_ref().to_vec())
}

pub(crate) fn key_pair(credential: &SigningCredential, rng: &SystemRandom) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, credential.material(), rng)
        .map_err(|e| {
            CourierError::Credential(format!("{} is not a P-256 PKCS#8 key: {e}", credential.label()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_has_p256_public_key() {
        let cred = generate_credential("ops").expect("key generation failed");
        assert_eq!(cred.label(), "ops");
        // PKCS#8 for P-256 is typically ~138 bytes.
        assert!(cred.material().len() > 100, "PKCS#8 DER looks too short");

        let public = public_key(&cred).unwrap();
        assert_eq!(public.len(), 65);
        assert_eq!(public[0], 0x04, "must be uncompressed point");
    }

    #[test]
    fn load_accepts_generated_material() {
        let generated = generate_credential("a").unwrap();
        let loaded = load_credential("b", generated.material().to_vec()).unwrap();
        assert_eq!(public_key(&generated).unwrap(), public_key(&loaded).unwrap());
    }

    #[test]
    fn load_rejects_garbage() {
        let err = load_credential("junk", b"not a key".to_vec()).unwrap_err();
        assert!(matches!(err, CourierError::Credential(_)));
        assert!(err.to_string().contains("junk"), "{err}");
    }

    #[test]
    fn different_keys_each_time() {
        let a = generate_credential("a").unwrap();
        let b = generate_credential("b").unwrap();
        assert_ne!(a.material(), b.material());
    }
}
