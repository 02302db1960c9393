// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Attested data: a small identity document signed as detached PKCS#7.

use chrono::{DateTime, TimeDelta, Utc};

use crate::constants::{
    ATTESTATION_ENCODING, NONCE_FORMAT, SUBSCRIPTION_PLACEHOLDER, TIMESTAMP_FORMAT,
    TOKEN_LIFETIME_SECS,
};
use crate::errors::IssuerError;
use crate::keys::KeyMaterial;
use crate::models::{AttestationDocument, AttestedResponse, Plan, TimeStamp};
use crate::pkcs7;
use crate::staging::StagingArea;
use crate::utils::base64_encode;

impl AttestationDocument {
    /// Document for a caller identified as `vm_id`, valid for one hour from `now`.
    pub fn new(now: DateTime<Utc>, vm_id: &str) -> Self {
        let expires = now + TimeDelta::seconds(TOKEN_LIFETIME_SECS);
        Self {
            nonce: now.format(NONCE_FORMAT).to_string(),
            plan: Plan::default(),
            time_stamp: TimeStamp {
                created_on: now.format(TIMESTAMP_FORMAT).to_string(),
                expires_on: expires.format(TIMESTAMP_FORMAT).to_string(),
            },
            vm_id: vm_id.to_string(),
            subscription_id: SUBSCRIPTION_PLACEHOLDER.to_string(),
            sku: String::new(),
        }
    }
}

/// Builds and signs the attestation document for `vm_id`.
///
/// The serialized document and the envelope are staged in `staging` and
/// released before this returns, whether signing succeeds or not.
pub fn sign_attestation(
    keys: &KeyMaterial,
    staging: &StagingArea,
    now: DateTime<Utc>,
    vm_id: &str,
) -> Result<AttestedResponse, IssuerError> {
    let document = AttestationDocument::new(now, vm_id);

    let content = staging.stage(serde_json::to_vec(&document)?);
    let envelope = staging.stage(pkcs7::sign_detached(keys, &content, now)?);

    if envelope.is_empty() {
        return Err(IssuerError::Signing("Empty Signature".to_string()));
    }

    tracing::debug!(
        "[imds] signed attestation for {} ({} byte envelope)",
        document.vm_id,
        envelope.len()
    );

    Ok(AttestedResponse {
        encoding: ATTESTATION_ENCODING.to_string(),
        signature: base64_encode(&envelope),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::keys::fixtures;
    use data_encoding::BASE64;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_document_fields() {
        let document = AttestationDocument::new(at(1_700_000_000), "vm1.internal");
        assert_eq!(document.nonce, "20231114-221320");
        assert_eq!(document.time_stamp.created_on, "14/11/23 22:13:20 +0000");
        assert_eq!(document.time_stamp.expires_on, "14/11/23 23:13:20 +0000");
        assert_eq!(document.vm_id, "vm1.internal");
        assert_eq!(document.subscription_id, SUBSCRIPTION_PLACEHOLDER);
        assert_eq!(document.plan, Plan::default());
        assert!(document.sku.is_empty());
    }

    #[test]
    fn test_sign_attestation() {
        let keys = fixtures::key_material();
        let staging = StagingArea::new();
        let response = sign_attestation(&keys, &staging, at(1_700_000_000), "vm1").unwrap();

        assert_eq!(response.encoding, "pkcs7");
        let envelope = BASE64.decode(response.signature.as_bytes()).unwrap();
        assert_eq!(envelope[0], 0x30);
        assert_eq!(staging.live(), 0);
    }

    #[test]
    fn test_sign_attestation_deterministic_for_fixed_inputs() {
        let keys = fixtures::key_material();
        let staging = StagingArea::new();
        let first = sign_attestation(&keys, &staging, at(1_700_000_000), "vm1").unwrap();
        let second = sign_attestation(&keys, &staging, at(1_700_000_000), "vm1").unwrap();
        let later = sign_attestation(&keys, &staging, at(1_700_000_001), "vm1").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, later);
    }

    #[test]
    fn test_sign_attestation_verifies_against_certificate() {
        let keys = fixtures::key_material();
        let staging = StagingArea::new();
        let now = at(1_700_000_000);
        let response = sign_attestation(&keys, &staging, now, "vm1").unwrap();
        let envelope = BASE64.decode(response.signature.as_bytes()).unwrap();

        let content = serde_json::to_vec(&AttestationDocument::new(now, "vm1")).unwrap();
        let content_digest = aws_lc_rs::digest::digest(&aws_lc_rs::digest::SHA256, &content);
        let signed_attrs = pkcs7::signed_attributes(content_digest.as_ref(), now);
        assert!(keys.verify(&signed_attrs, &envelope[envelope.len() - 256..]));
    }

    #[test]
    fn test_sign_attestation_failure_releases_staging() {
        let keys = fixtures::mismatched_key_material();
        let staging = StagingArea::new();
        let result = sign_attestation(&keys, &staging, at(1_700_000_000), "vm1");

        assert!(matches!(result, Err(IssuerError::Signing(_))));
        assert_eq!(staging.live(), 0);
    }
}
