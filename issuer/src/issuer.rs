// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use chrono::{DateTime, Utc};

use crate::attestation;
use crate::errors::IssuerError;
use crate::jwks;
use crate::keys::KeyMaterial;
use crate::models::{AttestedResponse, JwkSet, TokenResponse};
use crate::staging::StagingArea;
use crate::token::{self, TokenSettings};

/// Issues tokens and attestations for a single key pair.
///
/// Holds no per-request state. Share it behind an `Arc`.
#[derive(Debug)]
pub struct CredentialIssuer {
    keys: KeyMaterial,
    settings: TokenSettings,
    staging: StagingArea,
}

impl CredentialIssuer {
    pub fn new(keys: KeyMaterial, settings: TokenSettings) -> Self {
        Self {
            keys,
            settings,
            staging: StagingArea::new(),
        }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    #[tracing::instrument(skip(self))]
    pub fn mint_token(&self, now: DateTime<Utc>) -> Result<TokenResponse, IssuerError> {
        let response = token::mint_token(&self.keys, &self.settings, now)?;
        tracing::debug!(
            "[imds] minted token for {}, expires_on: {}",
            response.client_id,
            response.expires_on
        );
        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub fn sign_attestation(
        &self,
        now: DateTime<Utc>,
        vm_id: &str,
    ) -> Result<AttestedResponse, IssuerError> {
        attestation::sign_attestation(&self.keys, &self.staging, now, vm_id)
    }

    pub fn jwks(&self) -> JwkSet {
        jwks::key_set(&self.keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::keys::fixtures;

    #[test]
    fn test_token_kid_matches_jwks_kid() {
        let issuer = CredentialIssuer::new(fixtures::key_material(), TokenSettings::default());
        let response = issuer.mint_token(Utc::now()).unwrap();
        let jwks = issuer.jwks();

        let header = jsonwebtoken::decode_header(&response.access_token).unwrap();
        assert_eq!(header.kid.as_deref(), Some(jwks.keys[0].kid.as_str()));
    }

    #[test]
    fn test_failed_attestation_leaves_nothing_staged() {
        let issuer = CredentialIssuer::new(
            fixtures::mismatched_key_material(),
            TokenSettings::default(),
        );
        assert!(issuer.sign_attestation(Utc::now(), "vm1").is_err());
        assert_eq!(issuer.staging().live(), 0);
    }
}
