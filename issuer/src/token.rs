// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! RS256 access token minting.
//!
//! Tokens are compact JWS values signed with RSASSA-PKCS1-v1_5/SHA-256. The
//! header carries the key thumbprint as both `kid` and `x5t`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header};

use crate::constants::{
    APPIDACR, DEFAULT_CLIENT_ID, DEFAULT_RESOURCE, TOKEN_LIFETIME, TOKEN_LIFETIME_SECS,
    TOKEN_TYP, TOKEN_TYPE, TOKEN_VERSION,
};
use crate::errors::IssuerError;
use crate::keys::KeyMaterial;
use crate::models::{TokenClaims, TokenResponse};

/// Identity values stamped into every token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSettings {
    /// Audience, issuer and identity provider URL.
    pub resource: String,
    /// Application id reported as `appid`, `oid`, `sub` and `client_id`.
    pub client_id: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        TokenSettings {
            resource: DEFAULT_RESOURCE.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

impl TokenClaims {
    /// Claims for a token issued at `now` (seconds since the Unix epoch).
    pub fn new(settings: &TokenSettings, now: i64) -> Self {
        Self {
            aud: settings.resource.clone(),
            iss: settings.resource.clone(),
            nbf: now,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
            appid: settings.client_id.clone(),
            appidacr: APPIDACR.to_string(),
            idp: settings.resource.clone(),
            oid: settings.client_id.clone(),
            sub: settings.client_id.clone(),
            ver: TOKEN_VERSION.to_string(),
        }
    }
}

/// RS256 header naming the signing key by thumbprint.
pub fn token_header(keys: &KeyMaterial) -> Header {
    let mut header = Header::new(Algorithm::RS256);
    header.typ = Some(TOKEN_TYP.to_string());
    header.kid = Some(keys.thumbprint().to_string());
    header.x5t = Some(keys.thumbprint().to_string());
    header
}

/// Serializes and signs `claims`, returning the compact token.
pub fn sign_token(keys: &KeyMaterial, claims: &TokenClaims) -> Result<String, IssuerError> {
    jsonwebtoken::encode(&token_header(keys), claims, keys.encoding_key())
        .map_err(|err| IssuerError::Signing(format!("token signing failed: {err}")))
}

/// Mints a one-hour bearer token and wraps it in the token endpoint response.
pub fn mint_token(
    keys: &KeyMaterial,
    settings: &TokenSettings,
    now: DateTime<Utc>,
) -> Result<TokenResponse, IssuerError> {
    let claims = TokenClaims::new(settings, now.timestamp());
    let access_token = sign_token(keys, &claims)?;

    Ok(TokenResponse {
        access_token,
        client_id: settings.client_id.clone(),
        expires_in: TOKEN_LIFETIME.to_string(),
        expires_on: claims.exp,
        ext_expires_in: TOKEN_LIFETIME.to_string(),
        not_before: claims.exp,
        resource: settings.resource.clone(),
        token_type: TOKEN_TYPE.to_string(),
    })
}
