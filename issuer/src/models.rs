// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub aud: String,
    pub iss: String,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
    pub appid: String,
    pub appidacr: String,
    pub idp: String,
    pub oid: String,
    pub sub: String,
    pub ver: String,
}

/// Body of `GET /metadata/identity/oauth2/token`.
///
/// `not_before` carries the expiry time, not the issue time. Relying parties
/// of the emulated service expect that value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub client_id: String,
    pub expires_in: String,
    pub expires_on: i64,
    pub ext_expires_in: String,
    pub not_before: i64,
    pub resource: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub product: String,
    pub publisher: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStamp {
    pub created_on: String,
    pub expires_on: String,
}

/// The document signed by `GET /metadata/attested`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationDocument {
    pub nonce: String,
    pub plan: Plan,
    pub time_stamp: TimeStamp,
    pub vm_id: String,
    pub subscription_id: String,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestedResponse {
    pub encoding: String,
    /// Base64 DER of a detached PKCS#7 `SignedData`.
    pub signature: String,
}

/// Public RSA signing key in JWK form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub kid: String,
    pub x5t: String,
    /// Modulus, base64url.
    pub n: String,
    /// Public exponent, base64url.
    pub e: String,
    /// Certificate chain, standard base64 DER.
    pub x5c: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}
