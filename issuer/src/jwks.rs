// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use crate::constants::{JWK_ALG_RS256, JWK_KTY_RSA, JWK_USE_SIG};
use crate::keys::KeyMaterial;
use crate::models::{Jwk, JwkSet};
use crate::utils::{base64_encode, base64url_encode};

/// Public JWK for the signing certificate. Carries no private component.
pub fn public_jwk(keys: &KeyMaterial) -> Jwk {
    Jwk {
        kty: JWK_KTY_RSA.to_string(),
        key_use: JWK_USE_SIG.to_string(),
        alg: JWK_ALG_RS256.to_string(),
        kid: keys.thumbprint().to_string(),
        x5t: keys.thumbprint().to_string(),
        n: base64url_encode(keys.modulus()),
        e: base64url_encode(keys.exponent()),
        x5c: vec![base64_encode(keys.certificate())],
    }
}

pub fn key_set(keys: &KeyMaterial) -> JwkSet {
    JwkSet {
        keys: vec![public_jwk(keys)],
    }
}
