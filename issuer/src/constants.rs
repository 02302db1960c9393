// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

/// Lifetime of access tokens and attestation documents, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Reported verbatim in `expires_in` and `ext_expires_in`.
pub const TOKEN_LIFETIME: &str = "3600";
pub const TOKEN_VERSION: &str = "1.0";
pub const TOKEN_TYPE: &str = "Bearer";
pub const TOKEN_TYP: &str = "JWT";
/// Client authentication method reference: certificate.
pub const APPIDACR: &str = "2";

pub const JWK_ALG_RS256: &str = "RS256";
pub const JWK_KTY_RSA: &str = "RSA";
pub const JWK_USE_SIG: &str = "sig";

pub const ATTESTATION_ENCODING: &str = "pkcs7";
pub const SUBSCRIPTION_PLACEHOLDER: &str = "xxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxx";

// chrono format strings
pub const NONCE_FORMAT: &str = "%Y%m%d-%H%M%S";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%y %H:%M:%S %z";
pub const UTC_TIME_FORMAT: &str = "%y%m%d%H%M%SZ";
pub const GENERALIZED_TIME_FORMAT: &str = "%Y%m%d%H%M%SZ";

pub const DEFAULT_RESOURCE: &str = "https://management.local/";
pub const DEFAULT_CLIENT_ID: &str = "00000000-0000-0000-0000-000000000000";
