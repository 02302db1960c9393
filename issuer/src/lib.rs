// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # IMDS Issuer
//!
//! Credential issuance for the instance metadata service emulator.
//!
//! A [`CredentialIssuer`] owns one RSA key pair and its certificate and
//! produces:
//!
//! - **Access tokens**: RS256 compact tokens with a one-hour lifetime,
//!   wrapped in the token endpoint response ([`token`])
//! - **Attested data**: a detached PKCS#7 signature over a small identity
//!   document ([`attestation`], [`pkcs7`])
//! - **Key discovery**: a JWK set with the public key only ([`jwks`])
//!
//! ## Modules
//!
//! - [`constants`]: fixed values of the emulated contract
//! - [`errors`]: the [`IssuerError`] type
//! - [`keys`]: PEM loading, signing and thumbprints
//! - [`models`]: serializable request and response types
//! - [`staging`]: scoped, zeroizing buffers for signing artifacts
//!
//! ## Security Considerations
//!
//! - The private key is never serialized or logged
//! - Staged signing buffers are zeroized and released on every exit path

pub mod attestation;
pub mod constants;
pub mod errors;
pub mod issuer;
pub mod jwks;
pub mod keys;
pub mod models;
pub mod pkcs7;
pub mod staging;
pub mod token;
pub mod utils;

pub use errors::IssuerError;
pub use issuer::CredentialIssuer;
pub use keys::KeyMaterial;
pub use token::TokenSettings;
