// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! RSA key material used by the credential issuer.
//!
//! A [`KeyMaterial`] pairs an RSA private key with the X.509 certificate that
//! carries its public half. Both are loaded once from PEM at startup. The
//! private key never leaves this module: callers get signatures and public
//! values (modulus, exponent, thumbprint, certificate) only.
//!
//! # Security
//!
//! - The PEM bytes read from disk are zeroized once parsed
//! - `Debug` output is redacted so the key cannot end up in logs

use std::fmt;
use std::path::Path;

use aws_lc_rs::digest::{self, SHA1_FOR_LEGACY_USE_ONLY};
use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_SHA256, RsaKeyPair, UnparsedPublicKey,
};
use jsonwebtoken::EncodingKey;
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use x509_cert::Certificate;
use x509_cert::der::{Decode, Encode};
use zeroize::Zeroizing;

use crate::constants::JWK_KTY_RSA;
use crate::errors::IssuerError;
use crate::utils::base64url_encode;

pub struct KeyMaterial {
    key_pair: RsaKeyPair,
    /// Same private key, in the form the token encoder takes.
    encoding_key: EncodingKey,
    /// DER encoded signer certificate.
    certificate: Vec<u8>,
    /// PKCS#1 `RSAPublicKey` taken from the certificate.
    public_key: Vec<u8>,
    modulus: Vec<u8>,
    exponent: Vec<u8>,
    /// DER encoded issuer `Name` and serial `INTEGER`, for PKCS#7 signer identification.
    issuer: Vec<u8>,
    serial_number: Vec<u8>,
    thumbprint: String,
}

// Custom Debug implementation to prevent accidental logging of sensitive data
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &"[REDACTED]")
            .field("thumbprint", &self.thumbprint)
            .finish()
    }
}

impl KeyMaterial {
    /// Reads the private key and certificate PEM files.
    pub fn load(key_path: &Path, certificate_path: &Path) -> Result<Self, IssuerError> {
        let key_pem = Zeroizing::new(std::fs::read(key_path).map_err(|err| {
            IssuerError::KeyMaterial(format!("unable to read {}: {err}", key_path.display()))
        })?);
        let certificate_pem = std::fs::read(certificate_path).map_err(|err| {
            IssuerError::KeyMaterial(format!(
                "unable to read {}: {err}",
                certificate_path.display()
            ))
        })?;

        let keys = Self::from_pem(&key_pem, &certificate_pem)?;

        tracing::info!(
            "[imds] loaded key material from {}, thumbprint: {}",
            key_path.display(),
            keys.thumbprint
        );

        Ok(keys)
    }

    /// Builds key material from a PKCS#8 or PKCS#1 RSA private key and an
    /// X.509 certificate, both PEM encoded.
    ///
    /// The key and certificate are not checked against each other here. A
    /// mismatch surfaces as a signing error when an attestation is signed.
    pub fn from_pem(key_pem: &[u8], certificate_pem: &[u8]) -> Result<Self, IssuerError> {
        let key = PrivateKeyDer::from_pem_slice(key_pem).map_err(|err| {
            IssuerError::KeyMaterial(format!("unable to read private key PEM: {err}"))
        })?;

        let key_pair = match &key {
            PrivateKeyDer::Pkcs8(der) => RsaKeyPair::from_pkcs8(der.secret_pkcs8_der()),
            PrivateKeyDer::Pkcs1(der) => RsaKeyPair::from_der(der.secret_pkcs1_der()),
            _ => {
                return Err(IssuerError::KeyMaterial(
                    "private key is not an RSA key".to_string(),
                ));
            }
        }
        .map_err(|err| {
            IssuerError::KeyMaterial(format!("unable to decode RSA private key: {err}"))
        })?;

        let encoding_key = EncodingKey::from_rsa_pem(key_pem).map_err(|err| {
            IssuerError::KeyMaterial(format!("unable to decode RSA private key: {err}"))
        })?;

        let certificate = CertificateDer::from_pem_slice(certificate_pem).map_err(|err| {
            IssuerError::KeyMaterial(format!("unable to read certificate PEM: {err}"))
        })?;
        let certificate = certificate.as_ref().to_vec();
        let parsed = Certificate::from_der(&certificate)?;

        let public_key = parsed
            .tbs_certificate
            .subject_public_key_info
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| {
                IssuerError::KeyMaterial("certificate has no public key bytes".to_string())
            })?
            .to_vec();

        let (modulus, exponent) = {
            let rsa = pkcs1::RsaPublicKey::from_der(&public_key).map_err(|err| {
                IssuerError::KeyMaterial(format!("certificate key is not RSA: {err}"))
            })?;
            (
                rsa.modulus.as_bytes().to_vec(),
                rsa.public_exponent.as_bytes().to_vec(),
            )
        };

        let issuer = parsed.tbs_certificate.issuer.to_der()?;
        let serial_number = parsed.tbs_certificate.serial_number.to_der()?;
        let thumbprint = jwk_thumbprint(&modulus, &exponent);

        Ok(Self {
            key_pair,
            encoding_key,
            certificate,
            public_key,
            modulus,
            exponent,
            issuer,
            serial_number,
            thumbprint,
        })
    }

    /// Signs `message` with RSASSA-PKCS1-v1_5 and SHA-256.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IssuerError> {
        let mut signature = vec![0u8; self.key_pair.public_modulus_len()];
        self.key_pair
            .sign(&RSA_PKCS1_SHA256, &SystemRandom::new(), message, &mut signature)
            .map_err(|err| IssuerError::Signing(format!("RSA signing failed: {err}")))?;
        Ok(signature)
    }

    /// Checks an RS256 signature against the certificate's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, &self.public_key)
            .verify(message, signature)
            .is_ok()
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// RFC 7638 SHA-1 thumbprint of the public key, base64url encoded.
    pub fn thumbprint(&self) -> &str {
        &self.thumbprint
    }

    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    pub fn issuer(&self) -> &[u8] {
        &self.issuer
    }

    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }
}

/// Computes the RFC 7638 thumbprint of an RSA public key using SHA-1.
///
/// The required members are hashed in lexicographic order with no whitespace.
pub fn jwk_thumbprint(modulus: &[u8], exponent: &[u8]) -> String {
    let canonical = format!(
        r#"{{"e":"{}","kty":"{}","n":"{}"}}"#,
        base64url_encode(exponent),
        JWK_KTY_RSA,
        base64url_encode(modulus)
    );
    let hash = digest::digest(&SHA1_FOR_LEGACY_USE_ONLY, canonical.as_bytes());
    base64url_encode(hash.as_ref())
}
