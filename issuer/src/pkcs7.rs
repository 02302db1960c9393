// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Detached PKCS#7 (CMS) `SignedData` assembly.
//!
//! Produces the same shape of envelope as an S/MIME detached signature:
//!
//! ```text
//! ContentInfo {
//!   contentType: id-signedData,
//!   content: SignedData {
//!     version: 1,
//!     digestAlgorithms: { SHA-256 },
//!     encapContentInfo: { id-data },          -- content omitted (detached)
//!     certificates: [0] { signer certificate },
//!     signerInfos: { SignerInfo {
//!       sid: IssuerAndSerialNumber,
//!       signedAttrs: [0] { contentType, signingTime, messageDigest },
//!       signatureAlgorithm: rsaEncryption,
//!       signature: RSASSA-PKCS1-v1_5(SHA-256, DER(signedAttrs))
//!     } }
//!   }
//! }
//! ```

use aws_lc_rs::digest::{self, SHA256};
use chrono::{DateTime, Datelike, Utc};

use crate::constants::{GENERALIZED_TIME_FORMAT, UTC_TIME_FORMAT};
use crate::errors::IssuerError;
use crate::keys::KeyMaterial;

// ASN.1 tags
const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_NULL: u8 = 0x05;
const TAG_OID: u8 = 0x06;
const TAG_UTC_TIME: u8 = 0x17;
const TAG_GENERALIZED_TIME: u8 = 0x18;
const TAG_SEQUENCE: u8 = 0x30;
const TAG_SET: u8 = 0x31;
const TAG_CONTEXT_0: u8 = 0xA0;

const OID_DATA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x07, 0x01]; // 1.2.840.113549.1.7.1
const OID_SIGNED_DATA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x07, 0x02]; // 1.2.840.113549.1.7.2
const OID_CONTENT_TYPE: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x03]; // 1.2.840.113549.1.9.3
const OID_MESSAGE_DIGEST: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x04]; // 1.2.840.113549.1.9.4
const OID_SIGNING_TIME: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x05]; // 1.2.840.113549.1.9.5
const OID_SHA256: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01]; // 2.16.840.1.101.3.4.2.1
const OID_RSA_ENCRYPTION: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01]; // 1.2.840.113549.1.1.1

/// Signs `content` and returns the DER `ContentInfo` of a detached `SignedData`.
///
/// The signature is checked against the certificate before the envelope is
/// assembled. A private key that does not belong to the certificate is a
/// signing error.
pub fn sign_detached(
    keys: &KeyMaterial,
    content: &[u8],
    signing_time: DateTime<Utc>,
) -> Result<Vec<u8>, IssuerError> {
    let content_digest = digest::digest(&SHA256, content);
    let signed_attrs = signed_attributes(content_digest.as_ref(), signing_time);

    let signature = keys.sign(&signed_attrs)?;
    if !keys.verify(&signed_attrs, &signature) {
        return Err(IssuerError::Signing(
            "private key does not match certificate".to_string(),
        ));
    }

    let signer_info = build_signer_info(keys, &signed_attrs, &signature);
    Ok(build_content_info(keys.certificate(), &signer_info))
}

/// DER `SET OF Attribute` covered by the signature.
///
/// DER orders a SET OF by encoding. The three attributes sort as
/// contentType, signingTime, messageDigest.
pub fn signed_attributes(content_digest: &[u8], signing_time: DateTime<Utc>) -> Vec<u8> {
    let mut oid_data = Vec::new();
    write_tag_length_value(&mut oid_data, TAG_OID, OID_DATA);

    let mut time = Vec::new();
    write_signing_time(&mut time, signing_time);

    let mut digest_value = Vec::new();
    write_tag_length_value(&mut digest_value, TAG_OCTET_STRING, content_digest);

    let mut attributes = Vec::new();
    attributes.extend_from_slice(&build_attribute(OID_CONTENT_TYPE, &oid_data));
    attributes.extend_from_slice(&build_attribute(OID_SIGNING_TIME, &time));
    attributes.extend_from_slice(&build_attribute(OID_MESSAGE_DIGEST, &digest_value));

    let mut result = Vec::new();
    write_tag_length_value(&mut result, TAG_SET, &attributes);
    result
}

/// UTCTime for 1950 through 2049, GeneralizedTime outside that range (RFC 5652 11.3).
fn write_signing_time(buf: &mut Vec<u8>, signing_time: DateTime<Utc>) {
    if (1950..2050).contains(&signing_time.year()) {
        let time = signing_time.format(UTC_TIME_FORMAT).to_string();
        write_tag_length_value(buf, TAG_UTC_TIME, time.as_bytes());
    } else {
        let time = signing_time.format(GENERALIZED_TIME_FORMAT).to_string();
        write_tag_length_value(buf, TAG_GENERALIZED_TIME, time.as_bytes());
    }
}

/// SEQUENCE { attrType OID, attrValues SET { value } }
fn build_attribute(oid: &[u8], value: &[u8]) -> Vec<u8> {
    let mut inner = Vec::new();
    write_tag_length_value(&mut inner, TAG_OID, oid);
    write_tag_length_value(&mut inner, TAG_SET, value);

    let mut result = Vec::new();
    write_tag_length_value(&mut result, TAG_SEQUENCE, &inner);
    result
}

fn build_algorithm_identifier(oid: &[u8]) -> Vec<u8> {
    let mut inner = Vec::new();
    write_tag_length_value(&mut inner, TAG_OID, oid);
    inner.extend_from_slice(&[TAG_NULL, 0x00]);

    let mut result = Vec::new();
    write_tag_length_value(&mut result, TAG_SEQUENCE, &inner);
    result
}

fn build_signer_info(keys: &KeyMaterial, signed_attrs: &[u8], signature: &[u8]) -> Vec<u8> {
    let mut inner = Vec::new();

    // version: 1 (sid is IssuerAndSerialNumber)
    write_tag_length_value(&mut inner, TAG_INTEGER, &[0x01]);

    let mut sid = Vec::new();
    sid.extend_from_slice(keys.issuer());
    sid.extend_from_slice(keys.serial_number());
    write_tag_length_value(&mut inner, TAG_SEQUENCE, &sid);

    inner.extend_from_slice(&build_algorithm_identifier(OID_SHA256));

    // signedAttrs [0] IMPLICIT: same content, SET tag replaced
    let mut retagged = signed_attrs.to_vec();
    if let Some(tag) = retagged.first_mut() {
        *tag = TAG_CONTEXT_0;
    }
    inner.extend_from_slice(&retagged);

    inner.extend_from_slice(&build_algorithm_identifier(OID_RSA_ENCRYPTION));
    write_tag_length_value(&mut inner, TAG_OCTET_STRING, signature);

    let mut result = Vec::new();
    write_tag_length_value(&mut result, TAG_SEQUENCE, &inner);
    result
}

fn build_content_info(certificate: &[u8], signer_info: &[u8]) -> Vec<u8> {
    let mut signed_data_content = Vec::with_capacity(4096);

    write_tag_length_value(&mut signed_data_content, TAG_INTEGER, &[0x01]);

    let mut digest_algorithms = Vec::new();
    write_tag_length_value(
        &mut digest_algorithms,
        TAG_SET,
        &build_algorithm_identifier(OID_SHA256),
    );
    signed_data_content.extend_from_slice(&digest_algorithms);

    // encapContentInfo without eContent
    let mut encap = Vec::new();
    write_tag_length_value(&mut encap, TAG_OID, OID_DATA);
    write_tag_length_value(&mut signed_data_content, TAG_SEQUENCE, &encap);

    write_tag_length_value(&mut signed_data_content, TAG_CONTEXT_0, certificate);
    write_tag_length_value(&mut signed_data_content, TAG_SET, signer_info);

    let mut signed_data = Vec::new();
    write_tag_length_value(&mut signed_data, TAG_SEQUENCE, &signed_data_content);

    let mut content_info = Vec::new();
    write_tag_length_value(&mut content_info, TAG_OID, OID_SIGNED_DATA);
    write_tag_length_value(&mut content_info, TAG_CONTEXT_0, &signed_data);

    let mut result = Vec::new();
    write_tag_length_value(&mut result, TAG_SEQUENCE, &content_info);
    result
}

/// Write a DER TLV (tag-length-value) to a buffer.
fn write_tag_length_value(buf: &mut Vec<u8>, tag: u8, value: &[u8]) {
    buf.push(tag);
    let len = value.len();
    if len < 0x80 {
        buf.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        let significant = &bytes[skip..];
        buf.push(0x80 | significant.len() as u8);
        buf.extend_from_slice(significant);
    }
    buf.extend_from_slice(value);
}
