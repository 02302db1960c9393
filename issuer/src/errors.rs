// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

#[derive(thiserror::Error, Debug)]
pub enum IssuerError {
    #[error("key material error: {0}")]
    KeyMaterial(String),
    #[error("{0}")]
    Signing(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<x509_cert::der::Error> for IssuerError {
    fn from(source: x509_cert::der::Error) -> Self {
        IssuerError::KeyMaterial(source.to_string())
    }
}
