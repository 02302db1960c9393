// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::path::PathBuf;

use clap::Parser;
use imds_issuer::TokenSettings;
use imds_issuer::constants::{DEFAULT_CLIENT_ID, DEFAULT_RESOURCE};

use crate::constants::{
    DEFAULT_CERTIFICATE_PATH, DEFAULT_DOCUMENT_PATH, DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT,
    DEFAULT_KEY_PATH,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ImdsOptions {
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env("IMDS_HTTP_HOST"))]
    pub host: String,
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env("IMDS_HTTP_PORT"))]
    pub port: u16,
    /// JSON document served under /metadata/instance
    #[arg(long, default_value = DEFAULT_DOCUMENT_PATH, env("IMDS_DOCUMENT_PATH"))]
    pub document: PathBuf,
    /// PEM RSA private key (PKCS#8 or PKCS#1)
    #[arg(long, default_value = DEFAULT_KEY_PATH, env("IMDS_KEY_PATH"))]
    pub key: PathBuf,
    /// PEM X.509 certificate matching the private key
    #[arg(long, default_value = DEFAULT_CERTIFICATE_PATH, env("IMDS_CERTIFICATE_PATH"))]
    pub certificate: PathBuf,
    #[arg(long, default_value = DEFAULT_RESOURCE, env("IMDS_RESOURCE"))]
    pub resource: String,
    #[arg(long, default_value = DEFAULT_CLIENT_ID, env("IMDS_CLIENT_ID"))]
    pub client_id: String,
    /// Fixed vmId for attested data; the caller's hostname is used when unset
    #[arg(long, env("IMDS_VM_ID"))]
    pub vm_id: Option<String>,
}

impl ImdsOptions {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            resource: self.resource.clone(),
            client_id: self.client_id.clone(),
        }
    }
}

impl Default for ImdsOptions {
    fn default() -> Self {
        ImdsOptions {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            document: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            key: PathBuf::from(DEFAULT_KEY_PATH),
            certificate: PathBuf::from(DEFAULT_CERTIFICATE_PATH),
            resource: DEFAULT_RESOURCE.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            vm_id: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let options = ImdsOptions::try_parse_from([
            "imds-server",
            "--port",
            "9000",
            "--client-id",
            "11111111-2222-3333-4444-555555555555",
            "--vm-id",
            "vm1.internal",
        ])
        .unwrap();

        assert_eq!(options.port, 9000);
        assert_eq!(options.client_id, "11111111-2222-3333-4444-555555555555");
        assert_eq!(options.vm_id.as_deref(), Some("vm1.internal"));
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        assert!(ImdsOptions::try_parse_from(["imds-server", "--port", "http"]).is_err());
    }

    #[test]
    fn test_default_token_settings() {
        let settings = ImdsOptions::default().token_settings();
        assert_eq!(settings, TokenSettings::default());
    }

    #[test]
    fn test_token_settings_follow_options() {
        let options = ImdsOptions {
            resource: "https://vault.example/".to_string(),
            ..ImdsOptions::default()
        };
        assert_eq!(options.token_settings().resource, "https://vault.example/");
    }
}
