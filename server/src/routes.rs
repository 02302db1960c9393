// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! HTTP route handlers for the metadata service.
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | `/` | [`health`] | Liveness check |
//! | GET | `/metadata/instance` | [`instance_root`] | Whole instance document |
//! | GET | `/metadata/instance/` | [`instance_root`] | Whole instance document |
//! | GET | `/metadata/instance/{*path}` | [`instance`] | Subtree of the instance document |
//! | GET | `/metadata/identity/oauth2/token` | [`token`] | RS256 bearer token |
//! | GET | `/metadata/identity/discovery/keys` | [`discovery_keys`] | JWK set for token validation |
//! | GET | `/metadata/attested` | [`attested`] | PKCS#7 signed identity document |
//! | GET | `/metadata/scheduledevents` | [`scheduled_events`] | Pending maintenance events |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use imds_issuer::models::{AttestedResponse, JwkSet, TokenResponse};
use serde_json::{Value, json};

use crate::application::AppState;
use crate::constants::HEALTH_BODY;
use crate::errors::AppError;

/// Liveness check. Always answers `OK`.
pub async fn health() -> impl IntoResponse {
    HEALTH_BODY
}

/// Returns the whole instance document.
#[tracing::instrument(skip(state))]
pub async fn instance_root(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    resolve_instance(&state, "")
}

/// Returns the subtree at `path`.
///
/// # Errors
///
/// - [`AppError::PathNotFound`] - any segment of `path` is absent
#[tracing::instrument(skip(state))]
pub async fn instance(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<Value>, AppError> {
    resolve_instance(&state, &path)
}

fn resolve_instance(state: &AppState, path: &str) -> Result<Json<Value>, AppError> {
    match state.document.resolve(path) {
        Some(node) => Ok(Json(node.clone())),
        None => {
            tracing::debug!("[imds] no metadata at path: {}", path);
            Err(AppError::PathNotFound)
        }
    }
}

/// Mints a one-hour access token.
///
/// Request parameters such as `resource` or `api-version` are accepted and
/// ignored; the audience always comes from configuration.
///
/// # Errors
///
/// - [`AppError::SigningError`] - the token could not be signed
#[tracing::instrument(skip(state))]
pub async fn token(State(state): State<Arc<AppState>>) -> Result<Json<TokenResponse>, AppError> {
    let response = state.issuer.mint_token(Utc::now())?;

    Ok(Json(response))
}

/// Publishes the public signing key.
#[tracing::instrument(skip(state))]
pub async fn discovery_keys(State(state): State<Arc<AppState>>) -> Json<JwkSet> {
    Json(state.issuer.jwks())
}

/// Signs an identity document for the caller.
///
/// The caller's hostname becomes the `vmId`. Resolving it may block, so it
/// runs on the blocking pool.
///
/// # Errors
///
/// - [`AppError::SigningError`] - signing failed or produced no envelope
/// - [`AppError::InternalServerError`] - the hostname lookup task failed
#[tracing::instrument(skip(state))]
pub async fn attested(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Result<Json<AttestedResponse>, AppError> {
    let hosts = state.hosts.clone();
    let ip = peer.ip();
    let vm_id = tokio::task::spawn_blocking(move || hosts.hostname(ip)).await?;

    tracing::debug!("[imds] attesting {} as {}", ip, vm_id);

    let response = state.issuer.sign_attestation(Utc::now(), &vm_id)?;

    Ok(Json(response))
}

/// The emulated VM never has maintenance scheduled.
pub async fn scheduled_events() -> Json<Value> {
    Json(json!({"DocumentIncarnation": 0, "Events": []}))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::hostname::StaticHost;
    use crate::metadata::MetadataDocument;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use imds_issuer::{CredentialIssuer, KeyMaterial, TokenSettings};
    use std::net::{IpAddr, Ipv4Addr};

    // Integration tests using TestServer are in tests/http_integration.rs

    const KEY_PEM: &[u8] = include_bytes!("../../data/keys/imds.key");
    const CERTIFICATE_PEM: &[u8] = include_bytes!("../../data/keys/imds.crt");

    fn state() -> Arc<AppState> {
        let keys = KeyMaterial::from_pem(KEY_PEM, CERTIFICATE_PEM).unwrap();
        Arc::new(AppState {
            document: Arc::new(MetadataDocument::new(
                json!({"compute": {"name": "vm1", "tags": ""}}),
            )),
            issuer: Arc::new(CredentialIssuer::new(keys, TokenSettings::default())),
            hosts: Arc::new(StaticHost("vm1.internal".to_string())),
        })
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 4)), 50000))
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_instance_subtree() {
        let Json(node) = instance(State(state()), Path("compute/name".to_string()))
            .await
            .unwrap();
        assert_eq!(node, json!("vm1"));
    }

    #[tokio::test]
    async fn test_instance_present_empty_string() {
        let Json(node) = instance(State(state()), Path("compute/tags".to_string()))
            .await
            .unwrap();
        assert_eq!(node, json!(""));
    }

    #[tokio::test]
    async fn test_instance_missing_path() {
        let result = instance(State(state()), Path("compute/missing".to_string())).await;
        assert_eq!(result.unwrap_err(), AppError::PathNotFound);
    }

    #[tokio::test]
    async fn test_instance_root_returns_document() {
        let state = state();
        let Json(document) = instance_root(State(state.clone())).await.unwrap();
        assert_eq!(&document, state.document.root());
    }

    #[tokio::test]
    async fn test_token_envelope() {
        let Json(response) = token(State(state())).await.unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, "3600");
        assert_eq!(response.access_token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_attested_uses_resolved_hostname() {
        let state = state();
        let Json(response) = attested(State(state.clone()), peer()).await.unwrap();
        assert_eq!(response.encoding, "pkcs7");
        assert!(!response.signature.is_empty());
        assert_eq!(state.issuer.staging().live(), 0);
    }

    #[tokio::test]
    async fn test_scheduled_events_empty() {
        let Json(events) = scheduled_events().await;
        assert_eq!(events["DocumentIncarnation"], 0);
        assert_eq!(events["Events"], json!([]));
    }
}
