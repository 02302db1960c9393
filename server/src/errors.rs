// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imds_issuer::IssuerError;
use serde_json::json;
use tokio::task::JoinError;

use crate::constants::PATH_NOT_FOUND;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AppError {
    #[error("path not found")]
    PathNotFound,
    #[error("signing error: {0}")]
    SigningError(String),
    #[error("internal server error")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::PathNotFound => (StatusCode::NOT_FOUND, PATH_NOT_FOUND).into_response(),
            Self::SigningError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": message})),
            )
                .into_response(),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal Server Error"})),
            )
                .into_response(),
        }
    }
}

impl From<IssuerError> for AppError {
    fn from(source: IssuerError) -> Self {
        tracing::error!("[imds] {:?}", source);
        match source {
            IssuerError::Signing(message) => AppError::SigningError(message),
            IssuerError::Serialization(err) => AppError::SigningError(err.to_string()),
            IssuerError::KeyMaterial(_) => AppError::InternalServerError,
        }
    }
}

impl From<JoinError> for AppError {
    fn from(source: JoinError) -> Self {
        tracing::error!("[imds] blocking task failed: {:?}", source);
        AppError::InternalServerError
    }
}
