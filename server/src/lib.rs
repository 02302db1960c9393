// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # IMDS Server
//!
//! HTTP front end of the instance metadata service emulator.
//!
//! ```text
//! Client -> HTTP API (this crate) -> metadata document
//!                  |
//!                  +-> imds-issuer (tokens, attested data, JWKS)
//!                  +-> reverse DNS (caller identity)
//! ```
//!
//! ## Modules
//!
//! - [`application`]: HTTP server setup with Axum and request tracing
//! - [`configuration`]: CLI argument parsing with clap
//! - [`constants`]: defaults and route paths
//! - [`errors`]: application error types with HTTP response mapping
//! - [`hostname`]: caller address to `vmId` resolution
//! - [`metadata`]: the instance document and its path resolver
//! - [`routes`]: HTTP route handlers
//!
//! ## Usage
//!
//! ```bash
//! imds-server --host 0.0.0.0 --port 80 --document data/instance.json \
//!     --key data/keys/imds.key --certificate data/keys/imds.crt
//! ```

pub mod application;
pub mod configuration;
pub mod constants;
pub mod errors;
pub mod hostname;
pub mod metadata;
pub mod routes;
