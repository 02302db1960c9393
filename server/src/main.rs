// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use anyhow::Context;
use clap::Parser;
use imds_issuer::{CredentialIssuer, KeyMaterial};
use imds_server::application::Application;
use imds_server::configuration::ImdsOptions;
use imds_server::metadata::MetadataDocument;
use tracing_subscriber::EnvFilter;

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("[imds] init");

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in collected logs.
        .with_ansi(false)
        // the log collector adds the ingestion time.
        .without_time()
        // remove the name of the function from every log entry
        .with_target(false)
        .init();

    // get configuration options from arguments or environment variables
    let options = ImdsOptions::parse();

    tracing::info!("[imds] {:?}", &options);

    let document = MetadataDocument::load(&options.document).inspect_err(|e| {
        tracing::error!("[imds] unable to load metadata document: {:?}", e);
    })?;

    let keys = KeyMaterial::load(&options.key, &options.certificate)
        .inspect_err(|e| tracing::error!("[imds] unable to load signing keys: {:?}", e))
        .context("unable to load signing keys")?;

    let issuer = CredentialIssuer::new(keys, options.token_settings());

    let application = Application::build(options, document, issuer)
        .await
        .context("unable to bind listener")?;

    application
        .run_until_stopped()
        .await
        .context("server stopped unexpectedly")
}
