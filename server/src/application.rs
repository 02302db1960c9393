// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use imds_issuer::CredentialIssuer;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::configuration::ImdsOptions;
use crate::constants::{
    ATTESTED_ROUTE, HEALTH_ROUTE, INSTANCE_PATH_ROUTE, INSTANCE_ROUTE, INSTANCE_ROUTE_SLASH,
    KEYS_ROUTE, SCHEDULED_EVENTS_ROUTE, TOKEN_ROUTE,
};
use crate::hostname::{HostResolver, ReverseDns, StaticHost};
use crate::metadata::MetadataDocument;
use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub document: Arc<MetadataDocument>,
    pub issuer: Arc<CredentialIssuer>,
    pub hosts: Arc<dyn HostResolver>,
}

impl AppState {
    /// Uses a fixed vmId when `options.vm_id` is set and reverse DNS otherwise.
    pub fn new(
        options: &ImdsOptions,
        document: MetadataDocument,
        issuer: CredentialIssuer,
    ) -> Self {
        let hosts: Arc<dyn HostResolver> = match &options.vm_id {
            Some(vm_id) => Arc::new(StaticHost(vm_id.clone())),
            None => Arc::new(ReverseDns),
        };

        Self {
            document: Arc::new(document),
            issuer: Arc::new(issuer),
            hosts,
        }
    }
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(
        options: ImdsOptions,
        document: MetadataDocument,
        issuer: CredentialIssuer,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", options.host, options.port);
        let listener = TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();

        tracing::info!("[imds] listening at http://{}:{}", options.host, port);

        let router = create_router(AppState::new(&options, document, issuer));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        axum::serve(
            self.listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(routes::health))
        .route(INSTANCE_ROUTE, get(routes::instance_root))
        .route(INSTANCE_ROUTE_SLASH, get(routes::instance_root))
        .route(INSTANCE_PATH_ROUTE, get(routes::instance))
        .route(TOKEN_ROUTE, get(routes::token))
        .route(KEYS_ROUTE, get(routes::discovery_keys))
        .route(ATTESTED_ROUTE, get(routes::attested))
        .route(SCHEDULED_EVENTS_ROUTE, get(routes::scheduled_events))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
