// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_DOCUMENT_PATH: &str = "data/instance.json";
pub const DEFAULT_KEY_PATH: &str = "data/keys/imds.key";
pub const DEFAULT_CERTIFICATE_PATH: &str = "data/keys/imds.crt";

pub const HEALTH_ROUTE: &str = "/";
pub const INSTANCE_ROUTE: &str = "/metadata/instance";
pub const INSTANCE_ROUTE_SLASH: &str = "/metadata/instance/";
pub const INSTANCE_PATH_ROUTE: &str = "/metadata/instance/{*path}";
pub const TOKEN_ROUTE: &str = "/metadata/identity/oauth2/token";
pub const KEYS_ROUTE: &str = "/metadata/identity/discovery/keys";
pub const ATTESTED_ROUTE: &str = "/metadata/attested";
pub const SCHEDULED_EVENTS_ROUTE: &str = "/metadata/scheduledevents";

pub const HEALTH_BODY: &str = "OK";
pub const PATH_NOT_FOUND: &str = "path not found";
