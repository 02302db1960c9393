// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! The instance metadata document and its path resolver.
//!
//! A request path such as `compute/osProfile/computerName` is split on `/`
//! and walked one segment at a time: object members by key, array elements
//! by decimal index. Empty segments are skipped, so `/a//b/` and `a/b` are
//! the same path, and the empty path selects the whole document.
//!
//! Presence is tracked explicitly. A member that exists is returned even when
//! its value is `null`, `false`, `0`, `""`, `[]` or `{}`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Read-only metadata document, shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDocument {
    root: Value,
}

impl MetadataDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Loads and validates the document. The root must be a JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("unable to read metadata document {}", path.display()))?;
        let root: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("invalid JSON in metadata document {}", path.display()))?;

        if !root.is_object() {
            bail!(
                "metadata document {} must be a JSON object",
                path.display()
            );
        }

        tracing::info!("[imds] loaded metadata document from {}", path.display());

        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the subtree at `path`, or `None` when any segment is absent.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        resolve(&self.root, path)
    }
}

/// Walks `document` along the non-empty `/`-separated segments of `path`.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(document, |node, segment| match node {
            Value::Object(members) => members.get(segment),
            Value::Array(items) => array_index(segment).and_then(|index| items.get(index)),
            _ => None,
        })
}

/// Canonical decimal index: digits only, no sign, no leading zeros.
fn array_index(segment: &str) -> Option<usize> {
    let canonical = segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical { segment.parse().ok() } else { None }
}
