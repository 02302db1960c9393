// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Scoped buffers for intermediate signing artifacts.
//!
//! Attestation signing materializes the document bytes and the resulting
//! envelope before they are returned. Each one is held in a [`Staged`] guard
//! taken from a [`StagingArea`]. Dropping the guard zeroizes the bytes and
//! releases it from the area, so every exit path (success, `?` on a signing
//! error, or a panic unwinding) releases what it staged.
//!
//! [`StagingArea::live`] reports how many guards are outstanding.

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use zeroize::Zeroizing;

#[derive(Debug, Clone, Default)]
pub struct StagingArea {
    live: Arc<AtomicUsize>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `bytes` until the returned guard is dropped.
    pub fn stage(&self, bytes: Vec<u8>) -> Staged {
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!("[imds] staged {} bytes, {} live", bytes.len(), live);
        Staged {
            bytes: Zeroizing::new(bytes),
            live: self.live.clone(),
        }
    }

    /// Number of staged buffers not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

pub struct Staged {
    bytes: Zeroizing<Vec<u8>>,
    live: Arc<AtomicUsize>,
}

impl Deref for Staged {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        let live = self.live.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::trace!("[imds] released {} staged bytes, {} live", self.bytes.len(), live);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_release() {
        let staging = StagingArea::new();
        assert_eq!(staging.live(), 0);

        let first = staging.stage(b"document".to_vec());
        let second = staging.stage(b"envelope".to_vec());
        assert_eq!(staging.live(), 2);
        assert_eq!(&*first, b"document");

        drop(first);
        assert_eq!(staging.live(), 1);
        drop(second);
        assert_eq!(staging.live(), 0);
    }

    #[test]
    fn test_released_on_early_return() {
        fn fails(staging: &StagingArea) -> Result<(), String> {
            let _staged = staging.stage(vec![1, 2, 3]);
            Err("signing failed".to_string())
        }

        let staging = StagingArea::new();
        assert!(fails(&staging).is_err());
        assert_eq!(staging.live(), 0);
    }

    #[test]
    fn test_clones_share_count() {
        let staging = StagingArea::new();
        let observer = staging.clone();
        let staged = staging.stage(vec![0; 4]);
        assert_eq!(observer.live(), 1);
        drop(staged);
        assert_eq!(observer.live(), 0);
    }

    #[test]
    fn test_released_on_panic() {
        let staging = StagingArea::new();
        let inner = staging.clone();
        let result = std::panic::catch_unwind(move || {
            let _staged = inner.stage(vec![0; 4]);
            panic!("signing primitive panicked");
        });
        assert!(result.is_err());
        assert_eq!(staging.live(), 0);
    }
}
