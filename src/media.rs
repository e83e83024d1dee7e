//! Media identifier generation and preview lifecycle
//!
//! Preview handles are session-scoped resources, standing in for the
//! object URLs the host environment creates to render an attachment before
//! upload. Each handle must be released exactly once: when the attachment
//! is removed, when the draft resets after a publish, or when the session
//! ends. Double release and leak-on-reset are both defects the registry
//! guards against.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MediaPayload;

/// Generates attachment and publish identifiers.
///
/// Injectable so tests can use a deterministic sequence instead of random
/// tokens.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUID v4 identifiers (production default).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter identifiers for reproducible tests.
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

/// Opaque reference that lets the host render an attachment locally
/// before or without upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewHandle {
    pub url: String,
}

/// Creates and releases preview handles.
pub trait PreviewRegistry: Send + Sync {
    /// Create a preview handle for the given attachment payload.
    fn create(&self, attachment_id: &str, payload: &MediaPayload) -> PreviewHandle;

    /// Release a handle. Returns `false` when the handle is unknown,
    /// meaning it was already released or never created here.
    fn release(&self, handle: &PreviewHandle) -> bool;
}

/// In-memory preview registry.
///
/// Tracks active handles and lifetime counters so tests can assert the
/// exactly-once release property.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPreviews {
    inner: Arc<Mutex<PreviewState>>,
}

#[derive(Debug, Default)]
struct PreviewState {
    active: HashSet<String>,
    created: usize,
    released: usize,
}

impl InMemoryPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles created and not yet released.
    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Handles created over the registry's lifetime.
    pub fn created_count(&self) -> usize {
        self.lock().created
    }

    /// Handles released over the registry's lifetime.
    pub fn released_count(&self) -> usize {
        self.lock().released
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PreviewState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreviewRegistry for InMemoryPreviews {
    fn create(&self, attachment_id: &str, _payload: &MediaPayload) -> PreviewHandle {
        let url = format!("preview://{}", attachment_id);
        let mut state = self.lock();
        state.active.insert(url.clone());
        state.created += 1;
        PreviewHandle { url }
    }

    fn release(&self, handle: &PreviewHandle) -> bool {
        let mut state = self.lock();
        if state.active.remove(&handle.url) {
            state.released += 1;
            true
        } else {
            tracing::warn!(url = %handle.url, "released an unknown preview handle");
            false
        }
    }
}
