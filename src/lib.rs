//! Crosspost - multi-platform post composition engine
//!
//! This library provides the composing core of a social media management
//! tool: target platform selection, shared character-limit derivation,
//! media attachment lifecycle, and publishing through a pluggable sink.
//!
//! The central rule is the lowest-common-denominator character limit: the
//! binding limit for a draft is the minimum limit among the selected
//! platforms, recomputed on every state change. Selecting a low-limit
//! platform can retroactively invalidate text the user already typed, so
//! all derived values are computed from current state and never cached.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod service;
pub mod sink;
pub mod types;

// Re-export commonly used types
pub use catalog::PlatformCatalog;
pub use config::Config;
pub use error::{CrosspostError, PublishError, Result};
pub use service::composer::Composer;
pub use service::publishing::PublishingService;
pub use types::{DraftSnapshot, MediaAttachment, MediaKind, MediaPayload, Platform};
