//! Publish sink abstraction
//!
//! The composer never talks to a transport directly. Publishing goes
//! through the [`PublishSink`] trait, which accepts a draft snapshot and
//! returns a typed success or failure. The reference behavior of the
//! system this engine was designed for always succeeded after a fixed
//! delay; here failure is part of the contract so that callers can keep
//! the draft and surface an error.
//!
//! # Examples
//!
//! ```no_run
//! use crosspost::sink::{MockSink, PublishSink};
//! use crosspost::types::DraftSnapshot;
//!
//! # async fn example(snapshot: DraftSnapshot) {
//! let sink = MockSink::success();
//! match sink.publish(&snapshot).await {
//!     Ok(receipt) => println!("posted {} at {}", receipt.post_id, receipt.posted_at),
//!     Err(e) => eprintln!("publish failed: {}", e),
//! }
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PublishError;
use crate::types::DraftSnapshot;

pub mod mock;

pub use mock::MockSink;

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Identifier of the published post (echoed from the snapshot)
    pub post_id: String,
    /// When the sink accepted the post (Unix timestamp)
    pub posted_at: i64,
    /// Platforms the post was delivered to
    pub platforms: Vec<String>,
}

/// Asynchronous destination for publishable drafts.
///
/// Implementations deliver the snapshot to one or more platforms. They
/// must return a typed error on failure; the composer preserves the draft
/// in that case so the user can edit and retry.
#[async_trait]
pub trait PublishSink: Send + Sync {
    async fn publish(
        &self,
        snapshot: &DraftSnapshot,
    ) -> std::result::Result<PublishReceipt, PublishError>;
}
