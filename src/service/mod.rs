//! Service layer
//!
//! The composer state engine and the async publishing flow around it,
//! consumable by any interface (CLI, TUI, GUI) without duplication:
//!
//! - `Composer`: synchronous draft state machine with derived values
//! - `PublishingService`: clonable handle adding the async publish flow,
//!   single-flight guard, and lifecycle events
//! - `EventBus`: broadcast of publish lifecycle events
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use crosspost::media::{InMemoryPreviews, UuidGenerator};
//! use crosspost::clock::SystemClock;
//! use crosspost::service::{Composer, PublishingService};
//! use crosspost::sink::MockSink;
//! use crosspost::Config;
//!
//! # async fn example() -> crosspost::Result<()> {
//! let config = Config::load()?;
//! let ids = Arc::new(UuidGenerator);
//! let composer = Composer::from_config(&config, ids.clone(), Arc::new(InMemoryPreviews::new()));
//! let service = PublishingService::new(
//!     composer,
//!     Arc::new(MockSink::success()),
//!     Arc::new(SystemClock),
//!     ids,
//! );
//!
//! service.set_content("Hello from everywhere at once");
//! if service.can_publish() {
//!     let receipt = service.publish().await?;
//!     println!("posted {}", receipt.post_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod events;
pub mod publishing;

pub use composer::Composer;
pub use events::{ComposerEvent, EventBus, EventReceiver};
pub use publishing::PublishingService;
