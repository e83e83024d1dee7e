//! Publishing service
//!
//! A clonable handle over shared composer state that runs the async
//! publish flow: eligibility check and snapshot under one lock, sink
//! delivery outside it, then draft reset (success) or preservation
//! (failure). At most one publish is in flight per draft; a second
//! attempt fails fast with `PublishError::AlreadyPending` and never
//! reaches the sink.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::composer::Composer;
use super::events::{ComposerEvent, EventBus, EventReceiver};
use crate::clock::Clock;
use crate::error::{PublishError, Result};
use crate::media::IdGenerator;
use crate::sink::{PublishReceipt, PublishSink};
use crate::types::MediaPayload;

#[derive(Clone)]
pub struct PublishingService {
    composer: Arc<Mutex<Composer>>,
    sink: Arc<dyn PublishSink>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    events: EventBus,
}

impl PublishingService {
    pub fn new(
        composer: Composer,
        sink: Arc<dyn PublishSink>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            composer: Arc::new(Mutex::new(composer)),
            sink,
            clock,
            ids,
            events: EventBus::new(100),
        }
    }

    /// Subscribe to publish lifecycle events.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    // ========================================================================
    // Composer delegation
    // ========================================================================

    pub fn toggle_platform(&self, id: &str) {
        self.lock().toggle_platform(id);
    }

    pub fn set_content(&self, text: impl Into<String>) {
        self.lock().set_content(text);
    }

    pub fn add_media(&self, payloads: Vec<MediaPayload>) {
        self.lock().add_media(payloads);
    }

    pub fn remove_media(&self, id: &str) {
        self.lock().remove_media(id);
    }

    pub fn set_scheduling(&self, enabled: bool) {
        self.lock().set_scheduling(enabled);
    }

    pub fn set_schedule_at(&self, timestamp: i64) {
        self.lock().set_schedule_at(timestamp);
    }

    pub fn effective_limit(&self) -> Option<usize> {
        self.lock().effective_limit()
    }

    pub fn remaining_characters(&self) -> Option<i64> {
        self.lock().remaining_characters()
    }

    pub fn is_over_limit(&self) -> bool {
        self.lock().is_over_limit()
    }

    pub fn can_publish(&self) -> bool {
        self.lock().can_publish()
    }

    pub fn blocking_reason(&self) -> Option<String> {
        self.lock().blocking_reason()
    }

    /// Run a read-only query against the composer state.
    pub fn with_state<R>(&self, f: impl FnOnce(&Composer) -> R) -> R {
        f(&self.lock())
    }

    // ========================================================================
    // Publishing
    // ========================================================================

    /// Publish the current draft through the sink.
    ///
    /// Eligibility is checked and the snapshot taken under the state lock,
    /// so two concurrent calls cannot both pass the guard. On success the
    /// draft resets (releasing all preview handles, keeping the
    /// selection); on failure the draft is preserved for editing and
    /// retry.
    ///
    /// # Errors
    ///
    /// - `PublishError::AlreadyPending` when a publish is in flight
    /// - `PublishError::NotEligible` when validation blocks the draft
    /// - `PublishError::ScheduleMissing` / `ScheduleInPast` when
    ///   scheduling is enabled with a missing or elapsed time
    /// - `PublishError::Sink` when the sink reports a failure
    pub async fn publish(&self) -> Result<PublishReceipt> {
        let snapshot = {
            let mut composer = self.lock();

            if composer.is_publishing() {
                return Err(PublishError::AlreadyPending.into());
            }
            if !composer.can_publish() {
                let reason = composer
                    .blocking_reason()
                    .unwrap_or_else(|| "draft is not publishable".to_string());
                return Err(PublishError::NotEligible(reason).into());
            }
            if composer.scheduling_enabled() {
                match composer.scheduled_at() {
                    None => return Err(PublishError::ScheduleMissing.into()),
                    Some(scheduled_at) if scheduled_at < self.clock.now() => {
                        return Err(PublishError::ScheduleInPast {
                            scheduled_at,
                            now: self.clock.now(),
                        }
                        .into());
                    }
                    Some(_) => {}
                }
            }

            composer.set_publishing(true);
            composer.snapshot(self.ids.next_id())
        };

        let post_id = snapshot.post_id.clone();
        info!(
            post_id = %post_id,
            platforms = ?snapshot.platforms,
            chars = snapshot.content.chars().count(),
            media = snapshot.media.len(),
            "publishing draft"
        );
        self.events.emit(ComposerEvent::PublishStarted {
            post_id: post_id.clone(),
            platforms: snapshot.platforms.clone(),
        });

        // Sink runs outside the lock; the publishing flag keeps the draft
        // guarded meanwhile
        let outcome = self.sink.publish(&snapshot).await;

        let mut composer = self.lock();
        match outcome {
            Ok(receipt) => {
                composer.finish_publish(true);
                info!(post_id = %post_id, posted_at = receipt.posted_at, "publish succeeded");
                self.events.emit(ComposerEvent::PublishCompleted {
                    post_id,
                    receipt: receipt.clone(),
                });
                Ok(receipt)
            }
            Err(error) => {
                composer.finish_publish(false);
                warn!(post_id = %post_id, %error, "publish failed, draft preserved");
                self.events.emit(ComposerEvent::PublishFailed {
                    post_id,
                    error: error.to_string(),
                });
                Err(error.into())
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Composer> {
        self.composer.lock().unwrap_or_else(|e| e.into_inner())
    }
}
