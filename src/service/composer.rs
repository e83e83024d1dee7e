//! Composer state engine
//!
//! Owns the draft for one compose session: text, platform selection,
//! ordered media attachments, and the optional schedule. Derived values
//! (effective character limit, remaining characters, over-limit flag,
//! publish eligibility) are computed from current state on every call,
//! never cached, so a selection toggle that lowers the limit invalidates
//! an already-typed draft immediately.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::catalog::PlatformCatalog;
use crate::config::Config;
use crate::media::{IdGenerator, PreviewRegistry};
use crate::types::{DraftSnapshot, MediaAttachment, MediaKind, MediaPayload, MediaRef};

pub struct Composer {
    catalog: PlatformCatalog,
    content: String,
    selection: HashMap<String, bool>,
    media: Vec<MediaAttachment>,
    scheduling: bool,
    scheduled_at: Option<i64>,
    publishing: bool,
    ids: Arc<dyn IdGenerator>,
    previews: Arc<dyn PreviewRegistry>,
}

impl Composer {
    /// Create a session with an empty draft and empty selection.
    pub fn new(
        catalog: PlatformCatalog,
        ids: Arc<dyn IdGenerator>,
        previews: Arc<dyn PreviewRegistry>,
    ) -> Self {
        Self {
            catalog,
            content: String::new(),
            selection: HashMap::new(),
            media: Vec::new(),
            scheduling: false,
            scheduled_at: None,
            publishing: false,
            ids,
            previews,
        }
    }

    /// Create a session from configuration, pre-selecting the configured
    /// default platforms.
    pub fn from_config(
        config: &Config,
        ids: Arc<dyn IdGenerator>,
        previews: Arc<dyn PreviewRegistry>,
    ) -> Self {
        let mut composer = Self::new(config.catalog(), ids, previews);
        for id in &config.defaults.platforms {
            composer.selection.insert(id.clone(), true);
        }
        composer
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Flip the selection state of a platform id.
    ///
    /// Any id is accepted; ids not present in the catalog simply have no
    /// effect on limit computation.
    pub fn toggle_platform(&mut self, id: &str) {
        let entry = self.selection.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        debug!(platform = id, selected = *entry, "platform toggled");
    }

    /// Replace the draft text verbatim, without truncation.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    /// Synthesize attachments for the given payloads and append them,
    /// preserving input order after existing attachments.
    pub fn add_media(&mut self, payloads: Vec<MediaPayload>) {
        for payload in payloads {
            let id = self.ids.next_id();
            let preview = self.previews.create(&id, &payload);
            let content_hash = format!("{:x}", Sha256::digest(&payload.bytes));
            debug!(
                attachment = %id,
                mime = %payload.mime_type,
                size = payload.bytes.len(),
                "media attached"
            );
            self.media.push(MediaAttachment {
                id,
                kind: MediaKind::from_mime(&payload.mime_type),
                mime_type: payload.mime_type,
                size: payload.bytes.len() as u64,
                content_hash,
                preview,
            });
        }
    }

    /// Remove the attachment with the given id and release its preview
    /// handle. A no-op when the id is absent.
    pub fn remove_media(&mut self, id: &str) {
        if let Some(index) = self.media.iter().position(|m| m.id == id) {
            let attachment = self.media.remove(index);
            self.previews.release(&attachment.preview);
            debug!(attachment = id, "media removed");
        }
    }

    /// Enable or disable scheduling. The stored timestamp is kept when
    /// scheduling is disabled; it is simply not required for eligibility.
    pub fn set_scheduling(&mut self, enabled: bool) {
        self.scheduling = enabled;
    }

    /// Record the desired publish time. The engine accepts any value; past
    /// timestamps are rejected at submit time, against the clock the
    /// publishing service was built with.
    pub fn set_schedule_at(&mut self, timestamp: i64) {
        self.scheduled_at = Some(timestamp);
    }

    /// Reset the draft to its initial empty state, releasing every preview
    /// handle. The selection is retained by design: platform choices
    /// persist across posts so the user is not forced to re-select every
    /// time.
    pub fn clear(&mut self) {
        self.content.clear();
        for attachment in self.media.drain(..) {
            self.previews.release(&attachment.preview);
        }
        self.scheduling = false;
        self.scheduled_at = None;
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// The binding character limit: minimum limit among selected platforms
    /// present in the catalog. `None` means no configured platform is
    /// selected, which blocks publishing (it is not "unlimited").
    pub fn effective_limit(&self) -> Option<usize> {
        self.catalog.min_char_limit(self.selected_ids())
    }

    /// Draft length in characters (scalar values, not bytes).
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Effective limit minus current length; negative when over. `None`
    /// when the limit is blocked by an empty selection.
    pub fn remaining_characters(&self) -> Option<i64> {
        self.effective_limit()
            .map(|limit| limit as i64 - self.char_count() as i64)
    }

    /// True iff the draft exceeds the effective limit.
    pub fn is_over_limit(&self) -> bool {
        matches!(self.remaining_characters(), Some(remaining) if remaining < 0)
    }

    /// Number of selected entries, including ids the catalog does not know.
    pub fn selected_count(&self) -> usize {
        self.selection.values().filter(|&&v| v).count()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.get(id).copied().unwrap_or(false)
    }

    /// Whether a publish may be started right now.
    pub fn can_publish(&self) -> bool {
        !self.publishing
            && self.effective_limit().is_some()
            && !self.is_over_limit()
            && !self.content.trim().is_empty()
    }

    /// Inline text explaining why publishing is blocked, or `None` when it
    /// is not.
    pub fn blocking_reason(&self) -> Option<String> {
        if self.publishing {
            Some("a publish is already in progress".to_string())
        } else if self.effective_limit().is_none() {
            Some("select at least one platform".to_string())
        } else if self.is_over_limit() {
            Some("text is too long for the selected platforms".to_string())
        } else if self.content.trim().is_empty() {
            Some("write something before posting".to_string())
        } else {
            None
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn media(&self) -> &[MediaAttachment] {
        &self.media
    }

    pub fn scheduling_enabled(&self) -> bool {
        self.scheduling
    }

    pub fn scheduled_at(&self) -> Option<i64> {
        self.scheduled_at
    }

    pub fn is_publishing(&self) -> bool {
        self.publishing
    }

    pub fn catalog(&self) -> &PlatformCatalog {
        &self.catalog
    }

    /// Selected ids that exist in the catalog, in catalog order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.catalog
            .iter()
            .map(|p| p.id.as_str())
            .filter(|&id| self.is_selected(id))
    }

    /// Snapshot the draft for delivery to a publish sink. Preview handles
    /// are session-local and stay behind.
    pub fn snapshot(&self, post_id: String) -> DraftSnapshot {
        DraftSnapshot {
            post_id,
            content: self.content.clone(),
            platforms: self.selected_ids().map(String::from).collect(),
            media: self.media.iter().map(MediaRef::from).collect(),
            scheduled_at: if self.scheduling {
                self.scheduled_at
            } else {
                None
            },
        }
    }

    pub(crate) fn set_publishing(&mut self, publishing: bool) {
        self.publishing = publishing;
    }

    /// Settle an in-flight publish. Success resets the draft (selection
    /// retained); failure leaves it intact for editing and retry.
    pub(crate) fn finish_publish(&mut self, success: bool) {
        self.publishing = false;
        if success {
            self.clear();
        }
    }
}

impl Drop for Composer {
    // Session end releases whatever previews remain
    fn drop(&mut self) {
        for attachment in self.media.drain(..) {
            self.previews.release(&attachment.preview);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{InMemoryPreviews, SequentialGenerator};

    fn test_composer() -> Composer {
        Composer::new(
            Config::default_config().catalog(),
            Arc::new(SequentialGenerator::new("media")),
            Arc::new(InMemoryPreviews::new()),
        )
    }

    #[test]
    fn test_new_session_starts_empty() {
        let composer = test_composer();
        assert_eq!(composer.content(), "");
        assert!(composer.media().is_empty());
        assert_eq!(composer.selected_count(), 0);
        assert!(!composer.scheduling_enabled());
        assert_eq!(composer.scheduled_at(), None);
        assert!(!composer.can_publish());
    }

    #[test]
    fn test_from_config_applies_default_selection() {
        let config = Config::default_config();
        let composer = Composer::from_config(
            &config,
            Arc::new(SequentialGenerator::new("media")),
            Arc::new(InMemoryPreviews::new()),
        );

        assert!(composer.is_selected("facebook"));
        assert!(composer.is_selected("instagram"));
        assert!(!composer.is_selected("twitter"));
        // Instagram's 2200 binds
        assert_eq!(composer.effective_limit(), Some(2_200));
    }

    #[test]
    fn test_toggle_platform_flips_and_recomputes_limit() {
        let mut composer = test_composer();

        composer.toggle_platform("facebook");
        assert_eq!(composer.effective_limit(), Some(63_206));

        composer.toggle_platform("twitter");
        assert_eq!(composer.effective_limit(), Some(280));

        composer.toggle_platform("twitter");
        assert_eq!(composer.effective_limit(), Some(63_206));
    }

    #[test]
    fn test_toggle_unknown_platform_is_accepted_but_inert() {
        let mut composer = test_composer();

        composer.toggle_platform("myspace");
        assert!(composer.is_selected("myspace"));
        assert_eq!(composer.selected_count(), 1);
        // Unknown ids never match a configured platform, so the limit
        // stays blocked
        assert_eq!(composer.effective_limit(), None);
        assert!(!composer.can_publish());
    }

    #[test]
    fn test_char_count_uses_characters_not_bytes() {
        let mut composer = test_composer();
        composer.set_content("Hello 世界 🚀");
        assert_eq!(composer.char_count(), 10);
    }

    #[test]
    fn test_set_content_is_verbatim() {
        let mut composer = test_composer();
        composer.toggle_platform("twitter");

        let long = "a".repeat(500);
        composer.set_content(long.clone());
        // No truncation, even over the limit
        assert_eq!(composer.content(), long);
        assert!(composer.is_over_limit());
    }

    #[test]
    fn test_scheduling_flag_and_timestamp() {
        let mut composer = test_composer();

        composer.set_scheduling(true);
        composer.set_schedule_at(1_800_000_000);
        assert!(composer.scheduling_enabled());
        assert_eq!(composer.scheduled_at(), Some(1_800_000_000));

        // Disabling keeps the stored timestamp
        composer.set_scheduling(false);
        assert_eq!(composer.scheduled_at(), Some(1_800_000_000));
    }

    #[test]
    fn test_snapshot_omits_schedule_when_disabled() {
        let mut composer = test_composer();
        composer.toggle_platform("twitter");
        composer.set_content("hi");
        composer.set_schedule_at(1_800_000_000);

        let snapshot = composer.snapshot("post-1".to_string());
        assert_eq!(snapshot.scheduled_at, None);

        composer.set_scheduling(true);
        let snapshot = composer.snapshot("post-2".to_string());
        assert_eq!(snapshot.scheduled_at, Some(1_800_000_000));
    }

    #[test]
    fn test_snapshot_platforms_in_catalog_order() {
        let mut composer = test_composer();
        // Toggle in reverse catalog order
        composer.toggle_platform("tiktok");
        composer.toggle_platform("twitter");
        composer.toggle_platform("facebook");

        let snapshot = composer.snapshot("post-1".to_string());
        assert_eq!(snapshot.platforms, vec!["facebook", "twitter", "tiktok"]);
    }

    #[test]
    fn test_clear_resets_draft_but_keeps_selection() {
        let mut composer = test_composer();
        composer.toggle_platform("twitter");
        composer.set_content("draft text");
        composer.set_scheduling(true);
        composer.set_schedule_at(1_800_000_000);

        composer.clear();

        assert_eq!(composer.content(), "");
        assert!(!composer.scheduling_enabled());
        assert_eq!(composer.scheduled_at(), None);
        // Platform choices persist across posts by design
        assert!(composer.is_selected("twitter"));
    }
}
