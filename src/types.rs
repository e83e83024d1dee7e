//! Core types for Crosspost

use serde::{Deserialize, Serialize};

use crate::media::PreviewHandle;

/// Static descriptor for a target platform.
///
/// Platforms are supplied by configuration at startup and never change at
/// runtime. The accent color is carried for hosts that render the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Stable lowercase identifier (e.g. "twitter")
    pub id: String,
    /// Display name
    pub name: String,
    /// Accent color as a hex string (e.g. "#1DA1F2")
    pub color: String,
    /// Maximum characters per post
    pub char_limit: usize,
}

/// Coarse media classification derived from the declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a declared MIME type: anything under `image/` is an image,
    /// everything else is treated as video.
    pub fn from_mime(mime: &str) -> Self {
        if mime.to_ascii_lowercase().starts_with("image/") {
            Self::Image
        } else {
            Self::Video
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// A binary payload handed to the composer by the host environment's
/// file-selection mechanism, with its declared MIME type.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    /// Original file name, if the host knows it
    pub file_name: Option<String>,
    /// Declared MIME type (e.g. "image/png", "video/mp4")
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl MediaPayload {
    pub fn new(file_name: Option<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// A media attachment owned by the compose session.
///
/// The preview handle is a session-local rendering resource and must be
/// released exactly once, either when the attachment is removed or when
/// the draft is reset.
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    /// Generated identifier
    pub id: String,
    /// Image or video, by MIME prefix
    pub kind: MediaKind,
    /// Declared MIME type of the payload
    pub mime_type: String,
    /// Payload size in bytes
    pub size: u64,
    /// SHA-256 of the payload content (hex encoded)
    pub content_hash: String,
    /// Local preview handle
    pub preview: PreviewHandle,
}

/// Immutable snapshot of the draft handed to the publish sink.
///
/// Carries everything the sink needs and nothing session-local: preview
/// handles stay behind in the composer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSnapshot {
    /// Identifier generated for this publish attempt
    pub post_id: String,
    /// Draft text, verbatim
    pub content: String,
    /// Selected platform ids, in catalog order
    pub platforms: Vec<String>,
    /// Attached media, in attachment order
    pub media: Vec<MediaRef>,
    /// Desired publish time, present only when scheduling is enabled
    pub scheduled_at: Option<i64>,
}

/// Reference to an attachment within a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: String,
    pub kind: MediaKind,
    pub mime_type: String,
    pub content_hash: String,
}

impl From<&MediaAttachment> for MediaRef {
    fn from(attachment: &MediaAttachment) -> Self {
        Self {
            id: attachment.id.clone(),
            kind: attachment.kind,
            mime_type: attachment.mime_type.clone(),
            content_hash: attachment.content_hash.clone(),
        }
    }
}
