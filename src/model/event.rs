//! Calendar event types: one platform-specific post's scheduling record.

use serde::{Deserialize, Serialize};

use super::Platform;

/// One scheduled/published/failed post-to-platform assignment.
///
/// Only the underlying facts are stored; the green/yellow/red
/// classification is always derived via [`CalendarEvent::note_type`],
/// never persisted, so the two can't disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Which network the post targets.
    pub platform: Platform,

    /// Display text for the publish time (opaque, not parsed).
    /// `Some` means a time has been fixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,

    /// Free-text status label shown to the user ("queued", "posted", ...).
    pub status: String,

    /// The post body, once authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// The platform confirmed delivery.
    #[serde(default)]
    pub published: bool,

    /// Delivery was attempted and rejected.
    #[serde(default)]
    pub failed: bool,
}

/// At-a-glance classification of an event, derived from its facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    /// Content complete (published, or authored and scheduled).
    Green,
    /// Awaiting content or a publish time.
    Yellow,
    /// Delivery failed.
    Red,
}

impl NoteType {
    /// Label used in CLI output.
    pub fn label(self) -> &'static str {
        match self {
            NoteType::Green => "green",
            NoteType::Yellow => "yellow",
            NoteType::Red => "red",
        }
    }
}

impl CalendarEvent {
    /// Creates a freshly queued event with no content or time yet.
    pub fn queued(platform: Platform) -> Self {
        CalendarEvent {
            platform,
            scheduled_time: None,
            status: "queued".to_string(),
            content: None,
            published: false,
            failed: false,
        }
    }

    /// True once the post body has been authored (non-empty).
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Derives the classification from the event's facts.
    ///
    /// One ordered check, so exactly one rule fires:
    /// failed > published > (content & time) > content-only > neither.
    /// A malformed record with both `failed` and `published` set
    /// resolves to red rather than erroring; this is advisory UI
    /// state, not a source of truth.
    pub fn note_type(&self) -> NoteType {
        if self.failed {
            NoteType::Red
        } else if self.published {
            NoteType::Green
        } else if self.has_content() && self.scheduled_time.is_some() {
            NoteType::Green
        } else {
            NoteType::Yellow
        }
    }

    /// Records confirmed delivery. Clears `failed`: the two flags are
    /// mutually exclusive at any instant.
    pub fn mark_published(&mut self) {
        self.published = true;
        self.failed = false;
        self.status = "posted".to_string();
    }

    /// Records a rejected delivery attempt, with an optional
    /// user-facing status label.
    pub fn mark_failed(&mut self, status: Option<&str>) {
        self.failed = true;
        self.published = false;
        self.status = status.unwrap_or("failed").to_string();
    }
}
