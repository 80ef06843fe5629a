//! Per-session state mirrored to the host widget.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use vaani_core::{Page, TranscriptEntry};

/// What the assistant is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssistantStatus {
    /// No session is active.
    Idle,

    /// Active and between operations.
    Ready,

    /// Playing a spoken prompt.
    Speaking,

    /// Capturing user speech.
    Listening,
}

/// Events emitted by the session for the host widget to render.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The status indicator changed.
    StatusChanged(AssistantStatus),

    /// A transcript row was appended.
    Transcript(TranscriptEntry),
}

/// One live assistant session.
///
/// Created when the assistant opens and torn down on close. Tracks the page
/// being driven, the status indicator, and the conversation transcript;
/// every change is also emitted as a [`SessionEvent`].
#[derive(Debug)]
pub struct AssistantSession {
    active: bool,
    page: Page,
    status: AssistantStatus,
    transcript: Vec<TranscriptEntry>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl AssistantSession {
    #[must_use]
    pub const fn new(event_tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            active: false,
            page: Page::Unsupported,
            status: AssistantStatus::Idle,
            transcript: Vec::new(),
            event_tx,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.set_status(AssistantStatus::Ready);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.set_status(AssistantStatus::Idle);
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            tracing::debug!(from = ?self.page, to = ?page, "Page context changed");
            self.page = page;
        }
    }

    #[must_use]
    pub const fn status(&self) -> AssistantStatus {
        self.status
    }

    /// Update the status indicator, emitting only on change.
    pub fn set_status(&mut self, status: AssistantStatus) {
        if self.status != status {
            self.status = status;
            self.emit(SessionEvent::StatusChanged(status));
        }
    }

    /// The conversation so far, in utterance order.
    #[must_use]
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn log_assistant(&mut self, text: &str) {
        self.log(TranscriptEntry::assistant(text));
    }

    pub fn log_user(&mut self, text: &str) {
        self.log(TranscriptEntry::user(text));
    }

    fn log(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry.clone());
        self.emit(SessionEvent::Transcript(entry));
    }

    /// Best-effort emit; if the host dropped the receiver we log and move on.
    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Session event receiver dropped");
        }
    }
}
