//! Host page port: the read models a flow narrates.
//!
//! Implementations extract these values from whatever is hosting the
//! assistant (a webview DOM, a server-rendered template, canned demo data).
//! Every string is display text, trimmed and ready to be spoken.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ── Read models ──────────────────────────────────────────────────────────────

/// One treatment centre offered on the booking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentreInfo {
    /// Identifier the booking endpoint expects in `centre_id`.
    pub centre_id: String,
    /// Display name, read out and matched against spoken answers.
    pub name: String,
}

/// One detox appointment card on the detox dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInfo {
    /// Appointment identifier, the trailing segment of the detail links.
    pub id: String,
    /// Plan title shown on the card; may be empty.
    pub plan: String,
    /// Whether the card links to a schedule page.
    pub has_schedule: bool,
    /// Whether the card links to a progress page.
    pub has_progress: bool,
}

/// Summary of a detox schedule page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub plan: String,
    pub start_date: String,
    pub duration: String,
    pub therapy_time: String,
    pub status: String,
    /// The first day's entry, when the schedule has any.
    pub first_day: Option<DaySchedule>,
}

/// One day of a detox schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Day heading, e.g. "Day 1 - Monday, 22 September".
    pub title: String,
    /// Therapy slot titles in page order.
    pub slots: Vec<String>,
}

/// Summary of a detox progress page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub plan: String,
    pub start_date: String,
    pub duration: String,
    pub status: String,
    /// The most recent daily summary, when one exists.
    pub first_day: Option<DayProgress>,
}

/// One day of recorded detox progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub title: String,
    /// Progress score badge text, when recorded.
    pub score: Option<String>,
    /// Vitals lines in page order.
    pub vitals: Vec<String>,
}

// ── Port ─────────────────────────────────────────────────────────────────────

/// Read access to the page currently hosting the assistant.
///
/// Methods return empty collections or `None` when the page does not carry
/// the requested data; flows treat that as "nothing to narrate", never as an
/// error.
#[async_trait]
pub trait HostPage: Send + Sync {
    /// Location path of the current page, e.g. `/patient/book-detox`.
    async fn current_path(&self) -> String;

    /// Signed-in patient's display name, when the host session knows it.
    async fn display_name(&self) -> Option<String>;

    /// Centres offered by the booking page, in page order.
    async fn centres(&self) -> Vec<CentreInfo>;

    /// Appointment cards on the detox dashboard, de-duplicated by id in
    /// page order.
    async fn appointments(&self) -> Vec<AppointmentInfo>;

    /// Schedule summary, when the current page is a schedule detail page.
    async fn schedule(&self) -> Option<ScheduleView>;

    /// Progress summary, when the current page is a progress detail page.
    async fn progress(&self) -> Option<ProgressView>;
}
