//! Portal pages the assistant can drive and their navigation paths.

use serde::{Deserialize, Serialize};

/// One page of the care portal, each owning its own conversation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Landing,
    Login,
    PatientDashboard,
    BookDetox,
    DetoxDashboard,
    DetoxSchedule,
    DetoxProgress,
    /// A path no flow owns; the assistant only announces itself there.
    Unsupported,
}

impl Page {
    /// Human-readable name used in log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Login => "login",
            Self::PatientDashboard => "patient dashboard",
            Self::BookDetox => "book detox",
            Self::DetoxDashboard => "detox dashboard",
            Self::DetoxSchedule => "detox schedule",
            Self::DetoxProgress => "detox progress",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Resolves a location path to the page that owns it.
///
/// Matching is prefix based (except the landing page, which is exact) so
/// detail pages carrying an identifier, like `/patient/detox-schedule/42`,
/// resolve to their flow. Order matters: the dashboard prefix must be tried
/// before the detail prefixes that share `/patient/`.
#[must_use]
pub fn page_for_path(path: &str) -> Page {
    if path == "/" || path == "/landing" {
        Page::Landing
    } else if path.starts_with(paths::LOGIN) {
        Page::Login
    } else if path.starts_with(paths::PATIENT_DASHBOARD) {
        Page::PatientDashboard
    } else if path.starts_with(paths::BOOK_DETOX) {
        Page::BookDetox
    } else if path.starts_with(paths::DETOX_DASHBOARD) {
        Page::DetoxDashboard
    } else if path.starts_with("/patient/detox-schedule/") {
        Page::DetoxSchedule
    } else if path.starts_with("/patient/detox-progress/") {
        Page::DetoxProgress
    } else {
        Page::Unsupported
    }
}

/// Navigation targets used by the flows.
pub mod paths {
    pub const LANDING: &str = "/";
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const PATIENT_DASHBOARD: &str = "/patient/dashboard";
    pub const BOOK_DETOX: &str = "/patient/book-detox";
    pub const DETOX_DASHBOARD: &str = "/patient/detox-dashboard";

    /// Schedule detail page for one detox appointment.
    #[must_use]
    pub fn detox_schedule(detox_id: &str) -> String {
        format!("/patient/detox-schedule/{detox_id}")
    }

    /// Progress detail page for one detox appointment.
    #[must_use]
    pub fn detox_progress(detox_id: &str) -> String {
        format!("/patient/detox-progress/{detox_id}")
    }
}
