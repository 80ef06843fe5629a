//! Page dispatch: exactly one flow owns each page.

use vaani_core::Page;

use crate::assistant::Assistant;
use crate::flows::{self, FlowEnd};

/// Spoken on pages no flow owns.
const UNSUPPORTED_PAGE: &str =
    "Voice assistant is ready. Navigate to a supported page to continue.";

/// Run the flow owning `page` to completion.
pub(crate) async fn dispatch(assistant: &Assistant, page: Page) -> FlowEnd {
    match page {
        Page::Landing => flows::landing::run(assistant).await,
        Page::Login => flows::login::run(assistant).await,
        Page::PatientDashboard => flows::dashboard::run(assistant).await,
        Page::BookDetox => flows::book_detox::run(assistant).await,
        Page::DetoxDashboard => flows::detox_dashboard::run(assistant).await,
        Page::DetoxSchedule => flows::schedule::run(assistant).await,
        Page::DetoxProgress => flows::progress::run(assistant).await,
        Page::Unsupported => {
            assistant.engine.say(UNSUPPORTED_PAGE).await;
            FlowEnd::Stayed
        }
    }
}
