//! Patient dashboard: greet and route to booking or the detox dashboard.

use vaani_core::normalize::{YesNo, contains_any};
use vaani_core::paths;
use vaani_dialog::{AskOutcome, ListenOptions, Reply};

use crate::assistant::Assistant;
use crate::flows::FlowEnd;

const BOOKING_KEYWORDS: &[&str] = &["book detox", "book therapy", "book", "detox therapy"];
const DASHBOARD_KEYWORDS: &[&str] = &["detox dashboard", "dashboard"];

const HINT: &str = "I didn't catch that. Please say 'Book Detox Therapy' or 'Detox Dashboard'.";

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    let name = assistant
        .host
        .display_name()
        .await
        .unwrap_or_else(|| assistant.config.fallback_display_name.clone());
    assistant
        .engine
        .say(&format!(
            "Welcome, {name}. Would you like to book detox therapy or open the detox dashboard?"
        ))
        .await;

    let listen = ListenOptions::default();
    for _attempt in 0..assistant.config.dialog.max_attempts {
        let heard = match assistant.engine.prompted_reply(&listen).await {
            Reply::Closed => return FlowEnd::SignedOut,
            Reply::Heard(text) => text,
            Reply::Silence => String::new(),
        };

        if contains_any(&heard, BOOKING_KEYWORDS) {
            return confirm_and_go(
                assistant,
                "Open the detox booking page now?",
                "Opening the booking page.",
                paths::BOOK_DETOX,
            )
            .await;
        }
        if contains_any(&heard, DASHBOARD_KEYWORDS) {
            return confirm_and_go(
                assistant,
                "Open the Detox Dashboard now?",
                "Opening the Detox Dashboard.",
                paths::DETOX_DASHBOARD,
            )
            .await;
        }
        assistant.engine.say(HINT).await;
    }
    FlowEnd::Stayed
}

/// A recognized keyword still gets confirmed before leaving the page; a
/// declined confirmation ends the flow rather than re-entering the loop.
async fn confirm_and_go(
    assistant: &Assistant,
    question: &str,
    announcement: &str,
    path: &str,
) -> FlowEnd {
    match assistant.engine.ask_yes_no(question).await {
        AskOutcome::Closed => FlowEnd::SignedOut,
        AskOutcome::Answer(YesNo::Yes) => {
            assistant.engine.say(announcement).await;
            assistant.nav.go(path);
            FlowEnd::Navigated
        }
        AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => FlowEnd::Stayed,
    }
}
