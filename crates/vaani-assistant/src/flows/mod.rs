//! Page flows: one sequential spoken script per portal page.
//!
//! Flows never chain in-process. A flow that moves the user on issues a
//! navigation and returns; the next page's activation starts the next flow.
//! Every listen inside a flow goes through the engine, so a close phrase
//! anywhere unwinds to the caller as [`FlowEnd::SignedOut`].

use std::time::Duration;

use vaani_core::normalize::is_back_command;
use vaani_core::paths;
use vaani_dialog::{ListenOptions, Reply};

use crate::assistant::Assistant;

pub mod book_detox;
pub mod dashboard;
pub mod detox_dashboard;
pub mod landing;
pub mod login;
pub mod progress;
pub mod schedule;

/// How a flow ended; the caller decides what the session does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEnd {
    /// The flow issued a page navigation; a new activation follows there.
    Navigated,

    /// The flow finished without leaving the page; the session stays open.
    Stayed,

    /// Sign-out was requested; the caller navigates to the logout path.
    SignedOut,

    /// The session was closed without signing out.
    Dismissed,
}

/// Detail pages end by offering a way out: close the assistant or go back
/// to the detox dashboard. Anything else leaves the user on the page.
pub(crate) async fn close_or_back(assistant: &Assistant) -> FlowEnd {
    assistant
        .engine
        .say("Say Close to sign out and close the assistant, or say Back to return to the Detox Dashboard.")
        .await;

    let listen = ListenOptions {
        safety_timeout: Duration::from_secs(8),
        dictation: false,
        ..ListenOptions::default()
    };
    match assistant.engine.prompted_reply(&listen).await {
        Reply::Closed => FlowEnd::SignedOut,
        Reply::Heard(text) if is_back_command(&text) => {
            assistant
                .engine
                .say("Going back to the Detox Dashboard.")
                .await;
            assistant.nav.go(paths::DETOX_DASHBOARD);
            FlowEnd::Navigated
        }
        Reply::Heard(_) | Reply::Silence => FlowEnd::Stayed,
    }
}
