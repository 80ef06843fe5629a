//! Patient login: spoken credentials with confirmation rounds and a
//! password-candidate ladder.
//!
//! A spoken password rarely transcribes exactly, so the flow reconstructs a
//! small set of candidate forms and submits each until one signs in. Failed
//! rounds restart the flow from the username, bounded by the activation-wide
//! attempt budget.

use std::time::Duration;

use vaani_core::normalize::{self, YesNo};
use vaani_core::{LoginRequest, LoginResponse, paths};
use vaani_dialog::{AskOptions, AskOutcome, ListenOptions};

use crate::assistant::Assistant;
use crate::flows::FlowEnd;

/// Rounds of ask-then-confirm before the username is abandoned.
const USERNAME_ROUNDS: u32 = 3;

const USERNAME_PROMPT: &str =
    "Please say your username. You can say your full name or your email.";

const PRIVACY_WARNING: &str =
    "Please say your password. For your security, ensure you are in a private space.";

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    let mut budget = assistant.config.login_attempt_budget;

    loop {
        let username = match capture_username(assistant).await {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::GaveUp => {
                assistant
                    .engine
                    .say("Unable to capture your username. Closing voice assistant.")
                    .await;
                return FlowEnd::Stayed;
            }
            AskOutcome::Answer(username) => username,
        };

        assistant.engine.say(PRIVACY_WARNING).await;
        let password_ask = AskOptions {
            listen: ListenOptions {
                safety_timeout: Duration::from_secs(15),
                ..ListenOptions::default()
            },
            ..AskOptions::default()
        };
        let spoken_password = match assistant
            .engine
            .ask("Speak your password now.", &password_ask, |heard| {
                let trimmed = heard.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::GaveUp => {
                assistant
                    .engine
                    .say("Unable to capture password. Closing voice assistant.")
                    .await;
                return FlowEnd::Stayed;
            }
            AskOutcome::Answer(password) => password,
        };

        match assistant
            .engine
            .ask_yes_no("Shall I proceed to sign you in?")
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::Answer(YesNo::Yes) => {}
            AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => {
                assistant.engine.say("Cancelled login.").await;
                return FlowEnd::Stayed;
            }
        }

        if let Some(response) =
            submit_candidates(assistant, &username, &spoken_password, &mut budget).await
        {
            assistant
                .engine
                .say("Login successful. Opening your dashboard.")
                .await;
            let target = response
                .redirect
                .unwrap_or_else(|| paths::PATIENT_DASHBOARD.to_string());
            assistant.nav.go(&target);
            return FlowEnd::Navigated;
        }

        if budget == 0 {
            assistant
                .engine
                .say("Too many sign-in attempts. Please use the login form instead.")
                .await;
            return FlowEnd::Stayed;
        }

        assistant
            .engine
            .say("Invalid credentials. Please try again.")
            .await;
    }
}

/// Ask for the username and read it back until the user confirms it.
async fn capture_username(assistant: &Assistant) -> AskOutcome<String> {
    let username_ask = AskOptions {
        listen: ListenOptions {
            safety_timeout: Duration::from_secs(18),
            ..ListenOptions::default()
        },
        ..AskOptions::default()
    };

    for _round in 0..USERNAME_ROUNDS {
        let candidate = match assistant
            .engine
            .ask(USERNAME_PROMPT, &username_ask, parse_username)
            .await
        {
            AskOutcome::Closed => return AskOutcome::Closed,
            AskOutcome::GaveUp => continue,
            AskOutcome::Answer(candidate) => candidate,
        };

        match assistant
            .engine
            .ask_yes_no(&format!("I heard '{candidate}'. Is that correct?"))
            .await
        {
            AskOutcome::Closed => return AskOutcome::Closed,
            AskOutcome::Answer(YesNo::Yes) => return AskOutcome::Answer(candidate),
            AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => {
                assistant.engine.say("Okay, let us try again.").await;
            }
        }
    }
    AskOutcome::GaveUp
}

/// A spoken username may be a plain name or a dictated email address. The
/// email-normalized form is used only when the utterance looks like one, so
/// names keep their spaces.
fn parse_username(heard: &str) -> Option<String> {
    let raw = heard.trim();
    let lowered = raw.to_lowercase();
    let normalized = normalize::email_from_speech(raw);

    let value = if normalized.contains('@')
        || lowered.contains(" dot ")
        || lowered.contains(" at ")
    {
        normalized
    } else {
        raw.to_string()
    };
    (value.len() >= 2).then_some(value)
}

/// Submit each password reconstruction until one signs in, the set runs
/// out, or the attempt budget is spent.
///
/// An unreachable portal consumes the candidate like any wrong password;
/// the caller's failure line covers both.
async fn submit_candidates(
    assistant: &Assistant,
    username: &str,
    spoken_password: &str,
    budget: &mut u32,
) -> Option<LoginResponse> {
    for candidate in normalize::password_candidates(spoken_password) {
        if *budget == 0 {
            tracing::warn!("Login attempt budget spent");
            return None;
        }
        *budget -= 1;

        let request = LoginRequest::patient(username, candidate);
        match assistant.portal.login(&request).await {
            Ok(response) if response.success => return Some(response),
            Ok(response) => {
                tracing::debug!(
                    message = response.message.as_deref().unwrap_or_default(),
                    "Password candidate rejected"
                );
            }
            Err(error) => tracing::warn!(%error, "Login request failed"),
        }
    }
    None
}
