//! Detox booking: centre, plan, date, confirm, submit.
//!
//! A refused or failed submission announces what went wrong and restarts
//! the flow from the centre choice; the user exits through a close phrase
//! or by answering "no" at the confirmation.

use vaani_core::normalize::{self, YesNo};
use vaani_core::{BookingRequest, CentreInfo, DetoxPlan, detox_plans, paths};
use vaani_dialog::{AskOptions, AskOutcome};

use crate::assistant::Assistant;
use crate::flows::FlowEnd;

const DATE_PROMPT: &str = "Please say the date you want, for example, 20 September 2025.";
const DATE_REPROMPT: &str = "I didn't get the date. Please repeat.";

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    loop {
        let centres = assistant.host.centres().await;
        let centre = match assistant
            .engine
            .choose_from_list("Please choose your centre.", &centres, centre_label)
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::GaveUp => {
                assistant
                    .engine
                    .say("Unable to capture centre. Closing voice assistant.")
                    .await;
                return FlowEnd::Stayed;
            }
            AskOutcome::Answer(centre) => centre,
        };

        let plan = match assistant
            .engine
            .choose_from_list("Please choose your detox plan.", detox_plans(), plan_label)
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::GaveUp => {
                assistant
                    .engine
                    .say("Unable to capture plan. Closing voice assistant.")
                    .await;
                return FlowEnd::Stayed;
            }
            AskOutcome::Answer(plan) => plan,
        };

        let date_ask = AskOptions {
            reprompt: DATE_REPROMPT.to_string(),
            ..AskOptions::default()
        };
        let start_date = match assistant
            .engine
            .ask(DATE_PROMPT, &date_ask, |heard| {
                normalize::parse_date_ymd(heard)
            })
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::GaveUp => {
                assistant
                    .engine
                    .say("Unable to capture date. Closing voice assistant.")
                    .await;
                return FlowEnd::Stayed;
            }
            AskOutcome::Answer(date) => date,
        };

        assistant
            .engine
            .say(&format!(
                "You selected Centre: {}, Plan: {}, Date: {}. Shall I submit? Yes or No.",
                centre.name, plan.label, start_date
            ))
            .await;
        match assistant
            .engine
            .ask_yes_no("Please say Yes to submit, or No to cancel.")
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::Answer(YesNo::Yes) => {}
            AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => {
                assistant.engine.say("Cancelled booking.").await;
                return FlowEnd::Stayed;
            }
        }

        let request = BookingRequest {
            centre_id: centre.centre_id.clone(),
            plan_type: plan.id.to_string(),
            start_date,
        };
        match assistant.portal.book_detox(&request).await {
            Ok(response) if response.success => {
                assistant
                    .engine
                    .say("Your detox therapy request was submitted successfully.")
                    .await;
                return post_booking(assistant).await;
            }
            Ok(response) => {
                tracing::debug!(
                    message = response.message.as_deref().unwrap_or_default(),
                    "Booking refused"
                );
                assistant
                    .engine
                    .say("Booking failed. The date may be out of range or there was a server error. Please try again.")
                    .await;
            }
            Err(error) => {
                tracing::warn!(%error, "Booking submission failed");
                assistant
                    .engine
                    .say("Network error while submitting booking. Please try again.")
                    .await;
            }
        }
    }
}

/// After a successful booking: offer the detox dashboard, then sign-out,
/// then fall back to the patient dashboard.
async fn post_booking(assistant: &Assistant) -> FlowEnd {
    match assistant
        .engine
        .ask_yes_no("For more details, do you want to go to the Detox Dashboard?")
        .await
    {
        AskOutcome::Closed => return FlowEnd::SignedOut,
        AskOutcome::Answer(YesNo::Yes) => {
            assistant.engine.say("Opening Detox Dashboard.").await;
            assistant.nav.go(paths::DETOX_DASHBOARD);
            return FlowEnd::Navigated;
        }
        AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => {}
    }

    match assistant.engine.ask_yes_no("Do you want to sign out?").await {
        AskOutcome::Closed => FlowEnd::SignedOut,
        AskOutcome::Answer(YesNo::Yes) => {
            assistant.engine.say("Signing you out.").await;
            FlowEnd::SignedOut
        }
        AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => {
            assistant.engine.say("Okay. Remaining on the dashboard.").await;
            assistant.nav.go(paths::PATIENT_DASHBOARD);
            FlowEnd::Navigated
        }
    }
}

fn centre_label(centre: &CentreInfo) -> &str {
    &centre.name
}

fn plan_label(plan: &DetoxPlan) -> &str {
    plan.label
}
