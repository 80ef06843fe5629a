//! Detox dashboard: route to a schedule or progress detail page.

use std::time::Duration;

use vaani_core::{AppointmentInfo, paths};
use vaani_dialog::{AskOutcome, ListenOptions, Reply};

use crate::assistant::Assistant;
use crate::flows::FlowEnd;

#[derive(Clone, Copy)]
enum View {
    Schedule,
    Progress,
}

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    let appointments = assistant.host.appointments().await;
    if appointments.is_empty() {
        assistant
            .engine
            .say("You have no detox therapy appointments yet. You can book one from here.")
            .await;
        return FlowEnd::Stayed;
    }

    assistant
        .engine
        .say("On Detox Dashboard. Say View Schedule or View Progress.")
        .await;

    let listen = ListenOptions {
        safety_timeout: Duration::from_secs(8),
        dictation: false,
        ..ListenOptions::default()
    };
    let mut view = None;
    for _attempt in 0..assistant.config.dialog.max_attempts {
        match assistant.engine.prompted_reply(&listen).await {
            Reply::Closed => return FlowEnd::SignedOut,
            Reply::Heard(text) => {
                let lowered = text.to_lowercase();
                if lowered.contains("schedule") {
                    view = Some(View::Schedule);
                } else if lowered.contains("progress") {
                    view = Some(View::Progress);
                }
            }
            Reply::Silence => {}
        }
        if view.is_some() {
            break;
        }
        assistant
            .engine
            .say("Please say 'View Schedule' or 'View Progress'.")
            .await;
    }
    let Some(view) = view else {
        assistant.engine.say("Unable to capture your choice.").await;
        return FlowEnd::Stayed;
    };

    let chosen = if appointments.len() == 1 {
        &appointments[0]
    } else {
        assistant
            .engine
            .say("You have multiple detox appointments.")
            .await;
        match assistant
            .engine
            .choose_from_list(
                "Please choose an appointment by number or name.",
                &appointments,
                appointment_label,
            )
            .await
        {
            AskOutcome::Closed => return FlowEnd::SignedOut,
            AskOutcome::GaveUp => {
                assistant.engine.say("Unable to choose an appointment.").await;
                return FlowEnd::Stayed;
            }
            AskOutcome::Answer(appointment) => appointment,
        }
    };

    match view {
        View::Schedule => {
            if !chosen.has_schedule {
                tracing::debug!(id = %chosen.id, "Card shows no schedule link");
            }
            assistant.engine.say("Opening schedule.").await;
            assistant.nav.go(&paths::detox_schedule(&chosen.id));
        }
        View::Progress => {
            if !chosen.has_progress {
                tracing::debug!(id = %chosen.id, "Card shows no progress link");
            }
            assistant.engine.say("Opening progress.").await;
            assistant.nav.go(&paths::detox_progress(&chosen.id));
        }
    }
    FlowEnd::Navigated
}

/// Cards without a plan title are read as a generic detox plan.
fn appointment_label(appointment: &AppointmentInfo) -> &str {
    if appointment.plan.is_empty() {
        "Detox Plan"
    } else {
        &appointment.plan
    }
}
