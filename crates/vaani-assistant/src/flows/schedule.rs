//! Detox schedule page: read the summary aloud, then offer close or back.

use vaani_core::ScheduleView;

use crate::assistant::Assistant;
use crate::flows::{self, FlowEnd};

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    if let Some(view) = assistant.host.schedule().await {
        let summary = summary_line(&view);
        if !summary.is_empty() {
            assistant.engine.say(&summary).await;
        }

        if let Some(day) = &view.first_day {
            if !day.title.is_empty() {
                assistant.engine.say(&day.title).await;
            }
            // Only the first two slots are read; a full day would drone on.
            for slot in day.slots.iter().take(2) {
                if !slot.is_empty() {
                    assistant.engine.say(slot).await;
                }
            }
        }
    }

    flows::close_or_back(assistant).await
}

/// Join the non-empty summary fields into one spoken sentence.
fn summary_line(view: &ScheduleView) -> String {
    let mut parts = Vec::new();
    if !view.plan.is_empty() {
        parts.push(format!("Plan {}", view.plan));
    }
    if !view.start_date.is_empty() {
        parts.push(format!("Start date {}", view.start_date));
    }
    if !view.duration.is_empty() {
        parts.push(format!("Duration {}", view.duration));
    }
    if !view.therapy_time.is_empty() {
        parts.push(format!("Therapy time {}", view.therapy_time));
    }
    if !view.status.is_empty() {
        parts.push(format!("Status {}", view.status));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}.", parts.join(". "))
    }
}
