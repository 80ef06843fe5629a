//! Detox progress page: read the summary aloud, then offer close or back.

use vaani_core::ProgressView;

use crate::assistant::Assistant;
use crate::flows::{self, FlowEnd};

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    if let Some(view) = assistant.host.progress().await {
        let summary = summary_line(&view);
        if !summary.is_empty() {
            assistant.engine.say(&summary).await;
        }

        if let Some(day) = &view.first_day {
            if !day.title.is_empty() {
                assistant.engine.say(&day.title).await;
            }
            if let Some(score) = &day.score {
                assistant.engine.say(&format!("Progress score {score}")).await;
            }
            if let Some(vitals) = day.vitals.first() {
                if !vitals.is_empty() {
                    assistant.engine.say(&format!("Vitals example: {vitals}")).await;
                }
            }
        }
    }

    flows::close_or_back(assistant).await
}

/// Join the non-empty summary fields into one spoken sentence.
fn summary_line(view: &ProgressView) -> String {
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
    if !view.status.is_empty() {
        parts.push(format!("Status {}", view.status));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}.", parts.join(". "))
    }
}
