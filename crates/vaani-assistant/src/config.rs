//! Assistant-level configuration.

use std::time::Duration;

use vaani_dialog::DialogConfig;

/// Settings for one assistant activation.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Engine timing and retry settings.
    pub dialog: DialogConfig,

    /// Pause between the opening announcement and the page flow, giving the
    /// host page time to finish rendering the data the flow will read.
    pub page_settle: Duration,

    /// Authentication calls allowed per activation, counted across login
    /// flow restarts.
    pub login_attempt_budget: u32,

    /// Greeting name when the host session does not know the patient.
    pub fallback_display_name: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            dialog: DialogConfig::default(),
            page_settle: Duration::from_millis(200),
            login_attempt_budget: 12,
            fallback_display_name: "Patient".to_string(),
        }
    }
}
