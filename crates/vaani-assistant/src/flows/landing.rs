//! Landing page: offer to continue into the patient login.

use vaani_core::normalize::YesNo;
use vaani_core::paths;
use vaani_dialog::AskOutcome;

use crate::assistant::Assistant;
use crate::flows::FlowEnd;

const INTRO: &str = "If you want to continue exploring Panchakarma services, \
say 'Yes and Continue'. If not, click the cross and continue.";

pub(crate) async fn run(assistant: &Assistant) -> FlowEnd {
    assistant.engine.say(INTRO).await;

    match assistant.engine.ask_yes_no("Would you like to continue?").await {
        AskOutcome::Closed => FlowEnd::SignedOut,
        AskOutcome::Answer(YesNo::Yes) => open_login(assistant).await,
        AskOutcome::Answer(YesNo::No) => {
            assistant.engine.say("Okay. Closing voice assistant.").await;
            assistant.engine.close().await;
            FlowEnd::Dismissed
        }
        AskOutcome::GaveUp => FlowEnd::Stayed,
    }
}

async fn open_login(assistant: &Assistant) -> FlowEnd {
    match assistant.engine.ask_yes_no("Open Patient Login now?").await {
        AskOutcome::Closed => FlowEnd::SignedOut,
        AskOutcome::Answer(YesNo::Yes) => {
            assistant.engine.say("Opening Patient Login.").await;
            assistant.nav.go(paths::LOGIN);
            FlowEnd::Navigated
        }
        AskOutcome::Answer(YesNo::No) | AskOutcome::GaveUp => {
            assistant.engine.say("Okay, staying here.").await;
            FlowEnd::Stayed
        }
    }
}
