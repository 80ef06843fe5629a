//! Domain types shared across the assistant crates.

mod page;
mod plan;
mod transcript;

pub use page::{Page, page_for_path, paths};
pub use plan::{DetoxPlan, detox_plans};
pub use transcript::{Speaker, TranscriptEntry};
