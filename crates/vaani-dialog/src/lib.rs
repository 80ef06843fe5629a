#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod engine;
pub mod error;
pub mod listen;
pub mod session;
pub mod speak;

pub use backend::{
    Hypothesis, ListenOptions, RecognitionPass, RecognitionUpdate, RecognizerBackend,
    SpeakOptions, SynthesizerBackend, VoiceProfile,
};
pub use engine::{AskOptions, AskOutcome, DEFAULT_REPROMPT, DialogConfig, DialogEngine, Reply};
pub use error::DialogError;
pub use listen::SpeechInput;
pub use session::{AssistantSession, AssistantStatus, SessionEvent};
pub use speak::{SpeechOutput, pick_preferred_voice};

// Silence unused dev-dependency warnings until we add mock-based tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
