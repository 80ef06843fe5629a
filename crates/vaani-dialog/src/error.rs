//! Dialogue engine error types.

/// Errors that can occur while driving a dialogue.
///
/// A user who answers nothing, answers nonsense, or says a close phrase is
/// not an error; those are [`AskOutcome`](crate::engine::AskOutcome)
/// variants. These are faults of the session or of a speech engine.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// No speech recognizer is available on this host.
    #[error("Speech recognition is not available on this host")]
    RecognizerUnavailable,

    /// Microphone permission was denied.
    #[error("Microphone permission denied")]
    MicrophonePermissionDenied,

    /// The recognizer failed to start a listening pass.
    #[error("Failed to start listening: {0}")]
    RecognitionStart(String),

    /// Speech synthesis failed.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// The session is already active.
    #[error("Assistant session is already active")]
    AlreadyActive,

    /// The session is not active.
    #[error("Assistant session is not active")]
    NotActive,
}
