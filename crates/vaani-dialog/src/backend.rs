//! Speech engine backend traits, engine-agnostic.
//!
//! [`RecognizerBackend`] and [`SynthesizerBackend`] abstract over concrete
//! speech engines: a webview's speech API, a cloud service, or the console
//! driver used in demos. The [`DialogEngine`](crate::engine::DialogEngine)
//! operates on trait objects so engines can be swapped without touching the
//! turn logic.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::error::DialogError;

// ── Synthesis ────────────────────────────────────────────────────────────────

/// One voice offered by a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Display name, e.g. "Microsoft Heera - English (India)".
    pub name: String,
    /// BCP 47 language tag, e.g. "en-IN".
    pub language: String,
}

/// Delivery settings for spoken prompts.
#[derive(Debug, Clone)]
pub struct SpeakOptions {
    /// Language tag requested for the utterance.
    pub language: String,
    /// Speaking rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Volume, 0.0 to 1.0.
    pub volume: f32,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            language: "en-IN".to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Backend-agnostic text-to-speech engine.
#[async_trait]
pub trait SynthesizerBackend: Send + Sync {
    /// Voices currently available. May be empty while the engine is still
    /// enumerating; callers poll until it settles.
    async fn voices(&self) -> Vec<VoiceProfile>;

    /// Speak one utterance to completion.
    ///
    /// Resolves when playback ends, including playback that was cancelled
    /// mid-utterance. Engine faults are errors; cancellation is not.
    async fn speak(
        &self,
        text: &str,
        voice: Option<&VoiceProfile>,
        options: &SpeakOptions,
    ) -> Result<(), DialogError>;

    /// Stop any in-flight or queued playback. Must not block.
    fn cancel(&self);

    /// Play the short attention cue that precedes a listening pass.
    async fn play_cue(&self) -> Result<(), DialogError> {
        Ok(())
    }
}

// ── Recognition ──────────────────────────────────────────────────────────────

/// Settings for one listening pass.
#[derive(Debug, Clone)]
pub struct ListenOptions {
    /// Hard cap on the whole pass, even if results keep arriving.
    pub safety_timeout: Duration,
    /// Dictation mode: interim results on, the engine keeps recognizing
    /// until silence. Off for short command words.
    pub dictation: bool,
    /// Words to bias recognition toward, when the engine supports it.
    pub vocabulary: Vec<String>,
    /// Language tag for recognition.
    pub language: String,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            safety_timeout: Duration::from_secs(10),
            dictation: true,
            vocabulary: Vec::new(),
            language: "en-IN".to_string(),
        }
    }
}

/// One alternative transcription of a speech segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    pub text: String,
    /// Engine confidence, 0.0 to 1.0.
    pub confidence: f32,
}

/// One batch of hypotheses from the recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionUpdate {
    /// Alternatives for the segment, in engine order.
    pub hypotheses: Vec<Hypothesis>,
    /// Whether the segment is final or may still be revised.
    pub is_final: bool,
}

impl RecognitionUpdate {
    /// A final update carrying a single full-confidence hypothesis.
    #[must_use]
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            hypotheses: vec![Hypothesis {
                text: text.into(),
                confidence: 1.0,
            }],
            is_final: true,
        }
    }

    /// An interim update carrying a single full-confidence hypothesis.
    #[must_use]
    pub fn interim_text(text: impl Into<String>) -> Self {
        Self {
            hypotheses: vec![Hypothesis {
                text: text.into(),
                confidence: 1.0,
            }],
            is_final: false,
        }
    }

    /// The highest-confidence hypothesis; earlier entries win ties.
    #[must_use]
    pub fn best_text(&self) -> &str {
        let mut best: Option<&Hypothesis> = None;
        for hypothesis in &self.hypotheses {
            if best.is_none_or(|b| hypothesis.confidence > b.confidence) {
                best = Some(hypothesis);
            }
        }
        best.map_or("", |h| h.text.as_str())
    }
}

/// A live listening pass.
///
/// Updates arrive on an unbounded channel. The pass ends when the engine
/// closes the channel, or from this side by dropping or stopping the
/// handle, which signals the engine to stop capturing.
#[derive(Debug)]
pub struct RecognitionPass {
    updates: mpsc::UnboundedReceiver<RecognitionUpdate>,
    // Dropped with the pass; the engine side observes the closure.
    _stop: oneshot::Sender<()>,
}

impl RecognitionPass {
    /// Builds a pass from its engine-side channel halves.
    #[must_use]
    pub fn new(
        updates: mpsc::UnboundedReceiver<RecognitionUpdate>,
        stop: oneshot::Sender<()>,
    ) -> Self {
        Self {
            updates,
            _stop: stop,
        }
    }

    /// Next update, or `None` once the engine has ended the pass.
    pub async fn next(&mut self) -> Option<RecognitionUpdate> {
        self.updates.recv().await
    }

    /// Ends the pass, signalling the engine to stop capturing.
    pub fn stop(self) {}
}

/// Backend-agnostic speech-to-text engine.
#[async_trait]
pub trait RecognizerBackend: Send + Sync {
    /// Begin a listening pass with the given options.
    async fn start(&self, options: &ListenOptions) -> Result<RecognitionPass, DialogError>;

    /// Check that audio capture is permitted, prompting the user if the
    /// host needs to.
    async fn probe_microphone(&self) -> Result<(), DialogError>;
}
