//! Playback half of the engine: voice selection and single-utterance speech.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

use crate::backend::{SpeakOptions, SynthesizerBackend, VoiceProfile};

/// Language tags tried in order when picking a voice.
const VOICE_PREFERENCES: [&str; 4] = ["en-in", "en-gb", "en-us", "en"];

/// Poll interval while waiting for the backend to enumerate voices.
const VOICE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Pick the most suitable voice from those on offer.
///
/// Tries each preferred language tag as a case-insensitive prefix, then a
/// voice whose display name mentions "india", then the first voice listed.
#[must_use]
pub fn pick_preferred_voice(voices: &[VoiceProfile]) -> Option<VoiceProfile> {
    for preference in VOICE_PREFERENCES {
        if let Some(voice) = voices
            .iter()
            .find(|v| v.language.to_lowercase().starts_with(preference))
        {
            return Some(voice.clone());
        }
    }
    // Name hint for engines that report unusual language tags.
    if let Some(voice) = voices
        .iter()
        .find(|v| v.name.to_lowercase().contains("india"))
    {
        return Some(voice.clone());
    }
    voices.first().cloned()
}

/// Speaks one utterance at a time through the synthesizer backend.
///
/// The resolved voice is memoized for the lifetime of this value; a fresh
/// instance (new session) resolves again. With no backend attached every
/// operation is a silent no-op, so flows keep working without sound.
pub struct SpeechOutput {
    synth: Option<Arc<dyn SynthesizerBackend>>,

    /// Memoized voice choice. Stays empty until the backend lists voices,
    /// so early failed lookups are retried on the next utterance.
    voice: Mutex<Option<VoiceProfile>>,

    /// How long the first utterance may wait for voice enumeration.
    voices_wait: Duration,

    options: SpeakOptions,
}

impl SpeechOutput {
    #[must_use]
    pub fn new(
        synth: Option<Arc<dyn SynthesizerBackend>>,
        voices_wait: Duration,
        options: SpeakOptions,
    ) -> Self {
        Self {
            synth,
            voice: Mutex::new(None),
            voices_wait,
            options,
        }
    }

    /// Whether a synthesizer backend is attached.
    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.synth.is_some()
    }

    /// Speak `text` to completion.
    ///
    /// Anything already queued or playing is cancelled first so the new
    /// utterance starts immediately. Backend faults are logged and
    /// swallowed: a synthesis hiccup must not abort the conversation.
    pub async fn speak(&self, text: &str) {
        let Some(synth) = &self.synth else {
            tracing::warn!("Speech synthesis unavailable, dropping utterance");
            return;
        };

        let voice = self.resolve_voice(synth.as_ref()).await;

        synth.cancel();
        if let Err(error) = synth.speak(text, voice.as_ref(), &self.options).await {
            tracing::warn!(%error, "Speech synthesis failed");
        }
    }

    /// Stop any in-flight or queued playback.
    pub fn cancel(&self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }

    /// Sound the short attention cue that precedes a listen.
    pub async fn cue(&self) {
        if let Some(synth) = &self.synth {
            if let Err(error) = synth.play_cue().await {
                tracing::debug!(%error, "Attention cue failed");
            }
        }
    }

    /// Resolve the voice to use, waiting briefly for enumeration.
    async fn resolve_voice(&self, synth: &dyn SynthesizerBackend) -> Option<VoiceProfile> {
        let mut cached = self.voice.lock().await;
        if cached.is_some() {
            return cached.clone();
        }

        let deadline = Instant::now() + self.voices_wait;
        let mut voices = synth.voices().await;
        while voices.is_empty() && Instant::now() < deadline {
            sleep(VOICE_POLL_INTERVAL).await;
            voices = synth.voices().await;
        }

        let picked = pick_preferred_voice(&voices);
        if picked.is_some() {
            cached.clone_from(&picked);
        }
        picked
    }
}
