//! Turn-taking primitives: `say`, `ask`, `ask_yes_no`, `choose_from_list`.
//!
//! The engine sequences playback and capture so they never overlap, keeps
//! the session transcript, and turns close phrases heard during any listen
//! into a session-wide cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::time::sleep;

use vaani_core::Page;
use vaani_core::normalize::{YesNo, digits_from_words, is_close_command, yes_no};

use crate::backend::{ListenOptions, RecognizerBackend, SpeakOptions, SynthesizerBackend};
use crate::error::DialogError;
use crate::listen::SpeechInput;
use crate::session::{AssistantSession, AssistantStatus, SessionEvent};
use crate::speak::SpeechOutput;

/// Spoken when an ask attempt produced nothing usable.
pub const DEFAULT_REPROMPT: &str = "I did not catch that, please repeat.";

/// Reprompt for yes/no questions.
const YES_NO_REPROMPT: &str = "I didn't catch that, please say Yes or No.";

/// Read before a numbered option list.
const LIST_OPTIONS_INTRO: &str = "Here are your options. You can say the number or the name.";

/// Reprompt when a list choice was not understood.
const LIST_REPROMPT: &str = "I didn't catch that. Please say the number or the name again.";

/// Options past this count are not read aloud, to keep prompts short.
const MAX_SPOKEN_OPTIONS: usize = 8;

// ── Configuration ───────────────────────────────────────────────────────────

/// Timing and retry settings for the engine.
#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Pause between a spoken prompt and the attention cue.
    pub pre_cue_pause: Duration,

    /// Pause between the cue and the start of capture.
    pub post_cue_pause: Duration,

    /// Trailing-silence window ending a listen after its last result.
    pub silence_window: Duration,

    /// Default hard cap on a single listen.
    pub listen_timeout: Duration,

    /// Hard cap on yes/no listens, which expect a one-word answer.
    pub yes_no_timeout: Duration,

    /// Attempts before an ask-family call gives up.
    pub max_attempts: u32,

    /// How long the first utterance may wait for voice enumeration.
    pub voices_wait: Duration,

    /// Delivery settings for all spoken prompts.
    pub speak: SpeakOptions,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            pre_cue_pause: Duration::from_millis(350),
            post_cue_pause: Duration::from_millis(220),
            silence_window: Duration::from_millis(1200),
            listen_timeout: Duration::from_secs(10),
            yes_no_timeout: Duration::from_secs(6),
            max_attempts: 3,
            voices_wait: Duration::from_millis(1200),
            speak: SpeakOptions::default(),
        }
    }
}

/// Per-call settings for [`DialogEngine::ask`].
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Spoken when an attempt produced nothing usable.
    pub reprompt: String,

    /// Attempts before giving up.
    pub max_attempts: u32,

    /// Listen settings for each attempt.
    pub listen: ListenOptions,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            reprompt: DEFAULT_REPROMPT.to_string(),
            max_attempts: 3,
            listen: ListenOptions::default(),
        }
    }
}

// ── Outcomes ────────────────────────────────────────────────────────────────

/// Result of an ask-family call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome<T> {
    /// A usable answer was captured.
    Answer(T),

    /// Every attempt failed; the caller winds the flow down gracefully.
    GaveUp,

    /// A close phrase ended the session mid-question.
    Closed,
}

/// One close-checked listen result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The trimmed utterance.
    Heard(String),

    /// Nothing usable was captured.
    Silence,

    /// A close phrase ended the session.
    Closed,
}

// ── Engine ──────────────────────────────────────────────────────────────────

/// Drives one spoken conversation over the speech backends.
///
/// All primitives take `&self`; the single audio slot inside serializes
/// playback and capture so calls can never talk over each other.
pub struct DialogEngine {
    output: SpeechOutput,

    /// Capture side; absent when the host has no recognizer.
    input: Option<SpeechInput>,

    session: Mutex<AssistantSession>,

    /// Exclusive slot for the one in-flight playback or capture operation.
    audio_op: Mutex<()>,

    config: DialogConfig,
}

impl DialogEngine {
    /// Create an engine over the given backends.
    ///
    /// Returns the engine and the receiver for [`SessionEvent`]s.
    #[must_use]
    pub fn new(
        recognizer: Option<Arc<dyn RecognizerBackend>>,
        synthesizer: Option<Arc<dyn SynthesizerBackend>>,
        config: DialogConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let output = SpeechOutput::new(synthesizer, config.voices_wait, config.speak.clone());
        let input = recognizer.map(|r| SpeechInput::new(r, config.silence_window));

        let engine = Self {
            output,
            input,
            session: Mutex::new(AssistantSession::new(event_tx)),
            audio_op: Mutex::new(()),
            config,
        };
        (engine, event_rx)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// Open the session: probe the microphone, activate, and announce.
    ///
    /// Fails when no recognizer backend is attached or a session is already
    /// active. A denied microphone probe is logged but does not fail the
    /// open; the first listen will simply hear nothing.
    pub async fn open(&self) -> Result<(), DialogError> {
        let Some(input) = &self.input else {
            return Err(DialogError::RecognizerUnavailable);
        };

        {
            let session = self.session.lock().await;
            if session.is_active() {
                return Err(DialogError::AlreadyActive);
            }
        }

        if let Err(error) = input.probe_microphone().await {
            tracing::warn!(%error, "Microphone probe failed");
        }

        {
            let mut session = self.session.lock().await;
            session.activate();
            session.log_assistant("Voice mode enabled.");
        }
        tracing::info!("Voice session opened");

        self.say("Voice assistant enabled.").await;
        Ok(())
    }

    /// Close the session, cancelling any playback. Idempotent.
    pub async fn close(&self) {
        self.output.cancel();
        let mut session = self.session.lock().await;
        if !session.is_active() {
            return;
        }
        session.deactivate();
        session.log_assistant("Voice mode closed.");
        tracing::info!("Voice session closed");
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_active()
    }

    pub async fn page(&self) -> Page {
        self.session.lock().await.page()
    }

    pub async fn set_page(&self, page: Page) {
        self.session.lock().await.set_page(page);
    }

    // ── Primitives ──────────────────────────────────────────────────────────

    /// Speak one line: transcript row, playback, status flip.
    pub async fn say(&self, text: &str) {
        let _audio = self.audio_op.lock().await;
        {
            let mut session = self.session.lock().await;
            session.set_status(AssistantStatus::Speaking);
            session.log_assistant(text);
        }
        self.output.speak(text).await;
        self.session.lock().await.set_status(AssistantStatus::Ready);
    }

    /// Cue, listen once, and screen the result for a close phrase.
    ///
    /// A close phrase ends the session before this returns; the caller
    /// only has to propagate [`Reply::Closed`] outward.
    pub async fn prompted_reply(&self, options: &ListenOptions) -> Reply {
        sleep(self.config.pre_cue_pause).await;
        self.output.cue().await;
        sleep(self.config.post_cue_pause).await;

        match self.listen(options).await {
            Some(text) if is_close_command(&text) => {
                tracing::info!(heard = %text, "Close phrase heard");
                self.close().await;
                Reply::Closed
            }
            Some(text) => Reply::Heard(text),
            None => Reply::Silence,
        }
    }

    /// One capture pass: cancel playback, take the audio slot, listen.
    async fn listen(&self, options: &ListenOptions) -> Option<String> {
        let input = self.input.as_ref()?;

        // Cancel first so an in-flight `say` resolves and frees the slot,
        // and the microphone never picks up our own speech.
        self.output.cancel();
        let _audio = self.audio_op.lock().await;

        self.session
            .lock()
            .await
            .set_status(AssistantStatus::Listening);

        let heard = input.listen(options).await;

        {
            let mut session = self.session.lock().await;
            session.set_status(AssistantStatus::Ready);
            if let Some(text) = &heard {
                session.log_user(text);
            }
        }
        heard
    }

    // ── Ask family ──────────────────────────────────────────────────────────

    /// Prompt, listen, parse; retry with the reprompt until an answer or
    /// the attempt budget runs out.
    ///
    /// `parse` turns a heard utterance into a value, `None` rejecting it.
    pub async fn ask<T, F>(&self, prompt: &str, options: &AskOptions, mut parse: F) -> AskOutcome<T>
    where
        F: FnMut(&str) -> Option<T> + Send,
        T: Send,
    {
        for attempt in 1..=options.max_attempts {
            self.say(prompt).await;
            match self.prompted_reply(&options.listen).await {
                Reply::Closed => return AskOutcome::Closed,
                Reply::Heard(text) => {
                    if let Some(value) = parse(&text) {
                        return AskOutcome::Answer(value);
                    }
                    tracing::debug!(attempt, heard = %text, "Answer rejected");
                }
                Reply::Silence => tracing::debug!(attempt, "Nothing heard"),
            }
            self.say(&options.reprompt).await;
        }
        AskOutcome::GaveUp
    }

    /// Ask a yes/no question: short non-dictation listens biased toward
    /// the words "yes" and "no".
    pub async fn ask_yes_no(&self, question: &str) -> AskOutcome<YesNo> {
        let listen = ListenOptions {
            safety_timeout: self.config.yes_no_timeout,
            dictation: false,
            vocabulary: vec!["yes".to_string(), "no".to_string()],
            ..ListenOptions::default()
        };

        for attempt in 1..=self.config.max_attempts {
            self.say(question).await;
            match self.prompted_reply(&listen).await {
                Reply::Closed => return AskOutcome::Closed,
                Reply::Heard(text) => {
                    if let Some(answer) = yes_no(&text) {
                        return AskOutcome::Answer(answer);
                    }
                    tracing::debug!(attempt, heard = %text, "Not a yes or a no");
                }
                Reply::Silence => tracing::debug!(attempt, "Nothing heard"),
            }
            self.say(YES_NO_REPROMPT).await;
        }
        AskOutcome::GaveUp
    }

    /// Read a numbered list aloud and let the user pick by index or name.
    ///
    /// At most the first eight items are read and selectable. The answer
    /// may be a spoken index ("two", "2") or a substring of an item label.
    pub async fn choose_from_list<'a, T, L>(
        &self,
        prompt: &str,
        items: &'a [T],
        label: L,
    ) -> AskOutcome<&'a T>
    where
        L: for<'b> Fn(&'b T) -> &'b str + Send + Sync,
        T: Sync,
    {
        if items.is_empty() {
            return AskOutcome::GaveUp;
        }
        let spoken = &items[..items.len().min(MAX_SPOKEN_OPTIONS)];

        self.say(prompt).await;
        self.say(LIST_OPTIONS_INTRO).await;
        for (index, item) in spoken.iter().enumerate() {
            self.say(&format!("{}. {}", index + 1, label(item))).await;
        }

        let listen = ListenOptions {
            safety_timeout: self.config.listen_timeout,
            ..ListenOptions::default()
        };
        for attempt in 1..=self.config.max_attempts {
            match self.prompted_reply(&listen).await {
                Reply::Closed => return AskOutcome::Closed,
                Reply::Heard(text) => {
                    if let Some(item) = pick_from(spoken, &label, &text) {
                        return AskOutcome::Answer(item);
                    }
                    tracing::debug!(attempt, heard = %text, "No option matched");
                }
                Reply::Silence => tracing::debug!(attempt, "Nothing heard"),
            }
            self.say(LIST_REPROMPT).await;
        }
        AskOutcome::GaveUp
    }
}

/// Match a heard utterance against list items: spoken index first, then a
/// case-insensitive substring of the label. Out-of-range indexes fall back
/// to the name match; empty utterances match nothing.
fn pick_from<'a, T, L>(items: &'a [T], label: &L, heard: &str) -> Option<&'a T>
where
    L: for<'b> Fn(&'b T) -> &'b str,
{
    let heard = heard.trim().to_lowercase();
    if heard.is_empty() {
        return None;
    }

    let digits = digits_from_words(&heard);
    if !digits.is_empty() {
        if let Ok(number) = digits.parse::<usize>() {
            if (1..=items.len()).contains(&number) {
                return Some(&items[number - 1]);
            }
        }
    }

    items
        .iter()
        .find(|item| label(item).to_lowercase().contains(&heard))
}
