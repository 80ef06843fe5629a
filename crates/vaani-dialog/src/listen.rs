//! Capture half of the engine: one-shot listens over a recognition pass.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};

use crate::backend::{ListenOptions, RecognizerBackend};

/// Runs bounded listening passes against the recognizer backend.
///
/// A pass collects final segments (space-joined) and keeps the latest
/// interim text as a fallback. It ends on the first of: the backend ending
/// the pass, a trailing-silence window elapsing after the last result, or
/// the hard safety timeout.
pub struct SpeechInput {
    recognizer: Arc<dyn RecognizerBackend>,

    /// How long after the last result the pass is considered finished.
    silence_window: Duration,
}

impl SpeechInput {
    #[must_use]
    pub fn new(recognizer: Arc<dyn RecognizerBackend>, silence_window: Duration) -> Self {
        Self {
            recognizer,
            silence_window,
        }
    }

    /// Check that audio capture is permitted, releasing the device right away.
    pub async fn probe_microphone(&self) -> Result<(), crate::error::DialogError> {
        self.recognizer.probe_microphone().await
    }

    /// Listen once and return the trimmed transcript, or `None` when the
    /// pass produced nothing usable.
    ///
    /// A failure to start recognition is treated as an empty pass; callers
    /// already handle the no-input path with reprompts.
    pub async fn listen(&self, options: &ListenOptions) -> Option<String> {
        let mut pass = match self.recognizer.start(options).await {
            Ok(pass) => pass,
            Err(error) => {
                tracing::warn!(%error, "Recognition start failed");
                return None;
            }
        };

        let safety = sleep(options.safety_timeout);
        tokio::pin!(safety);

        let mut finals: Vec<String> = Vec::new();
        let mut interim = String::new();
        // Armed by the first result; until then only the safety timer runs.
        let mut silence_deadline: Option<Instant> = None;

        loop {
            let silence = async {
                match silence_deadline {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                update = pass.next() => {
                    let Some(update) = update else { break };
                    let text = update.best_text().trim().to_string();
                    if update.is_final {
                        if !text.is_empty() {
                            finals.push(text);
                        }
                    } else if !text.is_empty() {
                        interim = text;
                    }
                    silence_deadline = Some(Instant::now() + self.silence_window);
                }
                () = &mut safety => {
                    tracing::debug!("Listen pass hit the safety timeout");
                    break;
                }
                () = silence => break,
            }
        }
        pass.stop();

        let text = if finals.is_empty() {
            interim
        } else {
            finals.join(" ")
        };
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}
