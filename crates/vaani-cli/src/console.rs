//! Console speech backends: typed lines in, printed lines out.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use vaani_core::Navigator;
use vaani_dialog::{
    DialogError, ListenOptions, RecognitionPass, RecognitionUpdate, RecognizerBackend,
    SpeakOptions, SynthesizerBackend, VoiceProfile,
};

/// Recognizer fed by terminal input.
///
/// One background thread pumps stdin lines into a queue; each listening
/// pass takes the next line. A pass that ends without input, stopped or
/// timed out, leaves the queue untouched, so typed lines are never lost.
pub struct ConsoleRecognizer {
    lines: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl ConsoleRecognizer {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
            // EOF: the closed queue turns every later listen into silence.
        });
        Self {
            lines: Arc::new(tokio::sync::Mutex::new(rx)),
        }
    }
}

impl Default for ConsoleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecognizerBackend for ConsoleRecognizer {
    async fn start(&self, _options: &ListenOptions) -> Result<RecognitionPass, DialogError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        {
            let mut out = io::stdout().lock();
            let _ = write!(out, "you> ");
            let _ = out.flush();
        }

        let lines = Arc::clone(&self.lines);
        tokio::spawn(async move {
            let mut lines = lines.lock().await;
            tokio::select! {
                line = lines.recv() => {
                    let text = line.unwrap_or_default();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        let _ = tx.send(RecognitionUpdate::final_text(trimmed));
                    }
                }
                _ = &mut stop_rx => {}
            }
            // `tx` drops here; the engine observes the pass closing.
        });

        Ok(RecognitionPass::new(rx, stop_tx))
    }

    async fn probe_microphone(&self) -> Result<(), DialogError> {
        Ok(())
    }
}

/// Synthesizer that prints every spoken line.
pub struct ConsoleSynthesizer;

#[async_trait]
impl SynthesizerBackend for ConsoleSynthesizer {
    async fn voices(&self) -> Vec<VoiceProfile> {
        vec![VoiceProfile {
            name: "Console".to_string(),
            language: "en-IN".to_string(),
        }]
    }

    async fn speak(
        &self,
        text: &str,
        _voice: Option<&VoiceProfile>,
        _options: &SpeakOptions,
    ) -> Result<(), DialogError> {
        println!("assistant> {text}");
        Ok(())
    }

    fn cancel(&self) {}
}

/// Navigator that tracks the current path and prints each move.
pub struct ConsoleNavigator {
    path: std::sync::Mutex<String>,
}

impl ConsoleNavigator {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: std::sync::Mutex::new(path.to_string()),
        }
    }

    /// The path the last navigation landed on.
    #[must_use]
    pub fn current(&self) -> String {
        self.path.lock().unwrap().clone()
    }
}

impl Navigator for ConsoleNavigator {
    fn go(&self, path: &str) {
        println!("[navigate] {path}");
        *self.path.lock().unwrap() = path.to_string();
    }
}
