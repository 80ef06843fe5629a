//! Assistant activation lifecycle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::sleep;

use vaani_core::{HostPage, Navigator, PortalClient, page_for_path, paths};
use vaani_dialog::{
    DialogEngine, DialogError, RecognizerBackend, SessionEvent, SynthesizerBackend,
};

use crate::config::AssistantConfig;
use crate::flows::FlowEnd;
use crate::router;

/// One assistant bound to the page hosting it.
///
/// The assistant lives as long as the page does: a flow that navigates ends
/// the instance, and the next page constructs a fresh one.
pub struct Assistant {
    pub(crate) engine: DialogEngine,
    pub(crate) host: Arc<dyn HostPage>,
    pub(crate) nav: Arc<dyn Navigator>,
    pub(crate) portal: Arc<dyn PortalClient>,
    pub(crate) config: AssistantConfig,
}

impl Assistant {
    /// Create an assistant over the given speech backends and host ports.
    ///
    /// Returns the assistant and the receiver for [`SessionEvent`]s, which
    /// the host renders as status changes and transcript rows.
    #[must_use]
    pub fn new(
        recognizer: Option<Arc<dyn RecognizerBackend>>,
        synthesizer: Option<Arc<dyn SynthesizerBackend>>,
        host: Arc<dyn HostPage>,
        nav: Arc<dyn Navigator>,
        portal: Arc<dyn PortalClient>,
        config: AssistantConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (engine, events) = DialogEngine::new(recognizer, synthesizer, config.dialog.clone());
        (
            Self {
                engine,
                host,
                nav,
                portal,
                config,
            },
            events,
        )
    }

    /// Open the session, detect the page, and run the flow that owns it.
    ///
    /// Fails when no recognizer backend is attached or a session is already
    /// active. A sign-out request from the flow (close phrase, or the
    /// post-booking "sign out" answer) has been turned into a navigation to
    /// the logout path by the time this returns.
    pub async fn activate(&self) -> Result<FlowEnd, DialogError> {
        self.engine.open().await?;

        let path = self.host.current_path().await;
        let page = page_for_path(&path);
        self.engine.set_page(page).await;
        tracing::info!(%path, page = page.name(), "Assistant activated");

        sleep(self.config.page_settle).await;

        let end = router::dispatch(self, page).await;
        if end == FlowEnd::SignedOut {
            self.nav.go(paths::LOGOUT);
        }
        tracing::info!(page = page.name(), ?end, "Flow finished");
        Ok(end)
    }

    /// Close the session without signing out (the panel's close button).
    pub async fn deactivate(&self) {
        self.engine.close().await;
    }

    /// Whether a session is currently open.
    pub async fn is_active(&self) -> bool {
        self.engine.is_active().await
    }
}
