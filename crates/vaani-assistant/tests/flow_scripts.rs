//! Integration tests for the page flows, driven end to end through
//! [`Assistant::activate`].
//!
//! Each test wires the assistant to scripted backends and canned host
//! ports: the recognizer replays a fixed script of utterances, the host
//! page serves fixed read models, and the portal answers from a queue.
//! The tests then assert what the flows said, submitted, and navigated to.
//!
//! # What is tested
//!
//! - page detection picks a flow; unknown paths only announce readiness
//! - the landing flow routes into the login page or dismisses the session
//! - a close phrase in any listen signs out through the logout path
//! - the login flow normalizes usernames, walks the password candidate
//!   ladder, restarts on failure, and stops at the attempt budget
//! - the dashboard flow greets by name and routes by keyword
//! - the booking flow submits centre, plan, and date, and restarts after
//!   a refused or failed submission
//! - the detox dashboard routes to the schedule and progress detail pages
//! - detail pages read their summaries, then offer close or back

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use vaani_assistant::{Assistant, AssistantConfig, FlowEnd};
use vaani_core::normalize;
use vaani_core::{
    AppointmentInfo, BookingRequest, BookingResponse, CentreInfo, DayProgress, DaySchedule,
    HostPage, LoginRequest, LoginResponse, Navigator, PortalClient, PortalError, ProgressView,
    ScheduleView,
};
use vaani_dialog::{
    DialogConfig, DialogError, ListenOptions, RecognitionPass, RecognitionUpdate,
    RecognizerBackend, SessionEvent, SpeakOptions, SynthesizerBackend, VoiceProfile,
};

// ── Scripted backends ───────────────────────────────────────────────

/// One scripted reaction to a listen.
#[derive(Debug, Clone, Copy)]
enum Utterance {
    /// Deliver this text as a final result, then end the pass.
    Text(&'static str),

    /// End the pass immediately with no results.
    Silence,
}

/// Recognizer that replays a fixed script, one entry per listen. A script
/// that runs out behaves like silence.
struct ScriptedRecognizer {
    script: std::sync::Mutex<VecDeque<Utterance>>,
}

impl ScriptedRecognizer {
    fn new(script: Vec<Utterance>) -> Self {
        Self {
            script: std::sync::Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl RecognizerBackend for ScriptedRecognizer {
    async fn start(&self, _options: &ListenOptions) -> Result<RecognitionPass, DialogError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (stop_tx, _stop_rx) = oneshot::channel();

        match self.script.lock().unwrap().pop_front() {
            Some(Utterance::Text(text)) => {
                tx.send(RecognitionUpdate::final_text(text)).unwrap();
            }
            Some(Utterance::Silence) | None => {}
        }
        // `tx` drops here, so every pass ends as soon as it is drained.
        Ok(RecognitionPass::new(rx, stop_tx))
    }

    async fn probe_microphone(&self) -> Result<(), DialogError> {
        Ok(())
    }
}

/// Synthesizer that records every spoken line.
#[derive(Default)]
struct RecordingSynthesizer {
    spoken: std::sync::Mutex<Vec<String>>,
}

impl RecordingSynthesizer {
    fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SynthesizerBackend for RecordingSynthesizer {
    async fn voices(&self) -> Vec<VoiceProfile> {
        vec![VoiceProfile {
            name: "Heera".to_string(),
            language: "en-IN".to_string(),
        }]
    }

    async fn speak(
        &self,
        text: &str,
        _voice: Option<&VoiceProfile>,
        _options: &SpeakOptions,
    ) -> Result<(), DialogError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn cancel(&self) {}
}

// ── Canned host ports ───────────────────────────────────────────────

/// Host page serving fixed read models.
#[derive(Default)]
struct FakeHost {
    path: String,
    name: Option<String>,
    centres: Vec<CentreInfo>,
    appointments: Vec<AppointmentInfo>,
    schedule: Option<ScheduleView>,
    progress: Option<ProgressView>,
}

impl FakeHost {
    fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl HostPage for FakeHost {
    async fn current_path(&self) -> String {
        self.path.clone()
    }

    async fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    async fn centres(&self) -> Vec<CentreInfo> {
        self.centres.clone()
    }

    async fn appointments(&self) -> Vec<AppointmentInfo> {
        self.appointments.clone()
    }

    async fn schedule(&self) -> Option<ScheduleView> {
        self.schedule.clone()
    }

    async fn progress(&self) -> Option<ProgressView> {
        self.progress.clone()
    }
}

/// Navigator that records every requested path.
#[derive(Default)]
struct RecordingNavigator {
    paths: std::sync::Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Portal that answers from queues and records every request.
///
/// An empty queue answers with a refusal, so a test only has to queue the
/// responses it cares about.
#[derive(Default)]
struct ScriptedPortal {
    login_queue: std::sync::Mutex<VecDeque<Result<LoginResponse, PortalError>>>,
    booking_queue: std::sync::Mutex<VecDeque<Result<BookingResponse, PortalError>>>,
    logins: std::sync::Mutex<Vec<LoginRequest>>,
    bookings: std::sync::Mutex<Vec<BookingRequest>>,
}

impl ScriptedPortal {
    fn with_login(self, response: Result<LoginResponse, PortalError>) -> Self {
        self.login_queue.lock().unwrap().push_back(response);
        self
    }

    fn with_booking(self, response: Result<BookingResponse, PortalError>) -> Self {
        self.booking_queue.lock().unwrap().push_back(response);
        self
    }

    fn logins(&self) -> Vec<LoginRequest> {
        self.logins.lock().unwrap().clone()
    }

    fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortalClient for ScriptedPortal {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, PortalError> {
        self.logins.lock().unwrap().push(request.clone());
        self.login_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(refused_login)
    }

    async fn book_detox(&self, request: &BookingRequest) -> Result<BookingResponse, PortalError> {
        self.bookings.lock().unwrap().push(request.clone());
        self.booking_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(refused_booking)
    }
}

fn accepted_login() -> Result<LoginResponse, PortalError> {
    Ok(LoginResponse {
        success: true,
        redirect: None,
        message: None,
    })
}

fn refused_login() -> Result<LoginResponse, PortalError> {
    Ok(LoginResponse {
        success: false,
        redirect: None,
        message: Some("Invalid credentials".to_string()),
    })
}

fn accepted_booking() -> Result<BookingResponse, PortalError> {
    Ok(BookingResponse {
        success: true,
        message: None,
    })
}

fn refused_booking() -> Result<BookingResponse, PortalError> {
    Ok(BookingResponse {
        success: false,
        message: Some("Start date out of allowed range".to_string()),
    })
}

// ── Helpers ─────────────────────────────────────────────────────────

fn fast_config() -> AssistantConfig {
    AssistantConfig {
        dialog: DialogConfig {
            pre_cue_pause: Duration::from_millis(1),
            post_cue_pause: Duration::from_millis(1),
            silence_window: Duration::from_millis(30),
            listen_timeout: Duration::from_millis(200),
            yes_no_timeout: Duration::from_millis(200),
            max_attempts: 3,
            voices_wait: Duration::from_millis(10),
            speak: SpeakOptions::default(),
        },
        page_settle: Duration::from_millis(1),
        login_attempt_budget: 12,
        fallback_display_name: "Patient".to_string(),
    }
}

struct Harness {
    assistant: Assistant,
    synth: Arc<RecordingSynthesizer>,
    nav: Arc<RecordingNavigator>,
    portal: Arc<ScriptedPortal>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

fn harness(host: FakeHost, portal: ScriptedPortal, script: Vec<Utterance>) -> Harness {
    harness_with(host, portal, script, fast_config())
}

fn harness_with(
    host: FakeHost,
    portal: ScriptedPortal,
    script: Vec<Utterance>,
    config: AssistantConfig,
) -> Harness {
    let recognizer = Arc::new(ScriptedRecognizer::new(script));
    let synth = Arc::new(RecordingSynthesizer::default());
    let nav = Arc::new(RecordingNavigator::default());
    let portal = Arc::new(portal);

    let (assistant, events) = Assistant::new(
        Some(recognizer as Arc<dyn RecognizerBackend>),
        Some(Arc::clone(&synth) as Arc<dyn SynthesizerBackend>),
        Arc::new(host),
        Arc::clone(&nav) as Arc<dyn Navigator>,
        Arc::clone(&portal) as Arc<dyn PortalClient>,
        config,
    );
    Harness {
        assistant,
        synth,
        nav,
        portal,
        events,
    }
}

fn drain_events(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// True when `line` was spoken at least once.
fn spoke(synth: &RecordingSynthesizer, line: &str) -> bool {
    synth.spoken().iter().any(|s| s == line)
}

/// Count how many times `line` was spoken.
fn count_spoken(synth: &RecordingSynthesizer, line: &str) -> usize {
    synth.spoken().iter().filter(|s| *s == line).count()
}

fn two_centres() -> Vec<CentreInfo> {
    vec![
        CentreInfo {
            centre_id: "1".to_string(),
            name: "City Ayurveda Centre".to_string(),
        },
        CentreInfo {
            centre_id: "2".to_string(),
            name: "Riverside Retreat".to_string(),
        },
    ]
}

fn booking_host() -> FakeHost {
    let mut host = FakeHost::at("/patient/book-detox");
    host.centres = two_centres();
    host
}

fn schedule_view() -> ScheduleView {
    ScheduleView {
        plan: "Weight Loss Short".to_string(),
        start_date: "22 September 2025".to_string(),
        duration: "7 days".to_string(),
        therapy_time: "Morning".to_string(),
        status: "Approved".to_string(),
        first_day: Some(DaySchedule {
            title: "Day 1 - Monday, 22 September".to_string(),
            slots: vec![
                "Abhyanga full body massage".to_string(),
                "Steam bath".to_string(),
                "Shirodhara".to_string(),
            ],
        }),
    }
}

fn progress_view() -> ProgressView {
    ProgressView {
        plan: "Weight Loss Short".to_string(),
        start_date: "22 September 2025".to_string(),
        duration: "7 days".to_string(),
        status: "In Progress".to_string(),
        first_day: Some(DayProgress {
            title: "Day 3 - Wednesday, 24 September".to_string(),
            score: Some("82%".to_string()),
            vitals: vec!["Blood pressure 120/80".to_string(), "Pulse 72".to_string()],
        }),
    }
}

// ── Activation and routing ──────────────────────────────────────────

#[tokio::test]
async fn unsupported_page_only_announces_readiness() {
    let mut h = harness(
        FakeHost::at("/admin/reports"),
        ScriptedPortal::default(),
        vec![],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::Stayed);
    assert!(spoke(
        &h.synth,
        "Voice assistant is ready. Navigate to a supported page to continue."
    ));
    assert!(h.nav.paths().is_empty());
    assert!(h.assistant.is_active().await);

    // The announcement also lands in the transcript the host renders.
    let transcript: Vec<String> = drain_events(&mut h.events)
        .into_iter()
        .filter_map(|event| match event {
            SessionEvent::Transcript(entry) => Some(entry.text),
            SessionEvent::StatusChanged(_) => None,
        })
        .collect();
    assert!(
        transcript
            .iter()
            .any(|text| text.starts_with("Voice assistant is ready")),
        "transcript: {transcript:?}"
    );
}

#[tokio::test]
async fn activation_fails_without_a_recognizer() {
    let synth = Arc::new(RecordingSynthesizer::default());
    let nav = Arc::new(RecordingNavigator::default());
    let (assistant, _events) = Assistant::new(
        None,
        Some(Arc::clone(&synth) as Arc<dyn SynthesizerBackend>),
        Arc::new(FakeHost::at("/")),
        Arc::clone(&nav) as Arc<dyn Navigator>,
        Arc::new(ScriptedPortal::default()),
        fast_config(),
    );

    let err = assistant.activate().await.unwrap_err();
    assert!(
        matches!(err, DialogError::RecognizerUnavailable),
        "expected RecognizerUnavailable, got {err:?}"
    );
    assert!(!assistant.is_active().await);
    assert!(synth.spoken().is_empty());
}

#[tokio::test]
async fn panel_close_deactivates_without_signing_out() {
    let h = harness(FakeHost::at("/admin"), ScriptedPortal::default(), vec![]);

    let end = h.assistant.activate().await.expect("activation should succeed");
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.assistant.is_active().await);

    h.assistant.deactivate().await;
    assert!(!h.assistant.is_active().await);
    assert!(h.nav.paths().is_empty());
}

// ── Landing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn landing_yes_then_yes_opens_the_login_page() {
    let h = harness(
        FakeHost::at("/"),
        ScriptedPortal::default(),
        vec![Utterance::Text("yes"), Utterance::Text("yes")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::Navigated);
    assert!(spoke(&h.synth, "Opening Patient Login."));
    assert_eq!(h.nav.paths(), vec!["/auth/login".to_string()]);
}

#[tokio::test]
async fn landing_decline_dismisses_without_signing_out() {
    let h = harness(
        FakeHost::at("/"),
        ScriptedPortal::default(),
        vec![Utterance::Text("no")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::Dismissed);
    assert!(spoke(&h.synth, "Okay. Closing voice assistant."));
    assert!(h.nav.paths().is_empty());
    assert!(!h.assistant.is_active().await);
}

#[tokio::test]
async fn close_phrase_signs_out_through_the_logout_path() {
    let h = harness(
        FakeHost::at("/"),
        ScriptedPortal::default(),
        vec![Utterance::Text("close")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::SignedOut);
    assert_eq!(h.nav.paths(), vec!["/auth/logout".to_string()]);
    assert!(!h.assistant.is_active().await);
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn login_submits_the_confirmed_credentials() {
    let h = harness(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default().with_login(accepted_login()),
        vec![
            Utterance::Text("asha at example dot com"),
            Utterance::Text("yes"),
            Utterance::Text("open sesame"),
            Utterance::Text("yes"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::Navigated);
    assert!(spoke(
        &h.synth,
        "I heard 'asha@example.com'. Is that correct?"
    ));
    assert!(spoke(
        &h.synth,
        "Please say your password. For your security, ensure you are in a private space."
    ));
    assert!(spoke(&h.synth, "Login successful. Opening your dashboard."));
    assert_eq!(
        h.portal.logins(),
        vec![LoginRequest::patient("asha@example.com", "open sesame")]
    );
    assert_eq!(h.nav.paths(), vec!["/patient/dashboard".to_string()]);
}

#[tokio::test]
async fn login_follows_the_portal_redirect() {
    let h = harness(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default().with_login(Ok(LoginResponse {
            success: true,
            redirect: Some("/patient/dashboard?welcome=1".to_string()),
            message: None,
        })),
        vec![
            Utterance::Text("Asha Rao"),
            Utterance::Text("yes"),
            Utterance::Text("open sesame"),
            Utterance::Text("yes"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::Navigated);
    assert_eq!(
        h.nav.paths(),
        vec!["/patient/dashboard?welcome=1".to_string()]
    );
}

#[tokio::test]
async fn login_walks_the_password_ladder_until_one_succeeds() {
    let h = harness(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default()
            .with_login(refused_login())
            .with_login(refused_login())
            .with_login(accepted_login()),
        vec![
            Utterance::Text("Asha Rao"),
            Utterance::Text("yes"),
            Utterance::Text("pass word one two three"),
            Utterance::Text("yes"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    let expected = normalize::password_candidates("pass word one two three");
    assert!(expected.len() >= 3, "ladder too short: {expected:?}");

    let logins = h.portal.logins();
    let submitted: Vec<String> = logins.iter().map(|r| r.password.clone()).collect();
    assert_eq!(submitted, expected[..3].to_vec());
    assert!(
        logins
            .iter()
            .all(|r| r.username == "Asha Rao" && r.role == "patient")
    );
    assert_eq!(end, FlowEnd::Navigated);
    assert_eq!(h.nav.paths(), vec!["/patient/dashboard".to_string()]);
}

#[tokio::test]
async fn exhausted_ladder_announces_failure_and_restarts() {
    // "secret" has no separators or number words, so its ladder is just
    // itself: one refusal drains it and the flow starts over.
    let h = harness(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default(),
        vec![
            Utterance::Text("Asha Rao"),
            Utterance::Text("yes"),
            Utterance::Text("secret"),
            Utterance::Text("yes"),
            Utterance::Text("close"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(h.portal.logins().len(), 1);
    assert!(spoke(&h.synth, "Invalid credentials. Please try again."));
    assert_eq!(end, FlowEnd::SignedOut);
    assert_eq!(h.nav.paths(), vec!["/auth/logout".to_string()]);
}

#[tokio::test]
async fn spent_attempt_budget_stops_mid_ladder() {
    let mut config = fast_config();
    config.login_attempt_budget = 2;

    let h = harness_with(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default(),
        vec![
            Utterance::Text("Asha Rao"),
            Utterance::Text("yes"),
            Utterance::Text("pass word one two three"),
            Utterance::Text("yes"),
        ],
        config,
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    let expected = normalize::password_candidates("pass word one two three");
    let submitted: Vec<String> = h.portal.logins().iter().map(|r| r.password.clone()).collect();
    assert_eq!(submitted, expected[..2].to_vec());
    assert!(spoke(
        &h.synth,
        "Too many sign-in attempts. Please use the login form instead."
    ));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
}

#[tokio::test]
async fn denied_username_readback_gives_up_after_three_rounds() {
    let h = harness(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default(),
        vec![
            Utterance::Text("Asha Rao"),
            Utterance::Text("no"),
            Utterance::Text("Asha Rao"),
            Utterance::Text("no"),
            Utterance::Text("Asha Rao"),
            Utterance::Text("no"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(count_spoken(&h.synth, "Okay, let us try again."), 3);
    assert!(spoke(
        &h.synth,
        "Unable to capture your username. Closing voice assistant."
    ));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.portal.logins().is_empty());
}

#[tokio::test]
async fn declined_sign_in_confirmation_cancels() {
    let h = harness(
        FakeHost::at("/auth/login"),
        ScriptedPortal::default(),
        vec![
            Utterance::Text("Asha Rao"),
            Utterance::Text("yes"),
            Utterance::Text("secret"),
            Utterance::Text("no"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(&h.synth, "Cancelled login."));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.portal.logins().is_empty());
    assert!(h.nav.paths().is_empty());
}

// ── Patient dashboard ───────────────────────────────────────────────

#[tokio::test]
async fn dashboard_greets_by_name_and_routes_to_booking() {
    let mut host = FakeHost::at("/patient/dashboard");
    host.name = Some("Asha".to_string());

    let h = harness(
        host,
        ScriptedPortal::default(),
        vec![Utterance::Text("book detox therapy"), Utterance::Text("yes")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "Welcome, Asha. Would you like to book detox therapy or open the detox dashboard?"
    ));
    assert!(spoke(&h.synth, "Opening the booking page."));
    assert_eq!(h.nav.paths(), vec!["/patient/book-detox".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn dashboard_greets_the_fallback_name_and_opens_the_detox_dashboard() {
    let h = harness(
        FakeHost::at("/patient/dashboard"),
        ScriptedPortal::default(),
        vec![Utterance::Text("detox dashboard"), Utterance::Text("yes")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "Welcome, Patient. Would you like to book detox therapy or open the detox dashboard?"
    ));
    assert!(spoke(&h.synth, "Opening the Detox Dashboard."));
    assert_eq!(h.nav.paths(), vec!["/patient/detox-dashboard".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn dashboard_hints_on_each_miss_then_gives_up() {
    let h = harness(
        FakeHost::at("/patient/dashboard"),
        ScriptedPortal::default(),
        vec![
            Utterance::Text("what do I do"),
            Utterance::Silence,
            Utterance::Text("help me"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(
        count_spoken(
            &h.synth,
            "I didn't catch that. Please say 'Book Detox Therapy' or 'Detox Dashboard'."
        ),
        3
    );
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
}

#[tokio::test]
async fn dashboard_declined_confirmation_stays() {
    let h = harness(
        FakeHost::at("/patient/dashboard"),
        ScriptedPortal::default(),
        vec![Utterance::Text("book detox"), Utterance::Text("no")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(!spoke(&h.synth, "Opening the booking page."));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
}

// ── Detox booking ───────────────────────────────────────────────────

#[tokio::test]
async fn booking_submits_centre_plan_and_date() {
    let h = harness(
        booking_host(),
        ScriptedPortal::default().with_booking(accepted_booking()),
        vec![
            Utterance::Text("2"),
            Utterance::Text("diabetes"),
            Utterance::Text("20 September 2025"),
            Utterance::Text("yes"),
            Utterance::Text("no"),
            Utterance::Text("no"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "You selected Centre: Riverside Retreat, Plan: Diabetes Short, 7 days, \
         Date: 2025-09-20. Shall I submit? Yes or No."
    ));
    assert!(spoke(
        &h.synth,
        "Your detox therapy request was submitted successfully."
    ));
    assert_eq!(
        h.portal.bookings(),
        vec![BookingRequest {
            centre_id: "2".to_string(),
            plan_type: "diabetes_short".to_string(),
            start_date: "2025-09-20".to_string(),
        }]
    );
    // Declined both epilogue offers, so the flow returns to the dashboard.
    assert!(spoke(&h.synth, "Okay. Remaining on the dashboard."));
    assert_eq!(h.nav.paths(), vec!["/patient/dashboard".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn refused_booking_restarts_from_the_centre_choice() {
    let h = harness(
        booking_host(),
        ScriptedPortal::default()
            .with_booking(refused_booking())
            .with_booking(accepted_booking()),
        vec![
            Utterance::Text("1"),
            Utterance::Text("1"),
            Utterance::Text("20 September 2025"),
            Utterance::Text("yes"),
            Utterance::Text("1"),
            Utterance::Text("1"),
            Utterance::Text("21 September 2025"),
            Utterance::Text("yes"),
            Utterance::Text("yes"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "Booking failed. The date may be out of range or there was a server error. \
         Please try again."
    ));
    let bookings = h.portal.bookings();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[1].start_date, "2025-09-21");
    assert!(spoke(&h.synth, "Opening Detox Dashboard."));
    assert_eq!(h.nav.paths(), vec!["/patient/detox-dashboard".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn booking_network_error_announces_and_restarts() {
    let h = harness(
        booking_host(),
        ScriptedPortal::default()
            .with_booking(Err(PortalError::Network("connection refused".to_string()))),
        vec![
            Utterance::Text("1"),
            Utterance::Text("1"),
            Utterance::Text("20 September 2025"),
            Utterance::Text("yes"),
            Utterance::Text("close"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "Network error while submitting booking. Please try again."
    ));
    assert_eq!(h.portal.bookings().len(), 1);
    assert_eq!(end, FlowEnd::SignedOut);
    assert_eq!(h.nav.paths(), vec!["/auth/logout".to_string()]);
}

#[tokio::test]
async fn booking_declined_at_the_confirmation_submits_nothing() {
    let h = harness(
        booking_host(),
        ScriptedPortal::default(),
        vec![
            Utterance::Text("1"),
            Utterance::Text("1"),
            Utterance::Text("20 September 2025"),
            Utterance::Text("no"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(&h.synth, "Cancelled booking."));
    assert!(h.portal.bookings().is_empty());
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
}

#[tokio::test]
async fn post_booking_sign_out_goes_through_the_logout_path() {
    let h = harness(
        booking_host(),
        ScriptedPortal::default().with_booking(accepted_booking()),
        vec![
            Utterance::Text("1"),
            Utterance::Text("1"),
            Utterance::Text("20 September 2025"),
            Utterance::Text("yes"),
            Utterance::Text("no"),
            Utterance::Text("yes"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(&h.synth, "Signing you out."));
    assert_eq!(end, FlowEnd::SignedOut);
    assert_eq!(h.nav.paths(), vec!["/auth/logout".to_string()]);
}

// ── Detox dashboard ─────────────────────────────────────────────────

#[tokio::test]
async fn empty_detox_dashboard_suggests_booking() {
    let h = harness(
        FakeHost::at("/patient/detox-dashboard"),
        ScriptedPortal::default(),
        vec![],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "You have no detox therapy appointments yet. You can book one from here."
    ));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
}

#[tokio::test]
async fn single_appointment_opens_its_schedule_without_a_list() {
    let mut host = FakeHost::at("/patient/detox-dashboard");
    host.appointments = vec![AppointmentInfo {
        id: "42".to_string(),
        plan: "Weight Loss Short".to_string(),
        has_schedule: true,
        has_progress: true,
    }];

    let h = harness(
        host,
        ScriptedPortal::default(),
        vec![Utterance::Text("view schedule")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(!spoke(&h.synth, "You have multiple detox appointments."));
    assert!(spoke(&h.synth, "Opening schedule."));
    assert_eq!(h.nav.paths(), vec!["/patient/detox-schedule/42".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn multiple_appointments_are_chosen_by_number() {
    let mut host = FakeHost::at("/patient/detox-dashboard");
    host.appointments = vec![
        AppointmentInfo {
            id: "3".to_string(),
            plan: "Weight Loss Short".to_string(),
            has_schedule: true,
            has_progress: true,
        },
        AppointmentInfo {
            id: "9".to_string(),
            plan: String::new(),
            has_schedule: true,
            has_progress: true,
        },
    ];

    let h = harness(
        host,
        ScriptedPortal::default(),
        vec![Utterance::Text("view progress"), Utterance::Text("2")],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(&h.synth, "You have multiple detox appointments."));
    // The untitled card is read with the generic label.
    assert!(spoke(&h.synth, "2. Detox Plan"));
    assert!(spoke(&h.synth, "Opening progress."));
    assert_eq!(h.nav.paths(), vec!["/patient/detox-progress/9".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn detox_dashboard_gives_up_without_a_view_choice() {
    let mut host = FakeHost::at("/patient/detox-dashboard");
    host.appointments = vec![AppointmentInfo {
        id: "42".to_string(),
        plan: "Weight Loss Short".to_string(),
        has_schedule: true,
        has_progress: true,
    }];

    let h = harness(
        host,
        ScriptedPortal::default(),
        vec![
            Utterance::Text("something else"),
            Utterance::Silence,
            Utterance::Text("neither"),
        ],
    );

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(
        count_spoken(&h.synth, "Please say 'View Schedule' or 'View Progress'."),
        3
    );
    assert!(spoke(&h.synth, "Unable to capture your choice."));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
}

// ── Detail pages ────────────────────────────────────────────────────

#[tokio::test]
async fn schedule_page_reads_the_summary_then_goes_back() {
    let mut host = FakeHost::at("/patient/detox-schedule/42");
    host.schedule = Some(schedule_view());

    let h = harness(host, ScriptedPortal::default(), vec![Utterance::Text("back")]);

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "Plan Weight Loss Short. Start date 22 September 2025. Duration 7 days. \
         Therapy time Morning. Status Approved."
    ));
    assert!(spoke(&h.synth, "Day 1 - Monday, 22 September"));
    assert!(spoke(&h.synth, "Abhyanga full body massage"));
    assert!(spoke(&h.synth, "Steam bath"));
    // Only the first two slots are read aloud.
    assert!(!spoke(&h.synth, "Shirodhara"));
    assert!(spoke(&h.synth, "Going back to the Detox Dashboard."));
    assert_eq!(h.nav.paths(), vec!["/patient/detox-dashboard".to_string()]);
    assert_eq!(end, FlowEnd::Navigated);
}

#[tokio::test]
async fn schedule_page_close_signs_out() {
    let mut host = FakeHost::at("/patient/detox-schedule/42");
    host.schedule = Some(schedule_view());

    let h = harness(host, ScriptedPortal::default(), vec![Utterance::Text("close")]);

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert_eq!(end, FlowEnd::SignedOut);
    assert_eq!(h.nav.paths(), vec!["/auth/logout".to_string()]);
    assert!(!h.assistant.is_active().await);
}

#[tokio::test]
async fn progress_page_reads_the_first_day_and_stays_on_silence() {
    let mut host = FakeHost::at("/patient/detox-progress/42");
    host.progress = Some(progress_view());

    let h = harness(host, ScriptedPortal::default(), vec![Utterance::Silence]);

    let end = h.assistant.activate().await.expect("activation should succeed");

    assert!(spoke(
        &h.synth,
        "Plan Weight Loss Short. Start date 22 September 2025. Duration 7 days. \
         Status In Progress."
    ));
    assert!(spoke(&h.synth, "Day 3 - Wednesday, 24 September"));
    assert!(spoke(&h.synth, "Progress score 82%"));
    assert!(spoke(&h.synth, "Vitals example: Blood pressure 120/80"));
    // Only the first vitals line is read aloud.
    assert!(!spoke(&h.synth, "Vitals example: Pulse 72"));
    assert_eq!(end, FlowEnd::Stayed);
    assert!(h.nav.paths().is_empty());
    assert!(h.assistant.is_active().await);
}
