//! Terminal driver: the composition root.
//!
//! Wires console speech backends, canned demo host data, and a portal
//! client (live or offline) into the assistant, then re-activates it after
//! every navigation the way the browser host does on a page load.

#![deny(unused_crate_dependencies)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use vaani_assistant::{Assistant, AssistantConfig, FlowEnd};
use vaani_core::{HostPage, Navigator, PortalClient};
use vaani_dialog::{RecognizerBackend, SynthesizerBackend};
use vaani_portal::{DefaultPortalClient, PortalConfig};

mod console;
mod demo;

use console::{ConsoleNavigator, ConsoleRecognizer, ConsoleSynthesizer};
use demo::{DemoHost, DemoPortal};

/// Drive the patient portal's voice assistant from a terminal.
#[derive(Parser)]
#[command(name = "vaani")]
#[command(about = "Voice assistant for the Niramaya patient portal, driven from the terminal")]
#[command(version)]
struct Cli {
    /// Base URL of a live portal; without it, submissions are accepted locally
    #[arg(long = "portal-url", env = "VAANI_PORTAL_URL")]
    portal_url: Option<String>,

    /// Page path to start the session on
    #[arg(long = "path", default_value = "/")]
    path: String,

    /// Patient display name for the dashboard greeting
    #[arg(long = "name")]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let portal: Arc<dyn PortalClient> = match &cli.portal_url {
        Some(url) => Arc::new(DefaultPortalClient::new(
            &PortalConfig::new().with_base_url(url.clone()),
        )?),
        None => Arc::new(DemoPortal),
    };

    let recognizer = Arc::new(ConsoleRecognizer::new());
    let nav = Arc::new(ConsoleNavigator::new(&cli.path));
    let host = Arc::new(DemoHost::new(Arc::clone(&nav), cli.name.clone()));

    println!("Type what you would say; an empty line is silence, Ctrl-D ends input.");

    loop {
        let (assistant, mut events) = Assistant::new(
            Some(Arc::clone(&recognizer) as Arc<dyn RecognizerBackend>),
            Some(Arc::new(ConsoleSynthesizer) as Arc<dyn SynthesizerBackend>),
            Arc::clone(&host) as Arc<dyn HostPage>,
            Arc::clone(&nav) as Arc<dyn Navigator>,
            Arc::clone(&portal),
            AssistantConfig::default(),
        );
        // The synthesizer already prints every line; drain the event stream
        // so emits keep a live receiver. The task ends with the engine.
        tokio::spawn(async move { while events.recv().await.is_some() {} });

        let end = assistant.activate().await?;
        assistant.deactivate().await;

        match end {
            // The page changed; a fresh activation picks up its flow.
            FlowEnd::Navigated => {}
            FlowEnd::Stayed => {
                println!("Session ended on {}.", nav.current());
                break;
            }
            FlowEnd::SignedOut => {
                println!("Signed out.");
                break;
            }
            FlowEnd::Dismissed => break,
        }
    }
    Ok(())
}
