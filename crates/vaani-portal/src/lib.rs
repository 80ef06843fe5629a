#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultPortalClient is meant to be
// used through the PortalClient trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod http;

pub use client::DefaultPortalClient;
pub use config::PortalConfig;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
