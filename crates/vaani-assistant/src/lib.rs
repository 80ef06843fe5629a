#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod assistant;
pub mod config;
pub mod flows;
mod router;

pub use assistant::Assistant;
pub use config::AssistantConfig;
pub use flows::FlowEnd;

// Silence unused dev-dependency warnings; the mocks live in tests/
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use tokio_test as _;
