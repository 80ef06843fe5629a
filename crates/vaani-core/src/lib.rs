#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod normalize;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    DetoxPlan, Page, Speaker, TranscriptEntry, detox_plans, page_for_path, paths,
};
pub use normalize::YesNo;
pub use ports::{
    AppointmentInfo, BookingRequest, BookingResponse, CentreInfo, DayProgress, DaySchedule,
    HostPage, LoginRequest, LoginResponse, Navigator, PortalClient, PortalError, ProgressView,
    ScheduleView,
};

// Silence unused dev-dependency warnings until we add mock-based tests
#[cfg(test)]
use mockall as _;
