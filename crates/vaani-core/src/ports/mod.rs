//! Port definitions (trait abstractions) for everything around the dialogue.
//!
//! Ports define what the flows expect from the outside world: the rendered
//! page they are narrating, the browser-style navigator, and the portal's
//! JSON endpoints. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or DOM types in any signature
//! - Read models carry the already-extracted text a flow would speak,
//!   never markup

pub mod host;
pub mod nav;
pub mod portal;

pub use host::{
    AppointmentInfo, CentreInfo, DayProgress, DaySchedule, HostPage, ProgressView, ScheduleView,
};
pub use nav::Navigator;
pub use portal::{
    BookingRequest, BookingResponse, LoginRequest, LoginResponse, PortalClient, PortalError,
};
