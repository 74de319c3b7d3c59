//! Vitae Application - services and ports
//!
//! The application layer owns the client-side behavior of Vitae: the
//! authenticated request coordinator with its single-flight credential
//! refresh, the resume API surface, the session-expiry monitor, and the
//! notification feed. External systems (HTTP, identity, clocks,
//! persistence) are reached only through the port traits in [`ports`],
//! so every piece here is testable with simulated collaborators.

pub mod client;
pub mod error;
pub mod notifications;
pub mod ports;
pub mod resumes;
pub mod session;

pub use client::{ApiClient, RefreshGate};
pub use error::{ApiError, ApiResult};
pub use notifications::{NotificationFeed, SubscriptionId};
pub use resumes::ResumeService;
pub use session::{SessionConfig, SessionMonitor};
