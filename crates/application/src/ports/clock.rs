//! Clock port for time-related operations

use chrono::{DateTime, Utc};

/// Port for reading the current time.
///
/// Credential expiry arithmetic goes through this trait so tests can
/// pin the clock.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
