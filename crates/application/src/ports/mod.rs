//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer, or by a mock in tests.

mod clock;
mod expiry_store;
mod identity;
mod navigator;
mod transport;

pub use clock::Clock;
pub use expiry_store::{ExpiryStore, ExpiryStoreError};
pub use identity::IdentityProvider;
pub use navigator::Navigator;
pub use transport::{HttpTransport, TransportError};
