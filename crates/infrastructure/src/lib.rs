//! Vitae Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: a reqwest-backed HTTP transport, the REST
//! identity provider, file-backed session persistence, and the system
//! clock.

pub mod adapters;
pub mod identity;
pub mod persistence;

pub use adapters::{ConsoleNavigator, ReqwestTransport, SystemClock};
pub use identity::RestIdentityProvider;
pub use persistence::FileExpiryStore;
