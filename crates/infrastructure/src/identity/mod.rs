//! Identity provider adapters.

mod rest_provider;

pub use rest_provider::RestIdentityProvider;
