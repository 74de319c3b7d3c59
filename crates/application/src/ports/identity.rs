//! Identity provider port.

use async_trait::async_trait;
use vitae_domain::{AuthError, Credential};

/// Port onto the external identity/session provider.
///
/// The provider is opaque: it owns the credential and how it is
/// obtained. The application only distinguishes a cheap cached read
/// from a forced network refresh.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the session credential.
    ///
    /// With `force_refresh` false this must answer from the local cache
    /// without a network round-trip, even if the cached credential has
    /// expired. With `force_refresh` true the provider performs a true
    /// refresh against its backend.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when no session exists or the refresh
    /// fails.
    async fn credential(&self, force_refresh: bool) -> Result<Credential, AuthError>;

    /// Clears the local session state.
    async fn sign_out(&self);
}
