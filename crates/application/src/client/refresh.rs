//! Single-flight credential refresh.
//!
//! At most one forced refresh runs at a time. The first request to hit
//! an authorization failure becomes the leader of the episode and calls
//! the identity provider; every request that fails while that call is
//! in flight parks a continuation on the same episode instead of
//! starting a second refresh. When the refresh settles, waiters are
//! resolved in enqueue order with the shared outcome. On a failed
//! refresh the leader also signs the session out and redirects to the
//! login entry point, exactly once for the whole episode.

use std::sync::Arc;

use tokio::sync::{Mutex, oneshot};
use vitae_domain::{AuthError, Credential};

use crate::ports::{IdentityProvider, Navigator};

type Waiter = oneshot::Sender<Result<Credential, AuthError>>;

/// Episode state: `Idle` until a leader claims the refresh, then
/// `InFlight` while it runs. Entry into `InFlight` only happens from
/// `Idle`.
enum RefreshState {
    Idle,
    InFlight(Vec<Waiter>),
}

/// Coordinates forced credential refreshes across concurrent requests.
pub struct RefreshGate<P, N> {
    identity: Arc<P>,
    navigator: Arc<N>,
    state: Mutex<RefreshState>,
}

impl<P, N> RefreshGate<P, N>
where
    P: IdentityProvider,
    N: Navigator,
{
    /// Creates an idle gate.
    pub fn new(identity: Arc<P>, navigator: Arc<N>) -> Self {
        Self {
            identity,
            navigator,
            state: Mutex::new(RefreshState::Idle),
        }
    }

    /// Recovers from an authorization failure.
    ///
    /// Joins the in-flight refresh episode if one exists, otherwise
    /// starts one. Returns the refreshed credential shared by the
    /// episode.
    ///
    /// # Errors
    ///
    /// Returns the episode's [`AuthError`] when the refresh fails; by
    /// then the session has been cleared and the user redirected to
    /// login.
    pub async fn recover(&self) -> Result<Credential, AuthError> {
        let waiter = {
            let mut state = self.state.lock().await;
            match &mut *state {
                RefreshState::Idle => {
                    *state = RefreshState::InFlight(Vec::new());
                    None
                }
                RefreshState::InFlight(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
            }
        };

        if let Some(rx) = waiter {
            return match rx.await {
                Ok(outcome) => outcome,
                Err(_) => Err(AuthError::Interrupted),
            };
        }

        tracing::debug!("credential rejected; starting forced refresh");
        let outcome = self.identity.credential(true).await;

        let waiters = {
            let mut state = self.state.lock().await;
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::InFlight(waiters) => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }

        if let Err(err) = &outcome {
            tracing::warn!("credential refresh failed, signing out: {err}");
            self.identity.sign_out().await;
            self.navigator.redirect_to_login();
        }

        outcome
    }

    #[cfg(test)]
    pub(crate) async fn is_idle(&self) -> bool {
        matches!(*self.state.lock().await, RefreshState::Idle)
    }
}
