//! Session-expiry monitor.
//!
//! Watches user activity and forces a credential liveness check once
//! the session has been idle for the configured duration. Activity
//! events are debounced so bursts of input arm at most one timer; on a
//! failed check the session is cleared and the user is sent back to
//! login.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::ports::{IdentityProvider, Navigator};

/// Timing configuration for the monitor.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Quiet period after an activity burst before the session timer is
    /// (re)armed.
    pub debounce: Duration,
    /// Idle time after which the credential is checked.
    pub session_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(1),
            session_timeout: Duration::from_secs(60 * 60),
        }
    }
}

/// Handle to a running session monitor.
///
/// Spawned when a session begins; stopping it (or dropping every
/// handle-side sender on sign-out) detaches activity delivery and ends
/// the task.
pub struct SessionMonitor {
    activity: mpsc::UnboundedSender<()>,
    handle: JoinHandle<()>,
}

impl SessionMonitor {
    /// Spawns the monitor task. The session timer starts armed, as if
    /// the sign-in itself were the last activity.
    #[must_use]
    pub fn spawn<P, N>(identity: Arc<P>, navigator: Arc<N>, config: SessionConfig) -> Self
    where
        P: IdentityProvider + 'static,
        N: Navigator + 'static,
    {
        let (activity_tx, activity_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(identity, navigator, config, activity_rx));
        Self {
            activity: activity_tx,
            handle,
        }
    }

    /// Records a user-interaction event. Harmless after the monitor has
    /// stopped.
    pub fn note_activity(&self) {
        let _ = self.activity.send(());
    }

    /// Returns false once the monitor task has ended (sign-out or stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the monitor without signing out.
    pub fn stop(self) {
        self.handle.abort();
    }
}

async fn run<P, N>(
    identity: Arc<P>,
    navigator: Arc<N>,
    config: SessionConfig,
    mut activity: mpsc::UnboundedReceiver<()>,
) where
    P: IdentityProvider,
    N: Navigator,
{
    // At most one of these deadlines is armed at a time; arming one
    // clears the other.
    let mut debounce_deadline: Option<Instant> = None;
    let mut session_deadline: Option<Instant> = Some(Instant::now() + config.session_timeout);

    loop {
        let debounce = deadline_elapsed(debounce_deadline);
        let session = deadline_elapsed(session_deadline);
        tokio::pin!(debounce, session);

        tokio::select! {
            event = activity.recv() => {
                match event {
                    Some(()) => {
                        session_deadline = None;
                        debounce_deadline = Some(Instant::now() + config.debounce);
                    }
                    // All senders dropped: the session ended elsewhere.
                    None => break,
                }
            }
            () = &mut debounce => {
                debounce_deadline = None;
                session_deadline = Some(Instant::now() + config.session_timeout);
            }
            () = &mut session => {
                session_deadline = None;
                match identity.credential(true).await {
                    Ok(_) => {
                        // Session still alive; the next activity arms the
                        // next timer.
                        tracing::debug!("idle session check passed");
                    }
                    Err(err) => {
                        tracing::warn!("idle session check failed, signing out: {err}");
                        identity.sign_out().await;
                        navigator.redirect_to_login();
                        break;
                    }
                }
            }
        }
    }
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
