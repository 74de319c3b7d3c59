//! Login redirect adapter for the CLI.

use vitae_application::ports::Navigator;

/// Navigator that surfaces the login redirect on the console.
///
/// The CLI has no router to send the user to; the equivalent of the
/// browser redirect is telling them how to start a new session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl ConsoleNavigator {
    /// Creates the navigator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Navigator for ConsoleNavigator {
    fn redirect_to_login(&self) {
        tracing::warn!("session is no longer valid; redirecting to login");
        eprintln!("Your session has expired. Sign in again with `vitae login`.");
    }
}
