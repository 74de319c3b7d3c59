//! Navigation port.

/// Port for sending the user back to the login entry point after the
/// session becomes unrecoverable.
pub trait Navigator: Send + Sync {
    /// Redirects to the login entry point.
    fn redirect_to_login(&self);
}
