//! Session credential types.
//!
//! A [`Credential`] is an opaque bearer token issued by the identity
//! provider, together with the metadata needed to reason about its
//! expiry. All expiry arithmetic takes the current instant explicitly so
//! callers can inject a clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bearer credential proving an authenticated session to the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// The opaque access token string.
    pub token: String,
    /// When the token expires, if the provider reported a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token for obtaining a new access token.
    pub refresh_token: Option<String>,
    /// When this credential was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential obtained at `now`.
    #[must_use]
    pub fn new(
        token: String,
        expires_in_secs: Option<u64>,
        refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = expires_in_secs.map(|secs| {
            now + chrono::Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
        });

        Self {
            token,
            expires_at,
            refresh_token,
            obtained_at: now,
        }
    }

    /// Check if the credential is expired, or will expire within the
    /// given buffer, as of `now`. A credential without a reported expiry
    /// never expires locally.
    #[must_use]
    pub fn is_expired_or_expiring(&self, now: DateTime<Utc>, buffer_seconds: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| now + chrono::Duration::seconds(buffer_seconds) >= expires_at)
    }

    /// Check if the credential can be refreshed without re-authenticating.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Time until expiry in seconds as of `now`, or None if no expiry.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|exp| (exp - now).num_seconds())
    }

    /// Returns the Authorization header value for this credential.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Profile data for the signed-in user, as held by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-assigned user id.
    pub uid: String,
    /// Account email address.
    pub email: String,
    /// Display name supplied at signup.
    #[serde(default)]
    pub full_name: Option<String>,
    /// ISO-8601 account creation timestamp, as reported by the provider.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Authentication and session errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No user is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// The credential expired and no refresh token is available.
    #[error("credential expired and no refresh token is available")]
    ExpiredNoRefresh,

    /// A forced credential refresh failed.
    #[error("failed to refresh credential: {message}")]
    RefreshFailed {
        /// Error description.
        message: String,
    },

    /// The provider rejected a sign-in or sign-up attempt.
    #[error("{message}")]
    Rejected {
        /// User-facing description of the rejection.
        message: String,
    },

    /// A refresh that this caller was waiting on was abandoned before it
    /// settled.
    #[error("credential refresh was interrupted")]
    Interrupted,

    /// The identity provider could not be reached.
    #[error("identity network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_credential_expiry() {
        let now = at(1_000);
        let credential = Credential::new(
            "access123".to_string(),
            Some(3600),
            Some("refresh456".to_string()),
            now,
        );

        assert!(!credential.is_expired_or_expiring(now, 0));
        assert!(credential.is_expired_or_expiring(at(1_000 + 3600), 0));
        assert!(credential.is_expired_or_expiring(now, 3600));
        assert!(credential.can_refresh());
        assert_eq!(credential.seconds_until_expiry(now), Some(3600));
        assert_eq!(credential.authorization_header(), "Bearer access123");
    }

    #[test]
    fn test_credential_without_expiry() {
        let now = at(0);
        let credential = Credential::new("access123".to_string(), None, None, now);

        assert!(!credential.is_expired_or_expiring(now, 0));
        assert!(!credential.is_expired_or_expiring(at(i32::MAX.into()), 0));
        assert!(!credential.can_refresh());
        assert_eq!(credential.seconds_until_expiry(now), None);
    }

    #[test]
    fn test_profile_roundtrip() {
        let profile = UserProfile {
            uid: "u1".to_string(),
            email: "a@example.com".to_string(),
            full_name: Some("Ada Example".to_string()),
            created_at: Some("2025-01-01T00:00:00Z".to_string()),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, parsed);
    }
}
