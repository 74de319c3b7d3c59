//! REST identity provider.
//!
//! Implements the `IdentityProvider` port against a token-endpoint
//! style identity service: password grant for sign-in, refresh-token
//! grant for forced refreshes, and a profile resource for account
//! data. The obtained credential is cached in memory; only its expiry
//! instant is persisted, through the `ExpiryStore` port.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use url::Url;
use vitae_application::ports::{Clock, ExpiryStore, IdentityProvider};
use vitae_domain::{AuthError, Credential, UserProfile};

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Error response from the identity service.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Cached session state.
struct SessionState {
    credential: Credential,
    profile: Option<UserProfile>,
}

/// Identity provider talking to a REST identity service.
pub struct RestIdentityProvider<C, S> {
    http: reqwest::Client,
    token_url: Url,
    accounts_url: Url,
    profile_url: Url,
    client_id: String,
    clock: C,
    store: S,
    session: RwLock<Option<SessionState>>,
}

impl<C, S> RestIdentityProvider<C, S>
where
    C: Clock,
    S: ExpiryStore,
{
    /// Creates a provider for the identity service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URLs cannot be derived from
    /// `base_url`.
    pub fn new(
        base_url: &Url,
        client_id: impl Into<String>,
        clock: C,
        store: S,
    ) -> Result<Self, AuthError> {
        let base = normalized(base_url);
        let endpoint = |path: &str| {
            base.join(path).map_err(|e| AuthError::Network {
                message: format!("invalid identity endpoint {path}: {e}"),
            })
        };

        Ok(Self {
            http: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            token_url: endpoint("v1/token")?,
            accounts_url: endpoint("v1/accounts")?,
            profile_url: endpoint("v1/profile")?,
            client_id: client_id.into(),
            clock,
            store,
            session: RwLock::new(None),
        })
    }

    /// Signs in with email and password and returns the user's profile.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the provider rejects the
    /// credentials or cannot be reached.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let credential = self
            .token_request(&[
                ("grant_type", "password"),
                ("client_id", &self.client_id),
                ("username", email),
                ("password", password),
            ])
            .await?;

        let profile = self.fetch_profile(&credential).await?;
        self.remember(credential, Some(profile.clone())).await;
        tracing::info!(email, "signed in");
        Ok(profile)
    }

    /// Creates an account, signs in, and returns the new profile.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the provider rejects the signup or
    /// cannot be reached.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserProfile, AuthError> {
        let response = self
            .http
            .post(self.accounts_url.clone())
            .json(&serde_json::json!({
                "client_id": self.client_id,
                "email": email,
                "password": password,
                "full_name": full_name,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        tracing::info!(email, "account created");
        self.sign_in(email, password).await
    }

    /// Returns the cached profile of the signed-in user, if any.
    pub async fn current_profile(&self) -> Option<UserProfile> {
        self.session
            .read()
            .await
            .as_ref()
            .and_then(|session| session.profile.clone())
    }

    /// Executes a token-endpoint request and builds the credential.
    async fn token_request(&self, params: &[(&str, &str)]) -> Result<Credential, AuthError> {
        let body = serde_urlencoded::to_string(params).map_err(|e| AuthError::Network {
            message: format!("failed to encode form: {e}"),
        })?;

        let response = self
            .http
            .post(self.token_url.clone())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let token: TokenResponse = response.json().await.map_err(|e| AuthError::Network {
            message: format!("failed to parse token response: {e}"),
        })?;

        Ok(Credential::new(
            token.access_token,
            token.expires_in,
            token.refresh_token,
            self.clock.now(),
        ))
    }

    /// Fetches the signed-in user's profile.
    async fn fetch_profile(&self, credential: &Credential) -> Result<UserProfile, AuthError> {
        let response = self
            .http
            .get(self.profile_url.clone())
            .header("Authorization", credential.authorization_header())
            .send()
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response.json().await.map_err(|e| AuthError::Network {
            message: format!("failed to parse profile: {e}"),
        })
    }

    /// Turns a non-success identity response into a user-facing error.
    async fn rejection(response: reqwest::Response) -> AuthError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<TokenErrorResponse>(&body).map_or_else(
            |_| "An error occurred during authentication".to_string(),
            |error| friendly_message(&error.error, error.error_description.as_deref()),
        );
        AuthError::Rejected { message }
    }

    /// Caches the credential and persists its expiry instant.
    async fn remember(&self, credential: Credential, profile: Option<UserProfile>) {
        if let Some(expires_at) = credential.expires_at {
            if let Err(err) = self.store.store(expires_at).await {
                tracing::warn!("failed to persist session expiry: {err}");
            }
        }

        let mut session = self.session.write().await;
        let profile = profile.or_else(|| {
            session
                .as_ref()
                .and_then(|existing| existing.profile.clone())
        });
        *session = Some(SessionState {
            credential,
            profile,
        });
    }
}

/// Maps identity-service error codes to user-facing messages.
fn friendly_message(code: &str, description: Option<&str>) -> String {
    match code {
        "EMAIL_EXISTS" => "This email is already registered".to_string(),
        "EMAIL_NOT_FOUND" => "No account found with this email".to_string(),
        "INVALID_PASSWORD" => "Invalid password".to_string(),
        "INVALID_EMAIL" => "Invalid email address".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters".to_string(),
        "TOO_MANY_ATTEMPTS" => "Too many attempts. Please try again later".to_string(),
        _ => description
            .map_or_else(|| "An error occurred during authentication".to_string(), String::from),
    }
}

/// Returns the base URL with a trailing slash so joins append segments.
fn normalized(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base
}

#[async_trait]
impl<C, S> IdentityProvider for RestIdentityProvider<C, S>
where
    C: Clock,
    S: ExpiryStore,
{
    async fn credential(&self, force_refresh: bool) -> Result<Credential, AuthError> {
        if !force_refresh {
            // Cached read only; expired credentials are still returned
            // and the request coordinator recovers from the rejection.
            return self
                .session
                .read()
                .await
                .as_ref()
                .map(|session| session.credential.clone())
                .ok_or(AuthError::NotSignedIn);
        }

        let refresh_token = {
            let session = self.session.read().await;
            let session = session.as_ref().ok_or(AuthError::NotSignedIn)?;
            session
                .credential
                .refresh_token
                .clone()
                .ok_or(AuthError::ExpiredNoRefresh)?
        };

        let refreshed = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("client_id", &self.client_id),
                ("refresh_token", &refresh_token),
            ])
            .await
            .map_err(|err| match err {
                AuthError::Rejected { message } | AuthError::Network { message } => {
                    AuthError::RefreshFailed { message }
                }
                other => other,
            })?;

        self.remember(refreshed.clone(), None).await;
        tracing::debug!("credential refreshed");
        Ok(refreshed)
    }

    async fn sign_out(&self) {
        self.session.write().await.take();
        if let Err(err) = self.store.clear().await {
            tracing::warn!("failed to clear persisted session expiry: {err}");
        }
        tracing::info!("signed out");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;
    use vitae_application::ports::ExpiryStoreError;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[derive(Default)]
    struct MemoryExpiryStore {
        value: Mutex<Option<DateTime<Utc>>>,
    }

    #[async_trait]
    impl ExpiryStore for MemoryExpiryStore {
        async fn load(&self) -> Result<Option<DateTime<Utc>>, ExpiryStoreError> {
            Ok(*self.value.lock().unwrap())
        }

        async fn store(&self, expires_at: DateTime<Utc>) -> Result<(), ExpiryStoreError> {
            *self.value.lock().unwrap() = Some(expires_at);
            Ok(())
        }

        async fn clear(&self) -> Result<(), ExpiryStoreError> {
            *self.value.lock().unwrap() = None;
            Ok(())
        }
    }

    fn provider() -> RestIdentityProvider<FixedClock, MemoryExpiryStore> {
        let base = Url::parse("https://id.example.com").unwrap();
        RestIdentityProvider::new(
            &base,
            "client-123",
            FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            MemoryExpiryStore::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoints_derive_from_base() {
        let provider = provider();
        assert_eq!(provider.token_url.as_str(), "https://id.example.com/v1/token");
        assert_eq!(
            provider.accounts_url.as_str(),
            "https://id.example.com/v1/accounts"
        );
    }

    #[test]
    fn test_base_with_path_keeps_prefix() {
        let base = Url::parse("https://example.com/identity").unwrap();
        let provider = RestIdentityProvider::new(
            &base,
            "c",
            FixedClock(Utc::now()),
            MemoryExpiryStore::default(),
        )
        .unwrap();
        assert_eq!(
            provider.token_url.as_str(),
            "https://example.com/identity/v1/token"
        );
    }

    #[tokio::test]
    async fn test_cached_read_without_session_is_not_signed_in() {
        let provider = provider();
        let outcome = provider.credential(false).await;
        assert!(matches!(outcome, Err(AuthError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_forced_refresh_without_session_is_not_signed_in() {
        let provider = provider();
        let outcome = provider.credential(true).await;
        assert!(matches!(outcome, Err(AuthError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_forced_refresh_without_refresh_token_fails_closed() {
        let provider = provider();
        let credential = Credential::new("t".to_string(), Some(60), None, provider.clock.now());
        provider.remember(credential, None).await;

        let outcome = provider.credential(true).await;
        assert!(matches!(outcome, Err(AuthError::ExpiredNoRefresh)));
    }

    #[tokio::test]
    async fn test_remember_persists_expiry_and_sign_out_clears_it() {
        let provider = provider();
        let now = provider.clock.now();
        let credential = Credential::new("t".to_string(), Some(3600), None, now);
        provider.remember(credential.clone(), None).await;

        assert_eq!(
            provider.store.load().await.unwrap(),
            credential.expires_at
        );
        assert_eq!(
            provider.credential(false).await.unwrap().token,
            "t"
        );

        provider.sign_out().await;
        assert_eq!(provider.store.load().await.unwrap(), None);
        assert!(matches!(
            provider.credential(false).await,
            Err(AuthError::NotSignedIn)
        ));
    }

    #[test]
    fn test_token_response_parses() {
        let json = r#"{"access_token": "abc", "token_type": "Bearer",
                       "expires_in": 3600, "refresh_token": "r1"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, Some(3600));
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn test_friendly_messages() {
        assert_eq!(
            friendly_message("EMAIL_EXISTS", None),
            "This email is already registered"
        );
        assert_eq!(friendly_message("INVALID_PASSWORD", None), "Invalid password");
        assert_eq!(
            friendly_message("SOMETHING_ELSE", Some("details")),
            "details"
        );
        assert_eq!(
            friendly_message("SOMETHING_ELSE", None),
            "An error occurred during authentication"
        );
    }
}
