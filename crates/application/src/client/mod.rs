//! Authenticated request coordinator.
//!
//! Every backend call goes through [`ApiClient`]: it resolves the
//! request path against the base URL, attaches the cached bearer
//! credential, and transparently recovers from a rejected credential
//! with a single-flight refresh followed by exactly one retry.

mod refresh;

pub use refresh::RefreshGate;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;
use vitae_domain::{ApiRequest, ApiResponse};

use crate::error::{ApiError, ApiResult};
use crate::ports::{HttpTransport, IdentityProvider, Navigator, TransportError};

/// Authenticated HTTP client for the resume-analysis backend.
pub struct ApiClient<T, P, N> {
    transport: Arc<T>,
    identity: Arc<P>,
    gate: RefreshGate<P, N>,
    base_url: Url,
}

impl<T, P, N> ApiClient<T, P, N>
where
    T: HttpTransport,
    P: IdentityProvider,
    N: Navigator,
{
    /// Creates a client for the backend at `base_url`.
    pub fn new(transport: Arc<T>, identity: Arc<P>, navigator: Arc<N>, base_url: Url) -> Self {
        Self {
            transport,
            gate: RefreshGate::new(identity.clone(), navigator),
            identity,
            base_url,
        }
    }

    /// Sends a request with the session credential attached.
    ///
    /// On a 401 the client performs (or joins) one forced credential
    /// refresh and resubmits the request once with the new credential.
    /// A second 401 is surfaced as [`ApiError::Unauthorized`] without
    /// another refresh.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures, unrecoverable
    /// sessions, and non-success statuses.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let request = self.resolve(request)?;

        // Attach the cached credential without a provider round-trip. A
        // missing credential is not fatal here: the 401 path recovers.
        let bearer = match self.identity.credential(false).await {
            Ok(credential) => Some(credential.token),
            Err(err) => {
                tracing::debug!("sending without credential: {err}");
                None
            }
        };

        let response = self
            .transport
            .send(request.clone().with_bearer(bearer))
            .await?;
        if !response.is_unauthorized() {
            return Self::into_result(response);
        }

        let refreshed = self.gate.recover().await?;
        let retried = self
            .transport
            .send(request.with_bearer(Some(refreshed.token)))
            .await?;
        Self::into_result(retried)
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// As [`Self::send`], plus [`ApiError::Decode`] when the body does
    /// not match `O`.
    pub async fn send_json<O: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<O> {
        let response = self.send(request).await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Rewrites the request path to an absolute URL under the base URL.
    fn resolve(&self, mut request: ApiRequest) -> ApiResult<ApiRequest> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.path)))?;
        request.path = url.into();
        Ok(request)
    }

    /// Classifies a settled response.
    fn into_result(response: ApiResponse) -> ApiResult<ApiResponse> {
        if response.is_success() {
            return Ok(response);
        }
        if response.is_unauthorized() {
            return Err(ApiError::Unauthorized);
        }
        let message = response
            .error_message()
            .unwrap_or_else(|| format!("request failed with status {}", response.status));
        Err(ApiError::Api {
            status: response.status,
            message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use vitae_domain::{AuthError, Credential};

    type Responder =
        Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync>;

    /// Transport that answers from a closure and records every request.
    pub(crate) struct ScriptedTransport {
        pub(crate) requests: Mutex<Vec<ApiRequest>>,
        responder: Responder,
    }

    impl ScriptedTransport {
        pub(crate) fn new(
            responder: impl Fn(&ApiRequest) -> Result<ApiResponse, TransportError>
            + Send
            + Sync
            + 'static,
        ) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responder: Box::new(responder),
            }
        }

        pub(crate) fn sent(&self) -> usize {
            self.requests.lock().map_or(0, |requests| requests.len())
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let response = (self.responder)(&request);
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request);
            }
            response
        }
    }

    /// Identity provider with a scripted refresh outcome.
    pub(crate) struct ScriptedIdentity {
        cached: Option<String>,
        refresh_succeeds: bool,
        pub(crate) refresh_calls: AtomicUsize,
        pub(crate) refresh_settled: AtomicBool,
        pub(crate) sign_outs: AtomicUsize,
    }

    impl ScriptedIdentity {
        pub(crate) fn with_cached(token: &str) -> Self {
            Self {
                cached: Some(token.to_string()),
                refresh_succeeds: true,
                refresh_calls: AtomicUsize::new(0),
                refresh_settled: AtomicBool::new(false),
                sign_outs: AtomicUsize::new(0),
            }
        }

        pub(crate) fn signed_out() -> Self {
            Self {
                cached: None,
                ..Self::with_cached("")
            }
        }

        pub(crate) fn refresh_failing(mut self) -> Self {
            self.refresh_succeeds = false;
            self
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedIdentity {
        async fn credential(&self, force_refresh: bool) -> Result<Credential, AuthError> {
            if force_refresh {
                self.refresh_calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                self.refresh_settled.store(true, Ordering::SeqCst);
                return if self.refresh_succeeds {
                    Ok(Credential::new("fresh".to_string(), Some(3600), None, Utc::now()))
                } else {
                    Err(AuthError::RefreshFailed {
                        message: "refresh token revoked".to_string(),
                    })
                };
            }

            self.cached.as_ref().map_or(Err(AuthError::NotSignedIn), |token| {
                Ok(Credential::new(token.clone(), Some(3600), None, Utc::now()))
            })
        }

        async fn sign_out(&self) {
            self.sign_outs.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) struct CountingNavigator {
        pub(crate) redirects: AtomicUsize,
    }

    impl CountingNavigator {
        pub(crate) fn new() -> Self {
            Self {
                redirects: AtomicUsize::new(0),
            }
        }
    }

    impl Navigator for CountingNavigator {
        fn redirect_to_login(&self) {
            self.redirects.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) fn ok_json(body: &str) -> ApiResponse {
        ApiResponse::new(200, HashMap::new(), body.as_bytes().to_vec())
    }

    pub(crate) fn status(code: u16, body: &str) -> ApiResponse {
        ApiResponse::new(code, HashMap::new(), body.as_bytes().to_vec())
    }

    pub(crate) fn client(
        transport: ScriptedTransport,
        identity: ScriptedIdentity,
    ) -> (
        ApiClient<ScriptedTransport, ScriptedIdentity, CountingNavigator>,
        Arc<ScriptedTransport>,
        Arc<ScriptedIdentity>,
        Arc<CountingNavigator>,
    ) {
        let transport = Arc::new(transport);
        let identity = Arc::new(identity);
        let navigator = Arc::new(CountingNavigator::new());
        let base_url = Url::parse("https://api.example.com").unwrap();
        (
            ApiClient::new(
                transport.clone(),
                identity.clone(),
                navigator.clone(),
                base_url,
            ),
            transport,
            identity,
            navigator,
        )
    }

    /// Responds 401 to the stale token, 200 to the refreshed one.
    fn refresh_aware_responder(request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        if request.bearer.as_deref() == Some("fresh") {
            Ok(ok_json(r#"{"status": "success", "resumes": []}"#))
        } else {
            Ok(status(401, r#"{"message": "token expired"}"#))
        }
    }

    #[tokio::test]
    async fn test_success_passes_through_with_cached_bearer() {
        let (client, transport, identity, _) = client(
            ScriptedTransport::new(|_| Ok(ok_json(r#"{"answer": "ok"}"#))),
            ScriptedIdentity::with_cached("cached-token"),
        );

        let response = client.send(ApiRequest::get("/api/resumes/list")).await.unwrap();
        assert!(response.is_success());
        assert_eq!(identity.refresh_calls.load(Ordering::SeqCst), 0);

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].bearer.as_deref(), Some("cached-token"));
        assert_eq!(requests[0].path, "https://api.example.com/api/resumes/list");
    }

    #[tokio::test]
    async fn test_missing_credential_sends_without_bearer() {
        let (client, transport, _, _) = client(
            ScriptedTransport::new(|_| Ok(ok_json("{}"))),
            ScriptedIdentity::signed_out(),
        );

        client.send(ApiRequest::get("/api/resumes/list")).await.unwrap();
        let requests = transport.requests.lock().unwrap();
        assert!(requests[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_refreshes_and_retries_once() {
        let (client, transport, identity, _) = client(
            ScriptedTransport::new(refresh_aware_responder),
            ScriptedIdentity::with_cached("stale"),
        );

        let response = client.send(ApiRequest::get("/api/resumes/list")).await.unwrap();
        assert!(response.is_success());
        assert_eq!(identity.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.sent(), 2);

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].bearer.as_deref(), Some("stale"));
        assert_eq!(requests[1].bearer.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_requests_share_one_refresh() {
        let (client, transport, identity, _) = client(
            ScriptedTransport::new(refresh_aware_responder),
            ScriptedIdentity::with_cached("stale"),
        );

        let (a, b, c) = tokio::join!(
            client.send(ApiRequest::get("/api/resumes/1")),
            client.send(ApiRequest::get("/api/resumes/2")),
            client.send(ApiRequest::get("/api/resumes/3")),
        );

        assert_eq!(identity.refresh_calls.load(Ordering::SeqCst), 1);
        for outcome in [a, b, c] {
            assert!(outcome.unwrap().is_success());
        }
        // Each request sent twice: the rejected attempt and the retry.
        assert_eq!(transport.sent(), 6);
        // Every retry carries the shared refreshed credential and was
        // dispatched only after the refresh settled.
        assert!(identity.refresh_settled.load(Ordering::SeqCst));
        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests.iter().filter(|r| r.bearer.as_deref() == Some("fresh")).count(),
            3
        );
    }

    #[tokio::test]
    async fn test_second_unauthorized_after_retry_does_not_refresh_again() {
        let (client, transport, identity, _) = client(
            ScriptedTransport::new(|_| Ok(status(401, r#"{"message": "nope"}"#))),
            ScriptedIdentity::with_cached("stale"),
        );

        let outcome = client.send(ApiRequest::get("/api/resumes/list")).await;
        assert!(matches!(outcome, Err(ApiError::Unauthorized)));
        assert_eq!(identity.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.sent(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_signs_out_and_redirects_once() {
        let (client, _, identity, navigator) = client(
            ScriptedTransport::new(|_| Ok(status(401, "{}"))),
            ScriptedIdentity::with_cached("stale").refresh_failing(),
        );

        let (a, b, c) = tokio::join!(
            client.send(ApiRequest::get("/api/resumes/1")),
            client.send(ApiRequest::get("/api/resumes/2")),
            client.send(ApiRequest::get("/api/resumes/3")),
        );

        for outcome in [a, b, c] {
            assert!(matches!(
                outcome,
                Err(ApiError::Auth(AuthError::RefreshFailed { .. }))
            ));
        }
        assert_eq!(identity.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(identity.sign_outs.load(Ordering::SeqCst), 1);
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_statuses_surface_without_refresh() {
        let (client, _, identity, _) = client(
            ScriptedTransport::new(|_| Ok(status(404, r#"{"message": "resume not found"}"#))),
            ScriptedIdentity::with_cached("cached"),
        );

        let outcome = client.send(ApiRequest::get("/api/resumes/99")).await;
        match outcome {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "resume not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(identity.refresh_calls.load(Ordering::SeqCst), 0);
    }
}
