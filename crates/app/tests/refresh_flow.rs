//! Integration tests for the authenticated request flow.
//!
//! These drive the public API of the application layer with scripted
//! ports: concurrent requests hitting an expired credential must share
//! one refresh, and an unrecoverable refresh must clear the session
//! exactly once.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use url::Url;
use vitae_application::ports::{
    HttpTransport, IdentityProvider, Navigator, TransportError,
};
use vitae_application::{ApiClient, ApiError, ResumeService};
use vitae_domain::{ApiRequest, ApiResponse, AuthError, Credential, responses};

/// Transport that rejects stale bearers and accepts refreshed ones.
struct FlakyAuthTransport {
    sent: AtomicUsize,
}

impl FlakyAuthTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl HttpTransport for FlakyAuthTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        let body = if request.path.ends_with("/api/resumes/list") {
            r#"{"status": "success", "resumes": []}"#
        } else {
            r#"{"answer": "refreshed"}"#
        };
        if request.bearer.as_deref() == Some("fresh") {
            Ok(ApiResponse::new(200, HashMap::new(), body.as_bytes().to_vec()))
        } else {
            Ok(ApiResponse::new(
                401,
                HashMap::new(),
                br#"{"message": "token expired"}"#.to_vec(),
            ))
        }
    }
}

struct CountingIdentity {
    refreshes: AtomicUsize,
    sign_outs: AtomicUsize,
    refresh_succeeds: bool,
}

impl CountingIdentity {
    fn new(refresh_succeeds: bool) -> Arc<Self> {
        Arc::new(Self {
            refreshes: AtomicUsize::new(0),
            sign_outs: AtomicUsize::new(0),
            refresh_succeeds,
        })
    }
}

#[async_trait]
impl IdentityProvider for CountingIdentity {
    async fn credential(&self, force_refresh: bool) -> Result<Credential, AuthError> {
        if force_refresh {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.refresh_succeeds {
                Ok(Credential::new("fresh".to_string(), Some(3600), None, Utc::now()))
            } else {
                Err(AuthError::RefreshFailed {
                    message: "refresh token revoked".to_string(),
                })
            }
        } else {
            Ok(Credential::new("stale".to_string(), Some(3600), None, Utc::now()))
        }
    }

    async fn sign_out(&self) {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
    }
}

struct CountingNavigator {
    redirects: AtomicUsize,
}

impl CountingNavigator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            redirects: AtomicUsize::new(0),
        })
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

fn service(
    transport: Arc<FlakyAuthTransport>,
    identity: Arc<CountingIdentity>,
    navigator: Arc<CountingNavigator>,
) -> ResumeService<FlakyAuthTransport, CountingIdentity, CountingNavigator> {
    let client = ApiClient::new(
        transport,
        identity,
        navigator,
        Url::parse("https://api.example.com").unwrap(),
    );
    ResumeService::new(Arc::new(client))
}

#[tokio::test]
async fn concurrent_requests_share_a_single_refresh() {
    let transport = FlakyAuthTransport::new();
    let identity = CountingIdentity::new(true);
    let navigator = CountingNavigator::new();
    let service = service(transport.clone(), identity.clone(), navigator.clone());

    let (list, ask_a, ask_b) = tokio::join!(
        service.list(),
        service.ask("which skills does resume 1 highlight?", Some(1)),
        service.ask("which skills does resume 2 highlight?", Some(2)),
    );

    assert!(list.unwrap().is_empty());
    assert_eq!(ask_a.unwrap(), "refreshed");
    assert_eq!(ask_b.unwrap(), "refreshed");

    // One refresh for the episode, two transport calls per request.
    assert_eq!(identity.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(transport.sent.load(Ordering::SeqCst), 6);
    assert_eq!(identity.sign_outs.load(Ordering::SeqCst), 0);
    assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_refresh_rejects_everything_and_clears_the_session_once() {
    let transport = FlakyAuthTransport::new();
    let identity = CountingIdentity::new(false);
    let navigator = CountingNavigator::new();
    let service = service(transport, identity.clone(), navigator.clone());

    let (a, b, c) = tokio::join!(
        service.list(),
        service.detail(1),
        service.skills(2),
    );

    for outcome in [a.map(|_| ()), b.map(|_| ()), c.map(|_| ())] {
        assert!(matches!(
            outcome,
            Err(ApiError::Auth(AuthError::RefreshFailed { .. }))
        ));
    }
    assert_eq!(identity.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(identity.sign_outs.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn out_of_scope_questions_never_reach_the_backend() {
    let transport = FlakyAuthTransport::new();
    let identity = CountingIdentity::new(true);
    let navigator = CountingNavigator::new();
    let service = service(transport.clone(), identity, navigator);

    let answer = service.ask("what's the weather", None).await.unwrap();
    assert_eq!(answer, responses::OUT_OF_SCOPE);
    assert_eq!(transport.sent.load(Ordering::SeqCst), 0);
}
