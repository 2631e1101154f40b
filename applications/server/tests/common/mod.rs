//! Common test utilities and fixtures

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Local, SubsecRound, TimeDelta, Utc};
use freight_server::{create_router, AppState, CredentialStore, TokenIssuer};
use mockable::Clock;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Lowest cost bcrypt accepts; keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Clock the test controls
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Current wall-clock second; a whole second keeps `exp` arithmetic exact
    pub fn fixture() -> Self {
        Self::new(Utc::now().trunc_subsecs(0))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock().unwrap() += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// A fully wired application over a throwaway on-disk database
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub clock: Arc<MutableClock>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_clock(MutableClock::fixture()).await
    }

    pub async fn with_clock(clock: MutableClock) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = freight_storage::create_pool(&db_url).await.unwrap();
        freight_storage::run_migrations(&pool).await.unwrap();

        let clock = Arc::new(clock);
        let shared: Arc<dyn Clock + Send + Sync> = clock.clone();

        let tokens = TokenIssuer::new(TEST_SECRET, Arc::clone(&shared)).unwrap();
        let state = AppState::new(
            pool,
            CredentialStore::new(TEST_BCRYPT_COST),
            tokens,
            shared,
        );
        let router = create_router(state.clone());

        Self {
            state,
            router,
            clock,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and decode the JSON envelope
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Sign up and sign in, returning the bearer token
    pub async fn signed_in_token(&self, email: &str) -> String {
        self.state
            .accounts
            .sign_up("Test User", email, fixtures::TEST_PASSWORD)
            .await
            .unwrap();

        self.state
            .accounts
            .sign_in(email, fixtures::TEST_PASSWORD)
            .await
            .unwrap()
            .token
    }

    pub async fn user_count(&self) -> usize {
        freight_storage::users::get_all(&self.state.pool)
            .await
            .unwrap()
            .len()
    }
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_FULL_NAME: &str = "A B";
    pub const TEST_EMAIL: &str = "a@b.com";
    pub const TEST_PASSWORD: &str = "secret123";
}
