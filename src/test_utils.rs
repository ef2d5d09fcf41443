//! Shared test utilities for the seeding client.
//!
//! This module provides a mock API server, a context wired to it, and record
//! fixtures with sensible defaults.

use crate::{
    api::ApiClient,
    config::{ApiConfig, SeedPlan, SeedVolumes, Settings},
    core::{context::SeedContext, report::RunReport},
    errors::Result,
    models::{
        DonationRecord, EntityId, FoundationRecord, SocialActionRecord, UserRecord, UserType,
    },
};
use chrono::{DateTime, Utc};
use mockito::{Matcher, Mock, ServerGuard};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Starts a mock API server. Routes live under `/api`.
pub async fn mock_server() -> ServerGuard {
    mockito::Server::new_async().await
}

/// Settings pointing at the mock server, with no phase pause.
pub fn test_settings(server: &ServerGuard) -> Settings {
    Settings {
        api: ApiConfig::for_base_url(&format!("{}/api", server.url())),
        plan: SeedPlan {
            phase_pause_ms: 0,
            volumes: small_volumes(),
            ..SeedPlan::default()
        },
    }
}

/// One or two of everything.
pub fn small_volumes() -> SeedVolumes {
    SeedVolumes {
        regular_users: 2,
        foundation_users: 1,
        donations_per_user: 1,
        social_actions_per_foundation: 1,
        comments_per_entity: 1,
        max_ratings: 2,
        participation_requests: 2,
        certificates: 2,
        notifications: 2,
        suggestions: 2,
        favorites_per_user: 1,
    }
}

pub fn test_client(server: &ServerGuard) -> ApiClient {
    #[allow(clippy::unwrap_used)]
    ApiClient::new(&test_settings(server).api).unwrap()
}

/// Context against the mock server with a fixed RNG seed and a silent report.
pub fn test_context(server: &ServerGuard) -> Result<SeedContext> {
    SeedContext::with_rng(
        &test_settings(server),
        StdRng::seed_from_u64(7),
        RunReport::silent(),
    )
}

/// Mocks the login route for one email.
pub async fn mock_login(
    server: &mut ServerGuard,
    email: &str,
    status: usize,
    body: &str,
    hits: usize,
) -> Mock {
    server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::PartialJson(json!({ "email": email })))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

fn counting_mock(
    server: &mut ServerGuard,
    method: &str,
    path: impl Into<Matcher>,
    first_id: i64,
) -> Mock {
    let next = Arc::new(AtomicI64::new(first_id));
    server
        .mock(method, path)
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let id = next.fetch_add(1, Ordering::SeqCst);
            format!(r#"{{"id": {id}}}"#).into()
        })
}

/// Mocks a creation route answering 201 with increasing numeric ids from `first_id`.
pub async fn mock_created(
    server: &mut ServerGuard,
    method: &str,
    path: impl Into<Matcher>,
    first_id: i64,
) -> Mock {
    counting_mock(server, method, path, first_id)
        .expect_at_least(0)
        .create_async()
        .await
}

/// Like [`mock_created`], but only answers requests sent with `Bearer {token}`
/// and expects exactly `hits` of them.
pub async fn mock_created_as(
    server: &mut ServerGuard,
    path: impl Into<Matcher>,
    token: &str,
    first_id: i64,
    hits: usize,
) -> Mock {
    counting_mock(server, "POST", path, first_id)
        .match_header("authorization", format!("Bearer {token}").as_str())
        .expect(hits)
        .create_async()
        .await
}

/// Mocks a route that must not be called; check with `assert_async`.
pub async fn mock_never(server: &mut ServerGuard, method: &str, path: impl Into<Matcher>) -> Mock {
    server
        .mock(method, path)
        .with_status(500)
        .expect(0)
        .create_async()
        .await
}

pub fn user_fixture(id: i64, user_type: UserType) -> UserRecord {
    UserRecord {
        id: EntityId::Int(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        password: "Password123".to_string(),
        user_type,
    }
}

pub fn foundation_fixture(id: i64, owner_id: i64) -> FoundationRecord {
    FoundationRecord {
        id: EntityId::Int(id),
        user_id: EntityId::Int(owner_id),
        legal_name: format!("Foundation {id}"),
    }
}

pub fn donation_fixture(id: i64, donor_id: i64, foundation_id: i64) -> DonationRecord {
    DonationRecord {
        id: EntityId::Int(id),
        user_id: EntityId::Int(donor_id),
        foundation_id: EntityId::Int(foundation_id),
        amount: 25.0,
    }
}

pub fn social_action_fixture(
    id: i64,
    foundation_id: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> SocialActionRecord {
    SocialActionRecord {
        id: EntityId::Int(id),
        foundation_id: EntityId::Int(foundation_id),
        description: format!("Social action {id}"),
        start_date,
        end_date,
    }
}

/// Registers a logged-in account in the context.
pub fn add_logged_in_user(ctx: &mut SeedContext, id: i64, user_type: UserType) -> UserRecord {
    let user = user_fixture(id, user_type);
    ctx.users.insert(user.clone());
    ctx.session.store(user.id.clone(), format!("token-{id}"));
    user
}
