//! Both runs against a simulated API that accepts everything.

use foundation_seeder::{
    config::{ApiConfig, SeedPlan, SeedVolumes, Settings},
    core::{
        context::SeedContext,
        driver,
        report::{Outcome, RunReport},
    },
    errors::Result,
};
use mockito::{Matcher, ServerGuard};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Answers every POST with a fresh id and a token, everything else with `{}`.
async fn permissive_server() -> ServerGuard {
    let mut server = mockito::Server::new_async().await;
    let next = Arc::new(AtomicI64::new(1));
    server
        .mock("POST", Matcher::Any)
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let id = next.fetch_add(1, Ordering::SeqCst);
            format!(r#"{{"id": {id}, "access_token": "tok-{id}"}}"#).into()
        })
        .create_async()
        .await;
    for method in ["GET", "PATCH", "DELETE"] {
        server
            .mock(method, Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;
    }
    server
}

fn context(server: &ServerGuard) -> Result<SeedContext> {
    let settings = Settings {
        api: ApiConfig::for_base_url(&format!("{}/api", server.url())),
        plan: SeedPlan {
            phase_pause_ms: 0,
            volumes: SeedVolumes {
                regular_users: 3,
                foundation_users: 2,
                donations_per_user: 2,
                social_actions_per_foundation: 2,
                comments_per_entity: 1,
                max_ratings: 3,
                participation_requests: 4,
                certificates: 3,
                notifications: 4,
                suggestions: 3,
                favorites_per_user: 2,
            },
            ..SeedPlan::default()
        },
    };
    SeedContext::with_rng(&settings, StdRng::seed_from_u64(42), RunReport::silent())
}

#[tokio::test]
async fn test_populate_against_permissive_api() -> Result<()> {
    let server = permissive_server().await;
    let mut ctx = context(&server)?;

    driver::populate(&mut ctx).await;

    assert_eq!(ctx.report.count(Outcome::Failed), 0);
    // Admin, three donors, two foundation accounts
    assert_eq!(ctx.users.len(), 6);
    assert_eq!(ctx.session.len(), 6);
    assert!(ctx.session.admin_token().is_some());
    // Every foundation-type account gets a profile, the admin included
    assert_eq!(ctx.foundations.len(), 3);
    assert!((3..=6).contains(&ctx.donations.len()));
    let foundations = ctx.foundations.len();
    assert!((foundations..=foundations * 2).contains(&ctx.social_actions.len()));
    assert_eq!(ctx.ratings.len(), 3.min(ctx.donations.len()));
    assert_eq!(ctx.certificates.len(), 3);
    assert_eq!(ctx.notifications.len(), 4);
    assert_eq!(ctx.suggestions.len(), 3);
    for donation in &ctx.donations {
        assert!(ctx.foundations.contains(&donation.foundation_id));
        assert!((10.0..=1000.0).contains(&donation.amount));
    }
    let now = chrono::Utc::now();
    for request in &ctx.participation_requests {
        let action = ctx.social_actions.get(&request.social_action_id).unwrap();
        assert!(action.is_open_at(now));
    }
    Ok(())
}

#[tokio::test]
async fn test_check_endpoints_against_permissive_api() -> Result<()> {
    let server = permissive_server().await;
    let mut ctx = context(&server)?;

    driver::check_endpoints(&mut ctx).await;

    assert_eq!(ctx.report.count(Outcome::Failed), 0);
    for phase in [
        "Creating test data",
        "Testing GET endpoints",
        "Testing update endpoints",
        "Testing delete endpoints",
    ] {
        let summary = ctx.report.phase(phase).unwrap();
        assert!(summary.passed > 0, "{phase} recorded no passes");
    }
    Ok(())
}
