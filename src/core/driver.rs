//! Run orchestration shared by the `populate` and `check-endpoints` binaries.
//!
//! Seeding phases run in dependency order with the configured pause between
//! them; nothing here returns an error for a failed API call, those are all
//! in the report by the time a phase returns.

use crate::{
    api::{ApiClient, Auth},
    config::Settings,
    core::{context::SeedContext, seed, verify},
    errors::{Error, Result},
};
use reqwest::StatusCode;
use std::fmt::Write as _;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// What the reachability probe saw.
#[derive(Debug)]
pub enum Probe {
    /// The API answered, with any status
    Reachable(StatusCode),
    /// No response at all
    Unreachable(Error),
}

/// Sends an anonymous `GET /users` to see whether the API is up.
///
/// 401 is the expected answer for an unauthenticated caller.
pub async fn probe_api(client: &ApiClient) -> Probe {
    println!("\nTesting API connection...");
    match client.get("/users", &Auth::Anonymous).await {
        Ok(response) => {
            let status = response.status;
            println!("API response: {}", status.as_u16());
            if status == StatusCode::UNAUTHORIZED {
                println!("401 response - authentication required (expected)");
                info!("API reachable, authentication required");
            } else if status.as_u16() >= 400 {
                println!("Warning: API answered with error {}", status.as_u16());
                warn!(status = status.as_u16(), "API probe returned an error status");
            }
            Probe::Reachable(status)
        }
        Err(e) => {
            println!("Error connecting to the API: {e}");
            println!("Check that the server is running, or press Ctrl+C to cancel");
            warn!(error = %e, "API probe failed");
            Probe::Unreachable(e)
        }
    }
}

/// Prints `prompt` and waits for the operator to press Enter.
pub async fn wait_for_enter(prompt: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(())
}

/// Runs every seeding phase in dependency order.
pub async fn populate(ctx: &mut SeedContext) {
    seed::seed_users(ctx).await;
    ctx.pause().await;
    seed::seed_foundations(ctx).await;
    ctx.pause().await;
    seed::seed_donations(ctx).await;
    ctx.pause().await;
    seed::seed_social_actions(ctx).await;
    ctx.pause().await;
    seed::seed_comments(ctx).await;
    ctx.pause().await;
    seed::seed_ratings(ctx).await;
    ctx.pause().await;
    seed::seed_participation_requests(ctx).await;
    ctx.pause().await;
    seed::seed_certificates(ctx).await;
    ctx.pause().await;
    seed::seed_notifications(ctx).await;
    ctx.pause().await;
    seed::seed_suggestions(ctx).await;
    ctx.pause().await;
    seed::seed_favorites(ctx).await;
}

/// Builds fixtures, then runs the read battery and the update and delete
/// sequences.
pub async fn check_endpoints(ctx: &mut SeedContext) {
    verify::prepare_fixtures(ctx).await;
    verify::run_read_checks(ctx).await;
    verify::run_updates(ctx).await;
    verify::run_deletes(ctx).await;
}

/// What a populate run is about to create.
#[must_use]
pub fn render_populate_banner(settings: &Settings) -> String {
    let volumes = &settings.plan.volumes;
    let mut out = String::new();
    let _ = writeln!(out, "=== POPULATING THE DATABASE ===");
    let _ = writeln!(out, "This run creates realistic, related records.");
    let _ = writeln!(out, "- {} regular users", volumes.regular_users);
    let _ = writeln!(out, "- {} foundation users", volumes.foundation_users);
    let _ = writeln!(
        out,
        "- Donations (about {})",
        volumes.regular_users * volumes.donations_per_user / 2
    );
    let _ = writeln!(
        out,
        "- Social actions (about {})",
        volumes.foundation_users * volumes.social_actions_per_foundation
    );
    let _ = writeln!(
        out,
        "- Plenty of related data (comments, ratings, requests, ...)"
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Make sure the server is running at {}", settings.api.base_url);
    let _ = writeln!(out, "API URL: {}", settings.api.base_url);
    let _ = write!(out, "Auth URL: {}", settings.api.auth_url);
    out
}

/// Per-collection counts followed by the per-phase outcome table.
#[must_use]
pub fn render_run_summary(ctx: &SeedContext, title: &str) -> String {
    let mut out = format!("\n=== {title} ===\n");
    for (name, count) in ctx.collection_counts() {
        let _ = writeln!(out, "{name} created: {count}");
    }
    out.push('\n');
    out.push_str(&ctx.report.render_summary());
    out
}

/// Full `populate` flow: banner, prompt, probe, phases, summary.
pub async fn run_populate(settings: &Settings) -> Result<()> {
    println!("{}", render_populate_banner(settings));
    wait_for_enter("Press Enter to start populating...").await?;

    let mut ctx = SeedContext::new(settings)?;
    if let Probe::Unreachable(_) = probe_api(&ctx.client).await {
        wait_for_enter("Press Enter to continue anyway...").await?;
    }

    populate(&mut ctx).await;
    println!("{}", render_run_summary(&ctx, "DATABASE POPULATION COMPLETE"));
    info!(totals = ?ctx.report.totals(), "Populate run finished");
    Ok(())
}

/// Full `check-endpoints` flow: banner, prompt, verification, summary.
pub async fn run_check_endpoints(settings: &Settings) -> Result<()> {
    println!("=== STARTING ENDPOINT TESTING ===");
    println!("This run exercises the endpoints the populate run does not cover.");
    println!("API URL: {}", settings.api.base_url);
    wait_for_enter("Press Enter to start testing...").await?;

    let mut ctx = SeedContext::new(settings)?;
    check_endpoints(&mut ctx).await;
    println!("{}", render_run_summary(&ctx, "TESTING COMPLETED"));
    info!(totals = ?ctx.report.totals(), "Endpoint check finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::ApiConfig, core::report::Outcome, models::UserType, test_utils::*};
    use mockito::Matcher;

    #[tokio::test]
    async fn test_probe_treats_401_as_reachable() -> Result<()> {
        let mut server = mock_server().await;
        server
            .mock("GET", "/api/users")
            .with_status(401)
            .with_body(r#"{"message": "Unauthorized"}"#)
            .create_async()
            .await;

        let probe = probe_api(&test_client(&server)).await;

        assert!(matches!(probe, Probe::Reachable(StatusCode::UNAUTHORIZED)));
        Ok(())
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable_server() -> Result<()> {
        let client = ApiClient::new(&ApiConfig::for_base_url("http://127.0.0.1:1/api"))?;

        let probe = probe_api(&client).await;

        assert!(matches!(probe, Probe::Unreachable(Error::Transport(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_populate_runs_every_phase_in_order() -> Result<()> {
        let mut server = mock_server().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(500)
            .with_body("Internal server error")
            .create_async()
            .await;
        let mut ctx = test_context(&server)?;

        populate(&mut ctx).await;

        let phases: Vec<_> = ctx.report.phases().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            phases,
            [
                "Creating regular users",
                "Creating foundation users",
                "Creating foundations",
                "Creating donations",
                "Creating social actions",
                "Creating comments",
                "Creating ratings",
                "Creating participation requests",
                "Creating certificates",
                "Creating notifications",
                "Creating suggestions",
                "Creating favorites",
            ]
        );
        assert_eq!(ctx.collection_counts().iter().map(|(_, n)| n).sum::<usize>(), 0);
        assert_eq!(ctx.report.count(Outcome::Passed), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_summary_lists_counts_and_totals() -> Result<()> {
        let server = mock_server().await;
        let mut ctx = test_context(&server)?;
        ctx.report.begin_phase("Creating regular users");
        add_logged_in_user(&mut ctx, 1, UserType::User);
        ctx.report.pass("User created");

        let summary = render_run_summary(&ctx, "TESTING COMPLETED");

        assert!(summary.contains("=== TESTING COMPLETED ==="));
        assert!(summary.contains("Users created: 1"));
        assert!(summary.contains("Favorites created: 0"));
        assert!(summary.lines().last().unwrap().starts_with("Total"));
        Ok(())
    }

    #[test]
    fn test_populate_banner_reflects_volumes() {
        let server_url = "http://localhost:3001/api";
        let mut settings = Settings {
            api: ApiConfig::for_base_url(server_url),
            plan: crate::config::SeedPlan::default(),
        };
        settings.plan.volumes = small_volumes();

        let banner = render_populate_banner(&settings);

        assert!(banner.contains("- 2 regular users"));
        assert!(banner.contains("- 1 foundation users"));
        assert!(banner.contains("Donations (about 1)"));
        assert!(banner.contains("Auth URL: http://localhost:3001/api/auth"));
    }
}
