//! GET battery over listing, lookup and filter endpoints.

use crate::{
    api::Auth,
    core::{
        context::SeedContext,
        verify::{Actors, verify_call},
    },
    models::EntityId,
};
use reqwest::Method;

pub const PHASE: &str = "Testing GET endpoints";

/// Who a check acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    /// The first donor account
    Member,
    /// The first foundation account
    Admin,
}

/// One `GET` to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCheck {
    /// Label printed with the outcome
    pub name: &'static str,
    /// Path under the API root
    pub path: String,
    pub actor: Actor,
}

fn check(name: &'static str, path: impl Into<String>, actor: Actor) -> EndpointCheck {
    EndpointCheck {
        name,
        path: path.into(),
        actor,
    }
}

/// Builds the battery from the ids in `ctx`.
///
/// Checks that need a foundation, donation or social action are left out
/// when none was created.
#[must_use]
pub fn build_read_checks(ctx: &SeedContext, actors: &Actors) -> Vec<EndpointCheck> {
    use Actor::{Admin, Anonymous, Member};

    let member = &actors.member.id;
    let admin = &actors.admin.id;
    let foundation: Option<&EntityId> = ctx.foundations.first().map(|f| &f.id);
    let donation: Option<&EntityId> = ctx.donations.first().map(|d| &d.id);
    let action: Option<&EntityId> = ctx.social_actions.first().map(|a| &a.id);

    let by_foundation = |name, template: fn(&EntityId) -> String, actor| {
        foundation.map(|id| check(name, template(id), actor))
    };
    let by_donation = |name, template: fn(&EntityId) -> String, actor| {
        donation.map(|id| check(name, template(id), actor))
    };
    let by_action = |name, template: fn(&EntityId) -> String, actor| {
        action.map(|id| check(name, template(id), actor))
    };

    let checks = [
        // Users
        Some(check("Get all users", "/users", Admin)),
        Some(check("Get user profile", format!("/users/{member}"), Member)),
        // Foundations
        Some(check("Get all foundations", "/foundations", Anonymous)),
        by_foundation("Get foundation by ID", |id| format!("/foundations/{id}"), Anonymous),
        Some(check(
            "Get foundation by user ID",
            format!("/foundations/user/{admin}"),
            Anonymous,
        )),
        // Donations
        Some(check("Get all donations", "/donations", Admin)),
        by_donation("Get donation by ID", |id| format!("/donations/{id}"), Member),
        Some(check(
            "Get donations by user",
            format!("/donations/user/{member}"),
            Member,
        )),
        by_foundation(
            "Get donations by foundation",
            |id| format!("/donations/foundation/{id}"),
            Admin,
        ),
        // Social actions
        Some(check("Get all social actions", "/social-actions", Anonymous)),
        by_action("Get social action by ID", |id| format!("/social-actions/{id}"), Anonymous),
        Some(check("Get upcoming social actions", "/social-actions/upcoming", Anonymous)),
        Some(check("Get active social actions", "/social-actions/active", Anonymous)),
        by_foundation(
            "Get social actions by foundation",
            |id| format!("/social-actions/foundation/{id}"),
            Anonymous,
        ),
        // Opportunities
        Some(check("Get all opportunities", "/opportunities", Anonymous)),
        by_action("Get opportunity by ID", |id| format!("/opportunities/{id}"), Anonymous),
        Some(check("Get upcoming opportunities", "/opportunities/upcoming", Anonymous)),
        Some(check("Get active opportunities", "/opportunities/active", Anonymous)),
        by_foundation(
            "Get opportunities by foundation",
            |id| format!("/opportunities/foundation/{id}"),
            Anonymous,
        ),
        // Comments
        Some(check("Get all comments", "/comments", Admin)),
        Some(check(
            "Get comments by user",
            format!("/comments/user/{member}"),
            Member,
        )),
        by_donation(
            "Get comments by donation",
            |id| format!("/comments/donation/{id}"),
            Anonymous,
        ),
        by_action(
            "Get comments by social action",
            |id| format!("/comments/social-action/{id}"),
            Anonymous,
        ),
        by_action(
            "Get comments by opportunity",
            |id| format!("/comments/opportunity/{id}"),
            Anonymous,
        ),
        by_foundation(
            "Get comments by foundation",
            |id| format!("/comments/foundation/{id}"),
            Anonymous,
        ),
        // Ratings
        Some(check("Get all ratings", "/ratings", Anonymous)),
        Some(check(
            "Get ratings by user",
            format!("/ratings/user/{member}"),
            Anonymous,
        )),
        by_donation(
            "Get ratings by donation",
            |id| format!("/ratings/donation/{id}"),
            Anonymous,
        ),
        by_donation(
            "Get average rating for donation",
            |id| format!("/ratings/donation/{id}/average"),
            Anonymous,
        ),
        by_action(
            "Get ratings by social action",
            |id| format!("/ratings/social-action/{id}"),
            Anonymous,
        ),
        by_action(
            "Get average rating for social action",
            |id| format!("/ratings/social-action/{id}/average"),
            Anonymous,
        ),
        by_action(
            "Get ratings by opportunity",
            |id| format!("/ratings/opportunity/{id}"),
            Anonymous,
        ),
        by_action(
            "Get average rating for opportunity",
            |id| format!("/ratings/opportunity/{id}/average"),
            Anonymous,
        ),
        // Participation requests
        Some(check(
            "Get all participation requests",
            "/participation-requests",
            Admin,
        )),
        Some(check(
            "Get participation requests by user",
            format!("/participation-requests/user/{member}"),
            Member,
        )),
        by_action(
            "Get participation requests by social action",
            |id| format!("/participation-requests/social-action/{id}"),
            Admin,
        ),
        by_action(
            "Get pending participation requests",
            |id| format!("/participation-requests/social-action/{id}/pending"),
            Admin,
        ),
        by_action(
            "Get applications by opportunity",
            |id| format!("/opportunities/{id}/applications"),
            Admin,
        ),
        by_action(
            "Get pending applications by opportunity",
            |id| format!("/opportunities/{id}/pending-applications"),
            Admin,
        ),
        // Certificates
        Some(check("Get all certificates", "/certificates", Admin)),
        Some(check(
            "Get certificates by user",
            format!("/certificates/user/{member}"),
            Member,
        )),
        // Notifications
        Some(check("Get all notifications", "/notifications", Admin)),
        Some(check("Get unread notifications", "/notifications/unread", Member)),
        Some(check(
            "Get notifications by user",
            format!("/notifications/user/{member}"),
            Admin,
        )),
        Some(check(
            "Get unread notifications by user",
            format!("/notifications/user/{member}/unread"),
            Admin,
        )),
        // Suggestions
        Some(check("Get all suggestions", "/suggestions", Admin)),
        Some(check("Get unprocessed suggestions", "/suggestions/unprocessed", Admin)),
        Some(check(
            "Get suggestions by user",
            format!("/suggestions/user/{member}"),
            Admin,
        )),
    ];

    checks.into_iter().flatten().collect()
}

/// Issues every check in the battery, one after another.
pub async fn run_read_checks(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let Some(actors) = Actors::from_context(ctx) else {
        ctx.report
            .fail("Missing required users for GET endpoint testing");
        return;
    };

    for endpoint in build_read_checks(ctx, &actors) {
        let auth = match endpoint.actor {
            Actor::Anonymous => Auth::Anonymous,
            Actor::Member => actors.member_auth(ctx),
            Actor::Admin => actors.admin_auth(ctx),
        };
        verify_call(ctx, Method::GET, &endpoint.path, &auth, None, endpoint.name).await;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::report::Outcome, errors::Result, models::UserType, test_utils::*};
    use chrono::{Duration, Utc};
    use mockito::Matcher;

    #[tokio::test]
    async fn test_checks_without_dependencies_are_omitted() -> Result<()> {
        let server = mock_server().await;
        let mut ctx = test_context(&server)?;
        add_logged_in_user(&mut ctx, 1, UserType::User);
        add_logged_in_user(&mut ctx, 5, UserType::Foundation);
        let actors = Actors::from_context(&ctx).unwrap();

        let bare = build_read_checks(&ctx, &actors);
        ctx.foundations.insert(foundation_fixture(50, 5));
        ctx.donations.insert(donation_fixture(20, 1, 50));
        let now = Utc::now();
        ctx.social_actions
            .insert(social_action_fixture(70, 50, now, now + Duration::days(1)));
        let full = build_read_checks(&ctx, &actors);

        assert!(bare.iter().all(|c| !c.path.contains("/50") && !c.path.contains("/70")));
        assert!(bare.len() < full.len());
        assert!(full.iter().any(|c| c.path == "/ratings/donation/20/average"));
        assert!(full.iter().any(|c| c.path == "/opportunities/70/pending-applications"));
        let profile = full.iter().find(|c| c.name == "Get user profile").unwrap();
        assert_eq!(profile.path, "/users/1");
        assert_eq!(profile.actor, Actor::Member);
        Ok(())
    }

    #[tokio::test]
    async fn test_battery_sends_actor_credentials() -> Result<()> {
        let mut server = mock_server().await;
        let admin_only = server
            .mock("GET", "/api/users")
            .match_header("authorization", "Bearer token-5")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        let anonymous = server
            .mock("GET", "/api/foundations")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let mut ctx = test_context(&server)?;
        add_logged_in_user(&mut ctx, 1, UserType::User);
        add_logged_in_user(&mut ctx, 5, UserType::Foundation);

        run_read_checks(&mut ctx).await;

        assert_eq!(ctx.report.count(Outcome::Failed), 0);
        assert!(ctx.report.count(Outcome::Passed) > 20);
        admin_only.assert_async().await;
        anonymous.assert_async().await;
        Ok(())
    }
}
