//! Verification pass - a small fixture set, then read, update and delete
//! calls across the API.
//!
//! Unlike seeding, a call only counts as verified on 200, 201 or 204; other
//! 2xx codes are reported as failures so unexpected behaviour stands out.

pub mod reads;
pub mod setup;
pub mod writes;

pub use reads::{Actor, EndpointCheck, build_read_checks, run_read_checks};
pub use setup::prepare_fixtures;
pub use writes::{run_deletes, run_updates};

use crate::{api::Auth, core::context::SeedContext, models::UserRecord};
use reqwest::{Method, StatusCode};
use serde_json::Value;

/// Whether a status counts as a passing endpoint check.
#[must_use]
pub fn is_verified(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT
    )
}

/// The two accounts verification acts as.
#[derive(Debug, Clone)]
pub struct Actors {
    /// First donor account
    pub member: UserRecord,
    /// First foundation account
    pub admin: UserRecord,
}

impl Actors {
    /// Picks the actors from what the context holds, if both exist.
    #[must_use]
    pub fn from_context(ctx: &SeedContext) -> Option<Self> {
        Some(Self {
            member: ctx.regular_users().into_iter().next()?,
            admin: ctx.first_foundation_user()?,
        })
    }

    /// Credentials for acting as the donor.
    #[must_use]
    pub fn member_auth(&self, ctx: &SeedContext) -> Auth {
        ctx.auth_for(&self.member.id)
    }

    /// Credentials for acting as the foundation account.
    #[must_use]
    pub fn admin_auth(&self, ctx: &SeedContext) -> Auth {
        ctx.auth_for(&self.admin.id)
    }
}

/// Sends one request and records `label: status`, verified or not.
pub(crate) async fn verify_call(
    ctx: &mut SeedContext,
    method: Method,
    path: &str,
    auth: &Auth,
    body: Option<&Value>,
    label: &str,
) -> bool {
    match ctx.client.send(method, path, auth, body).await {
        Ok(response) if is_verified(response.status) => {
            ctx.report
                .pass(format!("{label}: {}", response.status.as_u16()));
            true
        }
        Ok(response) => {
            ctx.report.fail(format!(
                "{label}: {} - {}",
                response.status.as_u16(),
                response.body
            ));
            false
        }
        Err(e) => {
            ctx.report.fail(format!("Error with {label}: {e}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::report::Outcome,
        errors::Result,
        models::{EntityId, UserType},
        test_utils::*,
    };

    #[test]
    fn test_is_verified() {
        assert!(is_verified(StatusCode::OK));
        assert!(is_verified(StatusCode::CREATED));
        assert!(is_verified(StatusCode::NO_CONTENT));
        assert!(!is_verified(StatusCode::ACCEPTED));
        assert!(!is_verified(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_actors_need_member_and_foundation() -> Result<()> {
        let server = mock_server().await;
        let mut ctx = test_context(&server)?;
        add_logged_in_user(&mut ctx, 5, UserType::Foundation);
        assert!(Actors::from_context(&ctx).is_none());

        add_logged_in_user(&mut ctx, 1, UserType::User);
        let actors = Actors::from_context(&ctx).unwrap();
        assert_eq!(actors.member.id, EntityId::Int(1));
        assert_eq!(actors.admin.id, EntityId::Int(5));
        assert_eq!(actors.member_auth(&ctx), Auth::Bearer("token-1".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_verify_call_reports_body_on_failure() -> Result<()> {
        let mut server = mock_server().await;
        server
            .mock("GET", "/api/users")
            .with_status(403)
            .with_body("Forbidden resource")
            .create_async()
            .await;
        let mut ctx = test_context(&server)?;

        let ok = verify_call(
            &mut ctx,
            Method::GET,
            "/users",
            &Auth::Anonymous,
            None,
            "Get all users",
        )
        .await;

        assert!(!ok);
        assert_eq!(ctx.report.count(Outcome::Failed), 1);
        assert_eq!(
            ctx.report.entries()[0].message,
            "Get all users: 403 - Forbidden resource"
        );
        Ok(())
    }
}
