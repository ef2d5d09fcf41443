//! Social actions published by each foundation's owner.
//!
//! Dates are spread over upcoming, ongoing and finished windows so both open
//! and closed actions exist. The API exposes the same resource as
//! `/social-actions` and `/opportunities`; both creation routes are used.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools::{self, ActionWindow},
        seed::random_count,
    },
    models::SocialActionRecord,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde_json::json;

pub const PHASE: &str = "Creating social actions";

/// Wire format for action dates.
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Creates social actions for every foundation, acting as its owner.
///
/// Each action gets an upcoming, ongoing or finished date window and is sent
/// to either `/social-actions` or `/opportunities`.
///
/// # Arguments
/// * `ctx` - Run context; foundations whose owner is unknown are skipped
pub async fn seed_social_actions(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    if ctx.foundations.is_empty() {
        ctx.report.skip("No foundations to publish social actions");
        return;
    }

    let now = Utc::now();
    let foundations: Vec<_> = ctx.foundations.iter().cloned().collect();
    for foundation in foundations {
        let Some(owner) = ctx.find_user(&foundation.user_id) else {
            ctx.report
                .skip(format!("Owner of {} not found", foundation.legal_name));
            continue;
        };

        let count = random_count(&mut ctx.rng, ctx.plan.volumes.social_actions_per_foundation);
        for _ in 0..count {
            let window = ActionWindow::random(&mut ctx.rng);
            let (start_date, end_date) = window.dates(now, &mut ctx.rng);
            let description = pools::social_action_description(&mut ctx.rng);
            let path = if ctx.rng.random_bool(0.5) {
                "/social-actions"
            } else {
                "/opportunities"
            };

            let Some(auth) = ctx.ensure_token(&owner).await else {
                break;
            };

            let payload = json!({
                "foundation_id": foundation.id,
                "description": description,
                "start_date": format_date(start_date),
                "end_date": format_date(end_date),
            });
            let Some(id) = ctx
                .create(path, &auth, &payload, "Error creating social action")
                .await
            else {
                continue;
            };

            let message = format!("Social action created ({window:?}): {description}");
            let record = SocialActionRecord {
                id,
                foundation_id: foundation.id.clone(),
                description,
                start_date,
                end_date,
            };
            store_record(&mut ctx.social_actions, &mut ctx.report, record, message);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        errors::Result,
        models::{EntityId, UserType},
        test_utils::*,
    };
    use chrono::TimeZone;

    #[test]
    fn test_format_date_is_rfc3339_utc() {
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format_date(date), "2025-03-01T09:30:00.000Z");
    }

    #[tokio::test]
    async fn test_actions_belong_to_foundation_with_ordered_dates() -> Result<()> {
        let mut server = mock_server().await;
        mock_created(&mut server, "POST", "/api/social-actions", 1).await;
        mock_created(&mut server, "POST", "/api/opportunities", 1000).await;
        let mut ctx = test_context(&server)?;
        ctx.plan.volumes.social_actions_per_foundation = 1;
        add_logged_in_user(&mut ctx, 5, UserType::Foundation);
        ctx.foundations.insert(foundation_fixture(50, 5));

        for _ in 0..8 {
            seed_social_actions(&mut ctx).await;
        }

        assert_eq!(ctx.social_actions.len(), 8);
        for action in &ctx.social_actions {
            assert_eq!(action.foundation_id, EntityId::Int(50));
            assert!(action.start_date < action.end_date);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_owner_is_skipped() -> Result<()> {
        let mut server = mock_server().await;
        let social = mock_never(&mut server, "POST", "/api/social-actions").await;
        let opportunities = mock_never(&mut server, "POST", "/api/opportunities").await;
        let mut ctx = test_context(&server)?;
        ctx.foundations.insert(foundation_fixture(50, 99));

        seed_social_actions(&mut ctx).await;

        assert!(ctx.social_actions.is_empty());
        social.assert_async().await;
        opportunities.assert_async().await;
        Ok(())
    }
}
