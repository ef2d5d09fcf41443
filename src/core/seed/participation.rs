//! Participation requests from donors to open social actions.
//!
//! Requests go either to the participation-request resource or through the
//! opportunity "apply" route. Most are then reviewed by the owner of the
//! action's foundation, provided that account already holds a token.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::{Collection, EntityId, ParticipationRecord, RequestStatus, SocialActionRecord},
};
use chrono::{DateTime, Utc};
use rand::{Rng, seq::IndexedRandom};
use reqwest::Method;
use serde_json::json;

pub const PHASE: &str = "Creating participation requests";

/// Share of new requests the owner reviews.
const REVIEW_PROBABILITY: f64 = 0.7;

/// Social actions still accepting volunteers at `now`.
#[must_use]
pub fn open_social_actions(
    actions: &Collection<SocialActionRecord>,
    now: DateTime<Utc>,
) -> Vec<SocialActionRecord> {
    actions
        .iter()
        .filter(|action| action.is_open_at(now))
        .cloned()
        .collect()
}

/// Random donors apply to open social actions; some requests are reviewed
/// straight away by the action's owner.
///
/// # Arguments
/// * `ctx` - Run context; volume is capped at donors times open actions
pub async fn seed_participation_requests(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let volunteers = ctx.regular_users();
    if volunteers.is_empty() || ctx.social_actions.is_empty() {
        ctx.report
            .skip("Participation requests need both users and social actions");
        return;
    }

    let open = open_social_actions(&ctx.social_actions, Utc::now());
    if open.is_empty() {
        ctx.report.skip("No open social actions to apply to");
        return;
    }

    let attempts = ctx
        .plan
        .volumes
        .participation_requests
        .min(volunteers.len() * open.len());
    for _ in 0..attempts {
        let (Some(volunteer), Some(action)) = (
            volunteers.choose(&mut ctx.rng).cloned(),
            open.choose(&mut ctx.rng).cloned(),
        ) else {
            break;
        };
        let Some(auth) = ctx.ensure_token(&volunteer).await else {
            continue;
        };

        let (path, payload, route) = if ctx.rng.random_bool(0.5) {
            (
                "/participation-requests".to_string(),
                json!({
                    "user_id": volunteer.id,
                    "social_action_id": action.id,
                }),
                "direct",
            )
        } else {
            (
                format!("/opportunities/{}/apply", action.id),
                json!({ "message": pools::APPLICATION_MESSAGE }),
                "opportunity",
            )
        };
        let Some(id) = ctx
            .create(&path, &auth, &payload, "Error creating participation request")
            .await
        else {
            continue;
        };

        let record = ParticipationRecord {
            id: id.clone(),
            user_id: volunteer.id,
            social_action_id: action.id.clone(),
            status: RequestStatus::Pending,
        };
        let message = format!("Participation request created ({route})");
        if !store_record(&mut ctx.participation_requests, &mut ctx.report, record, message) {
            continue;
        }

        if ctx.rng.random_bool(REVIEW_PROBABILITY) {
            let status = if ctx.rng.random_bool(0.5) {
                RequestStatus::Accepted
            } else {
                RequestStatus::Rejected
            };
            review_request(ctx, &action, &id, status).await;
        }
    }
}

/// Sets a request's status as the owner of the action's foundation.
///
/// Only owners with a cached token review; nothing is sent otherwise.
/// Returns whether the status changed.
pub async fn review_request(
    ctx: &mut SeedContext,
    action: &SocialActionRecord,
    request_id: &EntityId,
    status: RequestStatus,
) -> bool {
    let Some(owner) = ctx.owner_of_foundation(&action.foundation_id) else {
        return false;
    };
    if !ctx.session.has_token(&owner.id) {
        return false;
    }

    let auth = ctx.auth_for(&owner.id);
    let path = format!("/participation-requests/{request_id}");
    let body = json!({ "status": status.as_str() });
    let updated = ctx
        .call(
            Method::PATCH,
            &path,
            &auth,
            Some(&body),
            &format!("Request {}", status.as_str()),
            "Error updating participation request",
        )
        .await;

    if updated && let Some(request) = ctx.participation_requests.get_mut(request_id) {
        request.status = status;
    }
    updated
}
