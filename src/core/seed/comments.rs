//! Comments on donations, social actions and foundations.
//!
//! Donors comment on their own donations and owners on their own actions.
//! Foundations are commented on by random donors, half of the time through
//! the foundation-detail route.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::{CommentRecord, CommentTarget, UserRecord},
};
use rand::{Rng, seq::IndexedRandom};
use serde_json::{Value, json};

pub const PHASE: &str = "Creating comments";

/// Route for comments posted from a foundation's detail page.
pub const FOUNDATION_DETAIL_COMMENT_PATH: &str = "/foundation-detail/comment";

/// Comments on donations (by the donor), on social actions (by the owner)
/// and on foundations (by a random donor).
pub async fn seed_comments(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);
    let per_entity = ctx.plan.volumes.comments_per_entity;

    comment_on_donations(ctx, per_entity * 3).await;
    comment_on_social_actions(ctx, per_entity * 2).await;
    comment_on_foundations(ctx, per_entity * 2).await;
}

async fn comment_on_donations(ctx: &mut SeedContext, limit: usize) {
    let donations: Vec<_> = ctx.donations.iter().take(limit).cloned().collect();
    for donation in donations {
        let Some(donor) = ctx.find_user(&donation.user_id) else {
            continue;
        };
        let text = pools::donation_comment(&mut ctx.rng);
        let payload = json!({
            "user_id": donor.id,
            "donation_id": donation.id,
            "text": text,
        });
        post_comment(
            ctx,
            &donor,
            "/comments",
            &payload,
            CommentTarget::Donation(donation.id),
            "Comment on donation created",
        )
        .await;
    }
}

async fn comment_on_social_actions(ctx: &mut SeedContext, limit: usize) {
    let actions: Vec<_> = ctx.social_actions.iter().take(limit).cloned().collect();
    for action in actions {
        let Some(owner) = ctx.owner_of_foundation(&action.foundation_id) else {
            continue;
        };
        let text = pools::social_action_comment(&mut ctx.rng);
        let payload = json!({
            "user_id": owner.id,
            "social_action_id": action.id,
            "text": text,
        });
        post_comment(
            ctx,
            &owner,
            "/comments",
            &payload,
            CommentTarget::SocialAction(action.id),
            "Comment on social action created",
        )
        .await;
    }
}

async fn comment_on_foundations(ctx: &mut SeedContext, limit: usize) {
    let donors = ctx.regular_users();
    if donors.is_empty() {
        ctx.report.skip("No users to comment on foundations");
        return;
    }

    let foundations: Vec<_> = ctx.foundations.iter().take(limit).cloned().collect();
    for foundation in foundations {
        let Some(author) = donors.choose(&mut ctx.rng).cloned() else {
            continue;
        };
        let text = pools::foundation_comment(&mut ctx.rng);
        let path = if ctx.rng.random_bool(0.5) {
            "/comments"
        } else {
            FOUNDATION_DETAIL_COMMENT_PATH
        };
        let payload = json!({
            "user_id": author.id,
            "foundation_id": foundation.id,
            "text": text,
        });
        post_comment(
            ctx,
            &author,
            path,
            &payload,
            CommentTarget::Foundation(foundation.id),
            "Comment on foundation created",
        )
        .await;
    }
}

async fn post_comment(
    ctx: &mut SeedContext,
    author: &UserRecord,
    path: &str,
    payload: &Value,
    target: CommentTarget,
    success: &str,
) {
    let Some(auth) = ctx.ensure_token(author).await else {
        return;
    };
    let Some(id) = ctx
        .create(path, &auth, payload, "Error creating comment")
        .await
    else {
        return;
    };

    let text = payload
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let record = CommentRecord {
        id,
        user_id: author.id.clone(),
        target,
        text,
    };
    store_record(&mut ctx.comments, &mut ctx.report, record, success);
}
