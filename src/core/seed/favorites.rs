//! Favorites: donors bookmark foundations and opportunities.
//!
//! Picking the same item twice is expected; the API answers 409 and the
//! attempt is reported as already existing.

use crate::{
    core::{
        context::{SeedContext, store_record},
        seed::random_count,
    },
    models::{EntityId, FavoriteKind, FavoriteRecord},
};
use rand::Rng;
use serde_json::json;

pub const PHASE: &str = "Creating favorites";

/// Path of an account's favorites list.
#[must_use]
pub fn favorites_path(user_id: &EntityId) -> String {
    format!("/users/{user_id}/favorites")
}

/// Each donor bookmarks 1..=`favorites_per_user` foundations or opportunities.
pub async fn seed_favorites(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let users = ctx.regular_users();
    if users.is_empty() {
        ctx.report.skip("No users to create favorites for");
        return;
    }
    if ctx.foundations.is_empty() && ctx.social_actions.is_empty() {
        ctx.report
            .skip("No foundations or social actions to mark as favorite");
        return;
    }

    for user in users {
        let count = random_count(&mut ctx.rng, ctx.plan.volumes.favorites_per_user);
        let Some(auth) = ctx.ensure_token(&user).await else {
            continue;
        };

        for _ in 0..count {
            let (item_type, item_id) = if ctx.rng.random_bool(0.5) {
                let foundation = ctx.foundations.choose(&mut ctx.rng);
                (FavoriteKind::Foundation, foundation.map(|f| f.id.clone()))
            } else {
                let action = ctx.social_actions.choose(&mut ctx.rng);
                (FavoriteKind::Opportunity, action.map(|a| a.id.clone()))
            };
            // The chosen kind may have nothing to point at.
            let Some(item_id) = item_id else {
                continue;
            };

            let payload = json!({
                "item_id": item_id,
                "item_type": item_type,
            });
            let Some(id) = ctx
                .create(&favorites_path(&user.id), &auth, &payload, "Error adding favorite")
                .await
            else {
                continue;
            };

            let record = FavoriteRecord {
                id,
                user_id: user.id.clone(),
                item_id,
                item_type,
            };
            let message = match item_type {
                FavoriteKind::Foundation => "Foundation marked as favorite",
                FavoriteKind::Opportunity => "Opportunity marked as favorite",
            };
            store_record(&mut ctx.favorites, &mut ctx.report, record, message);
        }
    }
}
