//! Update and delete sequences.
//!
//! Each step creates what it needs, then patches or deletes it by the id the
//! API returned. A step stops at its first failed call; the next step still
//! runs.

use crate::{
    core::{
        context::{SeedContext, store_record},
        seed::{comments::FOUNDATION_DETAIL_COMMENT_PATH, favorites::favorites_path},
        verify::{Actors, verify_call},
    },
    models::{
        CommentRecord, CommentTarget, EntityId, FavoriteKind, FavoriteRecord, FoundationRecord,
        NotificationRecord, RatingRecord,
    },
};
use rand::Rng;
use reqwest::Method;
use serde_json::json;

pub const UPDATE_PHASE: &str = "Testing update endpoints";
pub const DELETE_PHASE: &str = "Testing delete endpoints";

/// Runs the update sequence as the verification actors.
///
/// # Arguments
/// * `ctx` - Run context holding the fixtures from [`super::prepare_fixtures`]
///
/// Updates the member's name and the first foundation's website, creates and
/// edits a comment and a rating, edits a foundation comment, marks a fresh
/// notification read, and finally marks all notifications read.
pub async fn run_updates(ctx: &mut SeedContext) {
    ctx.report.begin_phase(UPDATE_PHASE);

    let Some(actors) = Actors::from_context(ctx) else {
        ctx.report.fail("Missing required users for update testing");
        return;
    };
    let foundation = ctx.foundations.first().cloned();

    update_user_name(ctx, &actors).await;
    if let Some(foundation) = &foundation {
        update_foundation_website(ctx, &actors, foundation).await;
        update_new_comment(ctx, &actors, foundation).await;
    }
    update_foundation_comment(ctx).await;
    update_new_rating(ctx, &actors).await;
    read_new_notification(ctx, &actors).await;

    let auth = actors.member_auth(ctx);
    verify_call(
        ctx,
        Method::POST,
        "/notifications/mark-all-read",
        &auth,
        None,
        "Mark all notifications as read",
    )
    .await;
}

/// Runs the delete sequence as the verification actors.
///
/// Creates and deletes a comment through each comment route, a notification
/// and a favorite. Records are dropped locally only when the delete passed.
pub async fn run_deletes(ctx: &mut SeedContext) {
    ctx.report.begin_phase(DELETE_PHASE);

    let Some(actors) = Actors::from_context(ctx) else {
        ctx.report.fail("Missing required users for delete testing");
        return;
    };
    let Some(foundation) = ctx.foundations.first().cloned() else {
        ctx.report.fail("Missing foundation for delete testing");
        return;
    };

    for path in ["/comments", FOUNDATION_DETAIL_COMMENT_PATH] {
        delete_new_comment(ctx, &actors, &foundation, path).await;
    }
    delete_new_notification(ctx, &actors).await;
    delete_new_favorite(ctx, &actors, &foundation).await;
}

async fn update_user_name(ctx: &mut SeedContext, actors: &Actors) {
    let auth = actors.member_auth(ctx);
    let body = json!({ "name": format!("Updated {}", actors.member.name) });
    verify_call(
        ctx,
        Method::PATCH,
        &format!("/users/{}", actors.member.id),
        &auth,
        Some(&body),
        "Update user",
    )
    .await;
}

async fn update_foundation_website(
    ctx: &mut SeedContext,
    actors: &Actors,
    foundation: &FoundationRecord,
) {
    let auth = actors.admin_auth(ctx);
    let suffix: u16 = ctx.rng.random_range(1000..=9999);
    let body = json!({ "website": format!("https://www.updated-{suffix}.org") });
    verify_call(
        ctx,
        Method::PATCH,
        &format!("/foundations/{}", foundation.id),
        &auth,
        Some(&body),
        "Update foundation",
    )
    .await;
}

/// Creates a foundation comment through `path` and stores it.
async fn create_comment(
    ctx: &mut SeedContext,
    actors: &Actors,
    foundation: &FoundationRecord,
    path: &str,
    text: &str,
) -> Option<EntityId> {
    let auth = actors.member_auth(ctx);
    let payload = json!({
        "user_id": actors.member.id,
        "foundation_id": foundation.id,
        "text": text,
    });
    let id = ctx
        .create(path, &auth, &payload, "Error creating test comment")
        .await?;
    let record = CommentRecord {
        id: id.clone(),
        user_id: actors.member.id.clone(),
        target: CommentTarget::Foundation(foundation.id.clone()),
        text: text.to_string(),
    };
    store_record(&mut ctx.comments, &mut ctx.report, record, "Test comment created").then_some(id)
}

async fn update_new_comment(ctx: &mut SeedContext, actors: &Actors, foundation: &FoundationRecord) {
    let Some(id) = create_comment(ctx, actors, foundation, "/comments", "Comment to update").await
    else {
        return;
    };
    let auth = actors.member_auth(ctx);
    let body = json!({ "text": "Updated test comment" });
    verify_call(
        ctx,
        Method::PATCH,
        &format!("/comments/{id}"),
        &auth,
        Some(&body),
        "Update comment",
    )
    .await;
}

async fn update_foundation_comment(ctx: &mut SeedContext) {
    let Some(comment) = ctx
        .comments
        .iter()
        .find(|c| matches!(c.target, CommentTarget::Foundation(_)))
        .cloned()
    else {
        ctx.report.skip("No foundation comment to update");
        return;
    };
    let auth = ctx.auth_for(&comment.user_id);
    let body = json!({ "text": "Updated foundation comment" });
    if verify_call(
        ctx,
        Method::PATCH,
        &format!("/comments/{}", comment.id),
        &auth,
        Some(&body),
        "Update foundation comment",
    )
    .await
        && let Some(stored) = ctx.comments.get_mut(&comment.id)
    {
        stored.text = "Updated foundation comment".to_string();
    }
}

async fn update_new_rating(ctx: &mut SeedContext, actors: &Actors) {
    let Some(donation) = ctx.donations.first().cloned() else {
        ctx.report.skip("No donation to rate");
        return;
    };
    let auth = actors.member_auth(ctx);
    let payload = json!({
        "user_id": actors.member.id,
        "donation_id": donation.id,
        "rating": 4,
    });
    let Some(id) = ctx
        .create("/ratings", &auth, &payload, "Error creating test rating")
        .await
    else {
        return;
    };
    let record = RatingRecord {
        id: id.clone(),
        user_id: actors.member.id.clone(),
        donation_id: donation.id,
        rating: 4,
    };
    if !store_record(&mut ctx.ratings, &mut ctx.report, record, "Test rating created") {
        return;
    }

    let body = json!({ "rating": 5 });
    if verify_call(
        ctx,
        Method::PATCH,
        &format!("/ratings/{id}"),
        &auth,
        Some(&body),
        "Update rating",
    )
    .await
        && let Some(stored) = ctx.ratings.get_mut(&id)
    {
        stored.rating = 5;
    }
}

/// Sends a notification from the admin to the member and stores it.
async fn create_notification(
    ctx: &mut SeedContext,
    actors: &Actors,
    message: &str,
) -> Option<EntityId> {
    let auth = actors.admin_auth(ctx);
    let payload = json!({
        "user_id": actors.member.id,
        "message": message,
        "read": false,
    });
    let id = ctx
        .create("/notifications", &auth, &payload, "Error creating test notification")
        .await?;
    let record = NotificationRecord {
        id: id.clone(),
        user_id: actors.member.id.clone(),
        message: message.to_string(),
        read: false,
    };
    store_record(
        &mut ctx.notifications,
        &mut ctx.report,
        record,
        "Test notification created",
    )
    .then_some(id)
}

async fn read_new_notification(ctx: &mut SeedContext, actors: &Actors) {
    let Some(id) = create_notification(ctx, actors, "Notification to mark as read").await else {
        return;
    };
    let auth = actors.member_auth(ctx);
    if verify_call(
        ctx,
        Method::PATCH,
        &format!("/notifications/{id}/read"),
        &auth,
        None,
        "Mark notification as read",
    )
    .await
        && let Some(stored) = ctx.notifications.get_mut(&id)
    {
        stored.read = true;
    }
}

async fn delete_new_comment(
    ctx: &mut SeedContext,
    actors: &Actors,
    foundation: &FoundationRecord,
    path: &str,
) {
    let Some(id) = create_comment(ctx, actors, foundation, path, "Comment to delete").await else {
        return;
    };
    let auth = actors.member_auth(ctx);
    let label = if path == FOUNDATION_DETAIL_COMMENT_PATH {
        "Delete foundation comment"
    } else {
        "Delete comment"
    };
    if verify_call(ctx, Method::DELETE, &format!("/comments/{id}"), &auth, None, label).await {
        ctx.comments.remove(&id);
    }
}

async fn delete_new_notification(ctx: &mut SeedContext, actors: &Actors) {
    let Some(id) = create_notification(ctx, actors, "Notification to delete").await else {
        return;
    };
    let auth = actors.member_auth(ctx);
    if verify_call(
        ctx,
        Method::DELETE,
        &format!("/notifications/{id}"),
        &auth,
        None,
        "Delete notification",
    )
    .await
    {
        ctx.notifications.remove(&id);
    }
}

async fn delete_new_favorite(ctx: &mut SeedContext, actors: &Actors, foundation: &FoundationRecord) {
    let auth = actors.member_auth(ctx);
    let payload = json!({
        "item_id": foundation.id,
        "item_type": FavoriteKind::Foundation,
    });
    let path = favorites_path(&actors.member.id);
    let Some(id) = ctx
        .create(&path, &auth, &payload, "Error creating test favorite")
        .await
    else {
        return;
    };
    let record = FavoriteRecord {
        id: id.clone(),
        user_id: actors.member.id.clone(),
        item_id: foundation.id.clone(),
        item_type: FavoriteKind::Foundation,
    };
    if !store_record(&mut ctx.favorites, &mut ctx.report, record, "Test favorite created") {
        return;
    }

    let removed = verify_call(
        ctx,
        Method::DELETE,
        &format!("{path}/{}", foundation.id),
        &auth,
        None,
        "Delete favorite",
    )
    .await;
    if removed {
        ctx.favorites.remove(&id);
    }
}
