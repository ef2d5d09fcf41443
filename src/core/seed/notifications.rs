//! Notifications sent to every kind of account by the first foundation
//! account. Some are created already read.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::NotificationRecord,
};
use rand::{Rng, seq::IndexedRandom};
use serde_json::json;

pub const PHASE: &str = "Creating notifications";

/// Share of notifications created with `read = true`.
const READ_PROBABILITY: f64 = 0.4;

/// Sends notifications from the first foundation account to random accounts.
///
/// Some are created already marked as read.
pub async fn seed_notifications(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let recipients: Vec<_> = ctx.users.iter().cloned().collect();
    let Some(sender) = ctx.first_foundation_user() else {
        ctx.report.skip("No foundation user to send notifications");
        return;
    };
    let Some(auth) = ctx.ensure_token(&sender).await else {
        return;
    };

    let attempts = ctx.plan.volumes.notifications.min(recipients.len() * 3);
    for _ in 0..attempts {
        let Some(recipient) = recipients.choose(&mut ctx.rng).cloned() else {
            break;
        };
        let message = pools::notification_message(&mut ctx.rng);
        let read = ctx.rng.random_bool(READ_PROBABILITY);
        let payload = json!({
            "user_id": recipient.id,
            "message": message,
            "read": read,
        });
        let Some(id) = ctx
            .create("/notifications", &auth, &payload, "Error creating notification")
            .await
        else {
            continue;
        };

        let record = NotificationRecord {
            id,
            user_id: recipient.id,
            message: message.to_string(),
            read,
        };
        let status = if read { "read" } else { "unread" };
        let summary = format!("Notification sent to {} ({status})", recipient.name);
        store_record(&mut ctx.notifications, &mut ctx.report, record, summary);
    }
}
