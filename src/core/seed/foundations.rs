//! One foundation profile per foundation account, created by its owner.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::{FoundationRecord, UserType},
};
use serde_json::json;

pub const PHASE: &str = "Creating foundations";

/// Creates one foundation profile per foundation-type account, the admin
/// included, acting as the owning account.
///
/// # Arguments
/// * `ctx` - Run context; accounts that cannot log in are skipped
pub async fn seed_foundations(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let owners = ctx.users_of_type(UserType::Foundation);
    if owners.is_empty() {
        ctx.report.skip("No foundation users to create foundations for");
        return;
    }

    for owner in owners {
        let Some(auth) = ctx.ensure_token(&owner).await else {
            continue;
        };

        let payload = json!({
            "user_id": owner.id,
            "legal_name": owner.name,
            "address": pools::postal_address(),
            "phone": pools::phone_number(),
            "website": pools::website_for(&owner.name),
        });
        let Some(id) = ctx
            .create("/foundations", &auth, &payload, "Error creating foundation")
            .await
        else {
            continue;
        };

        let record = FoundationRecord {
            id,
            user_id: owner.id,
            legal_name: owner.name,
        };
        let message = format!("Foundation created: {}", record.legal_name);
        store_record(&mut ctx.foundations, &mut ctx.report, record, message);
    }
}
