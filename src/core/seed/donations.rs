//! Donations from every donor account to randomly chosen foundations.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
        seed::random_count,
    },
    models::DonationRecord,
};
use serde_json::json;

pub const PHASE: &str = "Creating donations";

/// Each donor gives 1..=`donations_per_user` donations to random foundations.
///
/// Skipped entirely when there are no donors or no foundations.
pub async fn seed_donations(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let donors = ctx.regular_users();
    if donors.is_empty() || ctx.foundations.is_empty() {
        ctx.report.skip("Donations need both users and foundations");
        return;
    }

    for donor in donors {
        let count = random_count(&mut ctx.rng, ctx.plan.volumes.donations_per_user);
        for _ in 0..count {
            let Some(foundation) = ctx.foundations.choose(&mut ctx.rng).cloned() else {
                break;
            };
            let amount = pools::donation_amount(&mut ctx.rng);
            let Some(auth) = ctx.ensure_token(&donor).await else {
                break;
            };

            let payload = json!({
                "user_id": donor.id,
                "foundation_id": foundation.id,
                "amount": amount,
            });
            let Some(id) = ctx
                .create("/donations", &auth, &payload, "Error creating donation")
                .await
            else {
                continue;
            };

            let message = format!("Donation created: ${amount:.2} to {}", foundation.legal_name);
            let record = DonationRecord {
                id,
                user_id: donor.id.clone(),
                foundation_id: foundation.id,
                amount,
            };
            store_record(&mut ctx.donations, &mut ctx.report, record, message);
        }
    }
}
