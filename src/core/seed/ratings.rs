//! Ratings left by donors on their own donations.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::RatingRecord,
};
use serde_json::json;

pub const PHASE: &str = "Creating ratings";

/// Rates the first `max_ratings` donations as their donors.
pub async fn seed_ratings(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let limit = ctx.plan.volumes.max_ratings;
    let donations: Vec<_> = ctx.donations.iter().take(limit).cloned().collect();
    if donations.is_empty() {
        ctx.report.skip("No donations to rate");
        return;
    }

    for donation in donations {
        let Some(donor) = ctx.find_user(&donation.user_id) else {
            continue;
        };
        let Some(auth) = ctx.ensure_token(&donor).await else {
            continue;
        };

        let rating = pools::rating_value(&mut ctx.rng);
        let payload = json!({
            "user_id": donor.id,
            "donation_id": donation.id,
            "rating": rating,
        });
        let Some(id) = ctx
            .create("/ratings", &auth, &payload, "Error creating rating")
            .await
        else {
            continue;
        };

        let record = RatingRecord {
            id,
            user_id: donor.id,
            donation_id: donation.id,
            rating,
        };
        let message = format!("Rating created: {rating} stars");
        store_record(&mut ctx.ratings, &mut ctx.report, record, message);
    }
}
