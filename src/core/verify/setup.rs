//! Fixture set for the verification pass.
//!
//! A fresh admin (its email carries a random suffix so reruns do not
//! collide), one donor, a foundation, and one of each resource the read
//! battery and the update/delete sequences point at.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
        seed::{
            comments::FOUNDATION_DETAIL_COMMENT_PATH,
            participation::review_request,
            social_actions::format_date,
            users::{NewUser, RegistrationRoute, register_and_login},
        },
        verify::Actors,
    },
    models::{
        CommentRecord, CommentTarget, DonationRecord, FoundationRecord, ParticipationRecord,
        RequestStatus, SocialActionRecord, UserType,
    },
};
use chrono::{Duration, Utc};
use rand::Rng;
use serde_json::json;

pub const PHASE: &str = "Creating test data";

/// Creates the accounts and resources verification relies on.
///
/// Missing pieces are reported and left out; later checks that depend on
/// them are omitted rather than failed.
pub async fn prepare_fixtures(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    create_admin(ctx).await;
    let person = pools::person();
    let member = NewUser {
        name: person.full_name(),
        email: person.email,
        password: ctx.password.clone(),
        user_type: UserType::User,
    };
    register_and_login(ctx, RegistrationRoute::Users, member).await;

    create_foundation(ctx).await;
    create_test_resources(ctx).await;
}

async fn create_admin(ctx: &mut SeedContext) {
    let suffix: u16 = ctx.rng.random_range(1000..=9999);
    let new_user = NewUser {
        name: "Admin Test".to_string(),
        email: format!("admin.test{suffix}@example.com"),
        password: ctx.password.clone(),
        user_type: UserType::Foundation,
    };
    let Some(admin) = register_and_login(ctx, RegistrationRoute::Users, new_user).await else {
        return;
    };

    if let Some(token) = ctx.session.token_for(&admin.id).map(str::to_string) {
        ctx.session.set_admin_token(token);
        ctx.report.pass("Admin authenticated");
    } else {
        ctx.report.fail("Admin authentication error");
    }
}

async fn create_foundation(ctx: &mut SeedContext) {
    let Some(admin) = ctx.first_foundation_user() else {
        ctx.report.skip("No admin to own the test foundation");
        return;
    };
    let Some(auth) = ctx.ensure_token(&admin).await else {
        return;
    };

    let legal_name = format!("Test Foundation {}", pools::company_name());
    let suffix: u16 = ctx.rng.random_range(1000..=9999);
    let payload = json!({
        "user_id": admin.id,
        "legal_name": legal_name,
        "address": pools::postal_address(),
        "phone": pools::phone_number(),
        "website": format!("https://www.testfoundation-{suffix}.org"),
    });
    let Some(id) = ctx
        .create("/foundations", &auth, &payload, "Error creating foundation")
        .await
    else {
        return;
    };

    let message = format!("Foundation created: {legal_name}");
    let record = FoundationRecord {
        id,
        user_id: admin.id,
        legal_name,
    };
    store_record(&mut ctx.foundations, &mut ctx.report, record, message);
}

async fn create_test_resources(ctx: &mut SeedContext) {
    let (Some(actors), Some(foundation)) =
        (Actors::from_context(ctx), ctx.foundations.first().cloned())
    else {
        ctx.report
            .fail("Missing required users or foundations for resource creation");
        return;
    };
    let member_auth = actors.member_auth(ctx);
    let admin_auth = actors.admin_auth(ctx);

    let amount = pools::donation_amount(&mut ctx.rng);
    let payload = json!({
        "user_id": actors.member.id,
        "foundation_id": foundation.id,
        "amount": amount,
    });
    if let Some(id) = ctx
        .create("/donations", &member_auth, &payload, "Error creating donation")
        .await
    {
        let record = DonationRecord {
            id,
            user_id: actors.member.id.clone(),
            foundation_id: foundation.id.clone(),
            amount,
        };
        let message = format!("Donation created: ${amount:.2}");
        store_record(&mut ctx.donations, &mut ctx.report, record, message);
    }

    let now = Utc::now();
    let start_date = now + Duration::days(ctx.rng.random_range(5..=30));
    let end_date = start_date + Duration::days(ctx.rng.random_range(1..=14));
    let description = format!("Test social action {}", ctx.rng.random_range(1000..=9999));
    let payload = json!({
        "foundation_id": foundation.id,
        "description": description,
        "start_date": format_date(start_date),
        "end_date": format_date(end_date),
    });
    if let Some(id) = ctx
        .create("/social-actions", &admin_auth, &payload, "Error creating social action")
        .await
    {
        let record = SocialActionRecord {
            id,
            foundation_id: foundation.id.clone(),
            description,
            start_date,
            end_date,
        };
        let message = format!("Social action created: {}", record.description);
        store_record(&mut ctx.social_actions, &mut ctx.report, record, message);
    }

    if let Some(action) = ctx.social_actions.first().cloned() {
        let payload = json!({
            "user_id": actors.member.id,
            "social_action_id": action.id,
        });
        if let Some(id) = ctx
            .create(
                "/participation-requests",
                &member_auth,
                &payload,
                "Error creating participation request",
            )
            .await
        {
            let record = ParticipationRecord {
                id: id.clone(),
                user_id: actors.member.id.clone(),
                social_action_id: action.id.clone(),
                status: RequestStatus::Pending,
            };
            if store_record(
                &mut ctx.participation_requests,
                &mut ctx.report,
                record,
                "Participation request created",
            ) {
                review_request(ctx, &action, &id, RequestStatus::Accepted).await;
            }
        }
    }

    for (path, text) in [
        (
            FOUNDATION_DETAIL_COMMENT_PATH,
            "Test comment for foundation using the detail endpoint",
        ),
        (
            "/comments",
            "Test comment for foundation using the general endpoint",
        ),
    ] {
        let payload = json!({
            "user_id": actors.member.id,
            "foundation_id": foundation.id,
            "text": text,
        });
        let Some(id) = ctx
            .create(path, &member_auth, &payload, "Error creating foundation comment")
            .await
        else {
            continue;
        };
        let record = CommentRecord {
            id,
            user_id: actors.member.id.clone(),
            target: CommentTarget::Foundation(foundation.id.clone()),
            text: text.to_string(),
        };
        let message = format!("Foundation comment created via {path}");
        store_record(&mut ctx.comments, &mut ctx.report, record, message);
    }
}
