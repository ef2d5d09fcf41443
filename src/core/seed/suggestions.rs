//! Suggestions submitted by donors.
//!
//! Some are marked processed by the first foundation account straight after
//! creation, which only happens when that account already holds a token.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::{EntityId, SuggestionRecord},
};
use rand::{Rng, seq::IndexedRandom};
use reqwest::Method;
use serde_json::json;

pub const PHASE: &str = "Creating suggestions";

/// Share of suggestions that get processed.
const PROCESSED_PROBABILITY: f64 = 0.3;

/// Random donors submit suggestions.
///
/// # Arguments
/// * `ctx` - Run context; volume is capped at twice the donor count
///
/// # Returns
/// Nothing; every outcome lands in `ctx.report`.
pub async fn seed_suggestions(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let authors = ctx.regular_users();
    if authors.is_empty() {
        ctx.report.skip("No users to submit suggestions");
        return;
    }

    let attempts = ctx.plan.volumes.suggestions.min(authors.len() * 2);
    for _ in 0..attempts {
        let Some(author) = authors.choose(&mut ctx.rng).cloned() else {
            break;
        };
        let Some(auth) = ctx.ensure_token(&author).await else {
            continue;
        };

        let content = pools::suggestion(&mut ctx.rng);
        let processed = ctx.rng.random_bool(PROCESSED_PROBABILITY);
        let payload = json!({
            "user_id": author.id,
            "content": content,
            "processed": processed,
        });
        let Some(id) = ctx
            .create("/suggestions", &auth, &payload, "Error creating suggestion")
            .await
        else {
            continue;
        };

        let record = SuggestionRecord {
            id: id.clone(),
            user_id: author.id,
            content: content.to_string(),
            processed,
        };
        let message = format!("Suggestion created: {content}");
        if store_record(&mut ctx.suggestions, &mut ctx.report, record, message) && processed {
            mark_processed(ctx, &id).await;
        }
    }
}

/// Marks a suggestion processed as the first foundation account.
///
/// Returns whether the call was made and succeeded.
pub async fn mark_processed(ctx: &mut SeedContext, suggestion_id: &EntityId) -> bool {
    let Some(processor) = ctx.first_foundation_user() else {
        return false;
    };
    if !ctx.session.has_token(&processor.id) {
        return false;
    }

    let auth = ctx.auth_for(&processor.id);
    ctx.call(
        Method::PATCH,
        &format!("/suggestions/{suggestion_id}/process"),
        &auth,
        None,
        "Suggestion marked as processed",
        "Error processing suggestion",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::report::Outcome, errors::Result, models::UserType, test_utils::*};
    use mockito::Matcher;

    #[tokio::test]
    async fn test_processed_suggestions_are_patched_by_foundation() -> Result<()> {
        let mut server = mock_server().await;
        mock_created(&mut server, "POST", "/api/suggestions", 1).await;
        let process = server
            .mock("PATCH", Matcher::Regex(r"^/api/suggestions/\d+/process$".to_string()))
            .match_header("authorization", "Bearer token-5")
            .with_status(200)
            .with_body("{}")
            .expect_at_least(0)
            .create_async()
            .await;
        let mut ctx = test_context(&server)?;
        ctx.plan.volumes.suggestions = 20;
        add_logged_in_user(&mut ctx, 5, UserType::Foundation);
        for id in 11..=20 {
            add_logged_in_user(&mut ctx, id, UserType::User);
        }

        seed_suggestions(&mut ctx).await;

        let processed = ctx.suggestions.iter().filter(|s| s.processed).count();
        assert_eq!(ctx.suggestions.len(), 20);
        assert_eq!(
            ctx.report.phase(PHASE).map(|phase| phase.passed),
            Some(20 + processed)
        );
        process.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_processed_needs_foundation_token() -> Result<()> {
        let mut server = mock_server().await;
        let process = mock_never(&mut server, "PATCH", "/api/suggestions/3/process").await;
        let mut ctx = test_context(&server)?;
        ctx.users.insert(user_fixture(5, UserType::Foundation));

        assert!(!mark_processed(&mut ctx, &EntityId::Int(3)).await);
        assert_eq!(ctx.report.count(Outcome::Failed), 0);
        process.assert_async().await;
        Ok(())
    }
}
