//! Certificates issued to donors by the first foundation account.

use crate::{
    core::{
        context::{SeedContext, store_record},
        pools,
    },
    models::CertificateRecord,
};
use rand::seq::IndexedRandom;
use serde_json::json;

pub const PHASE: &str = "Creating certificates";

/// Issues certificates to random donors from the first foundation account.
pub async fn seed_certificates(ctx: &mut SeedContext) {
    ctx.report.begin_phase(PHASE);

    let recipients = ctx.regular_users();
    let Some(issuer) = ctx.first_foundation_user() else {
        ctx.report.skip("No foundation user to issue certificates");
        return;
    };
    if recipients.is_empty() {
        ctx.report.skip("No users to receive certificates");
        return;
    }
    let Some(auth) = ctx.ensure_token(&issuer).await else {
        return;
    };

    let attempts = ctx.plan.volumes.certificates.min(recipients.len() * 2);
    for _ in 0..attempts {
        let Some(recipient) = recipients.choose(&mut ctx.rng).cloned() else {
            break;
        };
        let description = pools::certificate_description(&mut ctx.rng);
        let payload = json!({
            "user_id": recipient.id,
            "description": description,
        });
        let Some(id) = ctx
            .create("/certificates", &auth, &payload, "Error creating certificate")
            .await
        else {
            continue;
        };

        let record = CertificateRecord {
            id,
            user_id: recipient.id,
            description: description.to_string(),
        };
        let message = format!("Certificate issued to {}", recipient.name);
        store_record(&mut ctx.certificates, &mut ctx.report, record, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::report::Outcome, errors::Result, models::UserType, test_utils::*};

    #[tokio::test]
    async fn test_certificates_issued_with_first_foundation_token() -> Result<()> {
        let mut server = mock_server().await;
        let certificates = mock_created_as(&mut server, "/api/certificates", "token-5", 1, 2).await;
        let mut ctx = test_context(&server)?;
        add_logged_in_user(&mut ctx, 1, UserType::User);
        add_logged_in_user(&mut ctx, 5, UserType::Foundation);
        add_logged_in_user(&mut ctx, 6, UserType::Foundation);

        seed_certificates(&mut ctx).await;

        // min(certificates = 2, one user * 2)
        assert_eq!(ctx.certificates.len(), 2);
        assert_eq!(ctx.report.count(Outcome::Failed), 0);
        certificates.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_no_foundation_user_skips_phase() -> Result<()> {
        let mut server = mock_server().await;
        let certificates = mock_never(&mut server, "POST", "/api/certificates").await;
        let mut ctx = test_context(&server)?;
        add_logged_in_user(&mut ctx, 1, UserType::User);

        seed_certificates(&mut ctx).await;

        assert_eq!(ctx.report.count(Outcome::Skipped), 1);
        certificates.assert_async().await;
        Ok(())
    }
}
