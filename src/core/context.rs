//! Seeding context - the state threaded through every phase.
//!
//! Holds the API client, the token cache, the records created so far and the
//! run report. Phases take `&mut SeedContext`; nothing is global.

use crate::{
    api::{ApiClient, ApiResponse, Auth, Session},
    config::{SeedPlan, Settings},
    core::report::RunReport,
    errors::Result,
    models::{
        CertificateRecord, Collection, CommentRecord, DonationRecord, EntityId, FavoriteRecord,
        FoundationRecord, Identified, NotificationRecord, ParticipationRecord, RatingRecord,
        SocialActionRecord, SuggestionRecord, UserRecord, UserType,
    },
};
use rand::{SeedableRng, rngs::StdRng};
use reqwest::Method;
use serde_json::Value;

/// State shared by all seeding and verification steps of one run.
pub struct SeedContext {
    pub client: ApiClient,
    pub session: Session,
    pub plan: SeedPlan,
    /// Password given to every registered account
    pub password: String,
    pub rng: StdRng,
    pub report: RunReport,

    pub users: Collection<UserRecord>,
    pub foundations: Collection<FoundationRecord>,
    pub donations: Collection<DonationRecord>,
    pub social_actions: Collection<SocialActionRecord>,
    pub comments: Collection<CommentRecord>,
    pub ratings: Collection<RatingRecord>,
    pub participation_requests: Collection<ParticipationRecord>,
    pub certificates: Collection<CertificateRecord>,
    pub notifications: Collection<NotificationRecord>,
    pub suggestions: Collection<SuggestionRecord>,
    pub favorites: Collection<FavoriteRecord>,
}

impl SeedContext {
    /// Creates a context with an OS-seeded RNG.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_rng(settings, StdRng::from_os_rng(), RunReport::new())
    }

    /// Creates a context with a caller-provided RNG and report.
    pub fn with_rng(settings: &Settings, rng: StdRng, report: RunReport) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(&settings.api)?,
            session: Session::new(),
            plan: settings.plan.clone(),
            password: settings.api.password.clone(),
            rng,
            report,
            users: Collection::new(),
            foundations: Collection::new(),
            donations: Collection::new(),
            social_actions: Collection::new(),
            comments: Collection::new(),
            ratings: Collection::new(),
            participation_requests: Collection::new(),
            certificates: Collection::new(),
            notifications: Collection::new(),
            suggestions: Collection::new(),
            favorites: Collection::new(),
        })
    }

    /// Accounts of the given kind, in registration order.
    #[must_use]
    pub fn users_of_type(&self, user_type: UserType) -> Vec<UserRecord> {
        self.users
            .iter()
            .filter(|user| user.user_type == user_type)
            .cloned()
            .collect()
    }

    /// Donor accounts.
    #[must_use]
    pub fn regular_users(&self) -> Vec<UserRecord> {
        self.users_of_type(UserType::User)
    }

    /// First registered foundation account (the admin in a populate run).
    #[must_use]
    pub fn first_foundation_user(&self) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|user| user.user_type == UserType::Foundation)
            .cloned()
    }

    #[must_use]
    pub fn find_user(&self, id: &EntityId) -> Option<UserRecord> {
        self.users.get(id).cloned()
    }

    /// Account that owns a foundation profile.
    #[must_use]
    pub fn owner_of_foundation(&self, foundation_id: &EntityId) -> Option<UserRecord> {
        self.foundations
            .get(foundation_id)
            .and_then(|foundation| self.find_user(&foundation.user_id))
    }

    /// Credentials for a request on behalf of `user_id` (own, admin, or anonymous).
    #[must_use]
    pub fn auth_for(&self, user_id: &EntityId) -> Auth {
        self.session.headers_for(Some(user_id))
    }

    /// Logs in, recording the outcome. Returns the token on success.
    pub async fn login(&mut self, email: &str, password: &str) -> Option<String> {
        match self.client.login(email, password).await {
            Ok(token) => {
                self.report.pass(format!("Login successful for: {email}"));
                Some(token)
            }
            Err(e) => {
                self.report.record_error(&format!("Login error for {email}"), &e);
                None
            }
        }
    }

    /// Returns the account's own credentials, logging in first if needed.
    ///
    /// `None` means the account could not authenticate and the caller should
    /// skip the unit of work. The admin fallback is never used here.
    pub async fn ensure_token(&mut self, user: &UserRecord) -> Option<Auth> {
        if let Some(token) = self.session.token_for(&user.id) {
            return Some(Auth::Bearer(token.to_string()));
        }

        match self.login(&user.email, &user.password).await {
            Some(token) => {
                self.session.store(user.id.clone(), token.clone());
                Some(Auth::Bearer(token))
            }
            None => {
                self.report
                    .skip(format!("Could not obtain token for {}", user.name));
                None
            }
        }
    }

    /// Creates an entity, recording failures. Returns the new id on success.
    pub async fn create(
        &mut self,
        path: &str,
        auth: &Auth,
        payload: &Value,
        failure_context: &str,
    ) -> Option<EntityId> {
        match self.client.create(path, auth, payload).await {
            Ok(id) => Some(id),
            Err(e) => {
                self.report.record_error(failure_context, &e);
                None
            }
        }
    }

    /// Issues a request whose only interesting result is its status, recording
    /// the outcome. Returns `true` on 2xx.
    pub async fn call(
        &mut self,
        method: Method,
        path: &str,
        auth: &Auth,
        body: Option<&Value>,
        success: &str,
        failure_context: &str,
    ) -> bool {
        let result = self
            .client
            .send(method, path, auth, body)
            .await
            .and_then(ApiResponse::error_for_status);
        match result {
            Ok(_) => {
                self.report.pass(success);
                true
            }
            Err(e) => {
                self.report.record_error(failure_context, &e);
                false
            }
        }
    }

    /// Sleeps for the configured pause between phases.
    pub async fn pause(&self) {
        let pause = self.plan.phase_pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    /// Record counts per collection, in phase order.
    #[must_use]
    pub fn collection_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Users", self.users.len()),
            ("Foundations", self.foundations.len()),
            ("Donations", self.donations.len()),
            ("Social actions", self.social_actions.len()),
            ("Comments", self.comments.len()),
            ("Ratings", self.ratings.len()),
            ("Participation requests", self.participation_requests.len()),
            ("Certificates", self.certificates.len()),
            ("Notifications", self.notifications.len()),
            ("Suggestions", self.suggestions.len()),
            ("Favorites", self.favorites.len()),
        ]
    }
}

/// Adds a freshly created record to its collection.
///
/// Reports `success` when stored, or a failure when the API handed back an id
/// the collection already holds. Returns whether the record was stored.
pub fn store_record<T: Identified>(
    collection: &mut Collection<T>,
    report: &mut RunReport,
    record: T,
    success: impl Into<String>,
) -> bool {
    let id = record.id().clone();
    if collection.insert(record) {
        report.pass(success);
        true
    } else {
        report.fail(format!("Duplicate id {id} returned by the API; record ignored"));
        false
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::report::Outcome, test_utils::*};

    #[tokio::test]
    async fn test_ensure_token_reuses_cached_token() -> Result<()> {
        let mut server = mock_server().await;
        let user = user_fixture(1, UserType::User);
        let login = mock_login(&mut server, &user.email, 200, r#"{"access_token": "x"}"#, 0).await;
        let mut ctx = test_context(&server)?;
        ctx.session.store(user.id.clone(), "cached".to_string());

        let auth = ctx.ensure_token(&user).await;

        assert_eq!(auth, Some(Auth::Bearer("cached".to_string())));
        login.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_token_logs_in_lazily() -> Result<()> {
        let mut server = mock_server().await;
        let user = user_fixture(1, UserType::User);
        let login = mock_login(&mut server, &user.email, 201, r#"{"access_token": "fresh"}"#, 1).await;
        let mut ctx = test_context(&server)?;

        let auth = ctx.ensure_token(&user).await;

        assert_eq!(auth, Some(Auth::Bearer("fresh".to_string())));
        assert_eq!(ctx.session.token_for(&user.id), Some("fresh"));
        login.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_token_failure_skips_without_admin_fallback() -> Result<()> {
        let mut server = mock_server().await;
        let user = user_fixture(1, UserType::User);
        mock_login(&mut server, &user.email, 401, r#"{"message": "Unauthorized"}"#, 1).await;
        let mut ctx = test_context(&server)?;
        ctx.session.set_admin_token("admin".to_string());

        let auth = ctx.ensure_token(&user).await;

        assert!(auth.is_none());
        assert!(!ctx.session.has_token(&user.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_owner_of_foundation() -> Result<()> {
        let server = mock_server().await;
        let mut ctx = test_context(&server)?;
        let owner = user_fixture(5, UserType::Foundation);
        ctx.users.insert(owner.clone());
        ctx.foundations.insert(foundation_fixture(50, 5));

        assert_eq!(ctx.owner_of_foundation(&EntityId::Int(50)), Some(owner));
        assert!(ctx.owner_of_foundation(&EntityId::Int(51)).is_none());
        Ok(())
    }

    #[test]
    fn test_store_record_rejects_repeated_id() {
        let mut users = Collection::new();
        let mut report = RunReport::silent();

        assert!(store_record(&mut users, &mut report, user_fixture(1, UserType::User), "first"));
        assert!(!store_record(&mut users, &mut report, user_fixture(1, UserType::User), "again"));

        assert_eq!(users.len(), 1);
        assert_eq!(report.count(Outcome::Passed), 1);
        assert_eq!(report.count(Outcome::Failed), 1);
    }
}
