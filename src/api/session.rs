//! Bearer-token cache keyed by account id.
//!
//! Tokens are only stored after a successful login. Lookups for an account
//! without a token fall back to the admin token, then to anonymous.

use super::client::Auth;
use crate::models::EntityId;
use std::collections::HashMap;

/// Tokens obtained during a run.
#[derive(Debug, Default, Clone)]
pub struct Session {
    tokens: HashMap<EntityId, String>,
    admin_token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches the token for an account.
    pub fn store(&mut self, user_id: EntityId, token: String) {
        self.tokens.insert(user_id, token);
    }

    /// Sets the token used when an account has none of its own.
    pub fn set_admin_token(&mut self, token: String) {
        self.admin_token = Some(token);
    }

    #[must_use]
    pub fn token_for(&self, user_id: &EntityId) -> Option<&str> {
        self.tokens.get(user_id).map(String::as_str)
    }

    #[must_use]
    pub fn has_token(&self, user_id: &EntityId) -> bool {
        self.tokens.contains_key(user_id)
    }

    #[must_use]
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Credentials for a request made on behalf of `user_id`.
    ///
    /// Uses the account's own token if it logged in, else the admin token,
    /// else no credentials.
    #[must_use]
    pub fn headers_for(&self, user_id: Option<&EntityId>) -> Auth {
        user_id
            .and_then(|id| self.token_for(id))
            .or_else(|| self.admin_token())
            .map_or(Auth::Anonymous, |token| Auth::Bearer(token.to_string()))
    }

    /// Number of accounts with a cached token.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
