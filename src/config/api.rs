//! API endpoint configuration loaded from environment variables.
//!
//! This module resolves where the platform API lives and which password the
//! synthetic accounts use. Values normally come from the process environment
//! (after `.env` has been loaded), with defaults pointing at a local
//! development server.

use crate::errors::{Error, Result};
use std::time::Duration;

/// Default API root used when `SEEDER_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Password given to every synthetic account unless `SEEDER_PASSWORD` is set.
pub const DEFAULT_PASSWORD: &str = "Password123";

/// Connection settings for the platform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Root of the REST API, without trailing slash (e.g. `http://localhost:3001/api`)
    pub base_url: String,
    /// Root of the auth routes; login is `{auth_url}/login`
    pub auth_url: String,
    /// Password used for every registered account
    pub password: String,
    /// Per-request timeout; `None` keeps the HTTP client's default
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    /// Builds a config for the given API root with the auth routes under `/auth`.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            auth_url: format!("{base_url}/auth"),
            base_url,
            password: DEFAULT_PASSWORD.to_string(),
            request_timeout: None,
        }
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config through an arbitrary key lookup.
    ///
    /// Recognised keys: `SEEDER_BASE_URL`, `SEEDER_AUTH_URL`, `SEEDER_PASSWORD`
    /// and `SEEDER_REQUEST_TIMEOUT_SECS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SEEDER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::for_base_url(&base_url);

        if let Some(auth_url) = lookup("SEEDER_AUTH_URL") {
            config.auth_url = auth_url.trim_end_matches('/').to_string();
        }

        if let Some(password) = lookup("SEEDER_PASSWORD") {
            if password.is_empty() {
                return Err(Error::Config {
                    message: "SEEDER_PASSWORD cannot be empty".to_string(),
                });
            }
            config.password = password;
        }

        if let Some(raw) = lookup("SEEDER_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("SEEDER_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {e}"),
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Full URL of the login route.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/login", self.auth_url)
    }
}
