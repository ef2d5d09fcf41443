//! Seeding plan loading from seeder.toml
//!
//! The plan controls how many entities each phase creates, how long to pause
//! between phases, and which credentials the populate run uses for its admin
//! account. Every key is optional; a missing file yields the default plan.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the plan file, relative to the working directory.
pub const DEFAULT_PLAN_PATH: &str = "seeder.toml";

/// Configuration structure representing the entire seeder.toml file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedPlan {
    /// Entity volumes per phase
    pub volumes: SeedVolumes,
    /// Account registered first and used as the fallback bearer
    pub admin: AdminAccount,
    /// Pause between seeding phases, in milliseconds
    pub phase_pause_ms: u64,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            volumes: SeedVolumes::default(),
            admin: AdminAccount::default(),
            phase_pause_ms: 1000,
        }
    }
}

impl SeedPlan {
    /// Pause inserted between phases.
    #[must_use]
    pub const fn phase_pause(&self) -> Duration {
        Duration::from_millis(self.phase_pause_ms)
    }
}

/// How many entities of each kind a populate run attempts.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedVolumes {
    /// Donor accounts (`user_type = "user"`)
    pub regular_users: usize,
    /// Foundation accounts (`user_type = "foundation"`), excluding the admin
    pub foundation_users: usize,
    /// Upper bound of donations per donor; each donor makes 1..=this many
    pub donations_per_user: usize,
    /// Upper bound of social actions per foundation
    pub social_actions_per_foundation: usize,
    /// Scales how many donations, actions and foundations receive comments
    pub comments_per_entity: usize,
    /// Donations that receive a rating
    pub max_ratings: usize,
    /// Participation requests attempted
    pub participation_requests: usize,
    /// Certificates issued
    pub certificates: usize,
    /// Notifications sent
    pub notifications: usize,
    /// Suggestions submitted
    pub suggestions: usize,
    /// Upper bound of favorites per donor
    pub favorites_per_user: usize,
}

impl Default for SeedVolumes {
    fn default() -> Self {
        Self {
            regular_users: 20,
            foundation_users: 10,
            donations_per_user: 3,
            social_actions_per_foundation: 4,
            comments_per_entity: 2,
            max_ratings: 15,
            participation_requests: 30,
            certificates: 15,
            notifications: 40,
            suggestions: 25,
            favorites_per_user: 5,
        }
    }
}

/// Name and email of the admin account.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdminAccount {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@example.com".to_string(),
        }
    }
}

/// Parses a plan from TOML text.
pub fn parse_plan(contents: &str) -> Result<SeedPlan> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seeder.toml: {e}"),
    })
}

/// Loads the plan from a TOML file, falling back to defaults if the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<SeedPlan> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::debug!("No plan file at {:?}, using defaults", path_ref);
        return Ok(SeedPlan::default());
    }

    tracing::debug!("Loading seeding plan from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read plan file {path_ref:?}: {e}"),
    })?;
    parse_plan(&contents)
}
