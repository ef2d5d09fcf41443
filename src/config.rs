/// API location and account password from environment variables
pub mod api;

/// Seeding volumes and admin account from seeder.toml
pub mod plan;

pub use api::ApiConfig;
pub use plan::{AdminAccount, SeedPlan, SeedVolumes};

use crate::errors::Result;
use std::env::VarError;
use tracing::info;

/// Everything a run needs to know before it starts issuing requests.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the API lives and how to authenticate
    pub api: ApiConfig,
    /// What to create and how fast
    pub plan: SeedPlan,
}

/// Loads settings from the environment and the plan file named by `SEEDER_CONFIG`.
///
/// Call after `.env` has been loaded.
pub fn load_settings() -> Result<Settings> {
    let api = ApiConfig::from_env()?;
    let plan_path = plan_path_from(std::env::var("SEEDER_CONFIG"))?;
    let plan = plan::load_plan(&plan_path)?;

    info!(
        base_url = %api.base_url,
        auth_url = %api.auth_url,
        plan = %plan_path,
        "Loaded seeder settings"
    );

    Ok(Settings { api, plan })
}

/// Resolves the plan file path from the raw `SEEDER_CONFIG` lookup.
///
/// An unset variable means the default path; a value that is not valid
/// Unicode is an error rather than being silently ignored.
fn plan_path_from(value: std::result::Result<String, VarError>) -> Result<String> {
    match value {
        Ok(path) => Ok(path),
        Err(VarError::NotPresent) => Ok(plan::DEFAULT_PLAN_PATH.to_string()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::ffi::OsString;

    #[test]
    fn test_plan_path_defaults_when_unset() {
        assert_eq!(
            plan_path_from(Err(VarError::NotPresent)).ok().as_deref(),
            Some(plan::DEFAULT_PLAN_PATH)
        );
        assert_eq!(
            plan_path_from(Ok("plans/demo.toml".to_string())).ok().as_deref(),
            Some("plans/demo.toml")
        );
    }

    #[test]
    fn test_plan_path_rejects_non_unicode_value() {
        let result = plan_path_from(Err(VarError::NotUnicode(OsString::from("bad"))));

        assert!(matches!(result, Err(Error::EnvVar(VarError::NotUnicode(_)))));
    }
}
