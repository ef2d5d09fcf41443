use dotenvy::dotenv;
use foundation_seeder::{config, core::driver};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Tracing first so config loading is logged
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. .env is optional, variables can come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    let Ok(settings) = config::load_settings()
        .inspect_err(|e| error!("Failed to load seeder settings: {}", e))
    else {
        return;
    };

    // Failures are reported, never turned into a non-zero exit.
    let _ = driver::run_populate(&settings)
        .await
        .inspect_err(|e| error!("Populate run interrupted: {}", e));
}
