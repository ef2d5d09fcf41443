use dotenvy::dotenv;
use foundation_seeder::{config, core::driver};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();
    info!("Attempted to load .env file.");

    let Ok(settings) = config::load_settings()
        .inspect_err(|e| error!("Failed to load seeder settings: {}", e))
    else {
        return;
    };

    let _ = driver::run_check_endpoints(&settings)
        .await
        .inspect_err(|e| error!("Endpoint check interrupted: {}", e));
}
