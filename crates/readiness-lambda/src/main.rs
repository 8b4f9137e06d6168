use tracing_subscriber::EnvFilter;

use readiness_lambda::config::LambdaConfig;
use readiness_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = LambdaConfig::from_env()?;
    tracing::info!(
        store = ?config.store,
        bucket = %config.store_config.bucket,
        delete_mode = ?config.service.delete_policy.mode,
        "starting"
    );

    let state = AppState::build(&config).await?;
    let app = readiness_lambda::router(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
