use recipe_service::config::RecipeConfig;
use recipe_service::startup::Application;
use service_core::config::{load_dotenv, DeploymentMode};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = DeploymentMode::from_env();
    load_dotenv(mode);

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("recipe-service", "info", otlp_endpoint.as_deref());

    let config = RecipeConfig::load(mode).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await?;

    if !mode.is_hosted() {
        tracing::info!("Server running at http://localhost:{}", app.port());
    }

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
