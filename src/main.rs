use tracing_subscriber::EnvFilter;

use shoo_kb::config::AppConfig;
use shoo_kb::infrastructure::AppContainer;
use shoo_kb::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Starting knowledge base on port {} ({} storage)",
        config.port,
        config.storage.as_str()
    );

    let container = AppContainer::new(config)?;
    HttpServer::from_container(&container).run().await
}
