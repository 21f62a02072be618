use anyhow::Result;
use tracing_subscriber::EnvFilter;

use geoproxy::api::AppState;
use geoproxy::config::AppConfig;
use geoproxy::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::new(&config)?;
    web::run(config.port, state).await
}
