use tracing_subscriber::EnvFilter;

use voyage_assistant::{config::AppConfig, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env()?;
    server::run(config).await?;
    Ok(())
}
