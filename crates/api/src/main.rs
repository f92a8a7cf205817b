use std::sync::Arc;

use anyhow::Context;

use shopcart_api::app::{build_app, services::build_services};
use shopcart_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing `.env` is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    shopcart_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let services = build_services(&config.store)
        .await
        .context("failed to initialize stores")?;

    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
