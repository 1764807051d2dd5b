use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up HARBOR_PORT, GUARD_*, etc.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = harbor_gate::config::config();
    tracing::info!("Starting Harbor Gate in {:?} mode", config.environment);

    let app = harbor_gate::app(Arc::new(config.clone()));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Harbor Gate listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
