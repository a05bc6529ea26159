use std::sync::Arc;

use anyhow::Context;

use geniki_api::app::{AppServices, build_app};
use geniki_infra::ExportConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    geniki_observability::init();

    let config = ExportConfig::from_env().context("invalid configuration")?;

    let jwt_secret = config.jwt_secret.clone().unwrap_or_else(|| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let services = Arc::new(AppServices::from_config(&config).await?);
    let app = build_app(jwt_secret, services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
