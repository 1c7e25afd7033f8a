use pagegate_server::{AppState, app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagegate_server=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    for name in config.missing_publish_vars() {
        tracing::warn!("{name} not set — publishing will fail until it is configured");
    }

    let port = config.port;
    let state = AppState::new(config)?;
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("publish gateway listening on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
