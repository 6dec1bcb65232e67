//! docvault-server binary

use docvault_server::{AppState, BoxError, Config, create_router, logger};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!("Starting docvault-server (env: {})", config.environment);
    if config.allow_role_query {
        tracing::warn!("ALLOW_ROLE_QUERY is enabled: role query parameters are trusted without a token");
    }

    let state = AppState::new(&config).await?;
    let app = create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("docvault-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("docvault-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
