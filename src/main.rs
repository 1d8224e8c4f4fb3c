// plantdoc - Plant disease diagnosis API backed by Gemini vision models
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use plantdoc::cli::Args;
use plantdoc::config::AppConfig;
use plantdoc::gemini::GeminiClient;
use plantdoc::server::create_router;
use plantdoc::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration (.env first so GEMINI_API_KEY can live there)
    dotenvy::dotenv().ok();
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting plantdoc v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Validate and build the shared Gemini client; failures abort startup
    config.validate()?;
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Gemini model configured: {}", gemini_client.model());

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, gemini_client)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
