use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};
use voucher_parser::{app_state::AppState, config::Config, router, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format())?;
    info!(?config, "starting voucher-parser");

    if config.openai_api_key().is_none() {
        warn!("OPENAI_API_KEY is not set, the extraction endpoint will fail until it is");
    }

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
