//! Egg Timer - a state-managed HTTP server for countdown timer control
//!
//! This is the main entry point for the egg-timer application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use egg_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{countdown_tick_task, expiry_alert_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "egg_timer={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting egg-timer server v0.1.0");
    info!(
        "Configuration: host={}, port={}, initial duration={}min",
        config.host, config.port, config.minutes
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Preload the countdown with the configured duration
    if config.minutes > 0 {
        if let Err(e) = state.set_duration(config.minutes) {
            tracing::error!("Failed to preload countdown duration: {}", e);
            std::process::exit(1);
        }
    }

    // Start the countdown tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_tick_task(tick_state).await;
    });

    // Start the expiry alert background task
    let alert_state = Arc::clone(&state);
    tokio::spawn(async move {
        expiry_alert_task(alert_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /duration - Set countdown duration in minutes");
    info!("  POST /start    - Start the countdown");
    info!("  POST /pause    - Pause or resume the countdown");
    info!("  POST /reset    - Reset the countdown");
    info!("  GET  /status   - Check current countdown state");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop the background tasks so no tick outlives the server
    state.shutdown();

    info!("Server shutdown complete");
    Ok(())
}
