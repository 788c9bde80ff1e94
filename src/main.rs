// src/main.rs

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use roy::api::http::router::api_router;
use roy::config::CONFIG;
use roy::session::sweeper::spawn_session_sweeper;
use roy::state::create_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = CONFIG.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ROY backend");
    info!("Chat model: {}", CONFIG.anthropic_model);
    info!(
        "Sessions: {} min nominal, wrap-up at {} min, idle sweep after {}s",
        CONFIG.session_minutes, CONFIG.wrap_up_after_minutes, CONFIG.session_idle_secs
    );

    let app_state = Arc::new(create_app_state()?);

    // Start the idle-session sweeper as a background task
    let sweeper_handle = spawn_session_sweeper(app_state.store.clone(), CONFIG.sweep_interval());
    info!(
        "Session sweeper started - running every {} seconds",
        CONFIG.sweep_interval_secs
    );

    let cors = if CONFIG.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origin = CONFIG
            .cors_origin
            .parse::<HeaderValue>()
            .map_err(|e| anyhow::anyhow!("invalid ROY_CORS_ORIGIN: {e}"))?;
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server
    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("ROY backend listening on http://{}", bind_address);

    // Run server and sweeper concurrently
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = sweeper_handle => {
            error!("Session sweeper unexpectedly terminated");
        }
    }

    Ok(())
}
