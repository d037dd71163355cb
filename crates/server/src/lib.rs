//! HTTP surface for `tempmon`.
//!
//! Owns the process wiring:
//! - the rolling temperature store (created once, shared by handle)
//! - the background sampler task (the store's only writer)
//! - `GET /data` JSON snapshots and the static dashboard

use axum::{
    extract::State,
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::{path::Path, sync::Arc};
use tempmon_config::{MonitorConfig, SamplerConfig, SourceKind};
use tempmon_core::{MonitorError, Result, RollingTemperatureStore};
use tempmon_system::{spawn_sampler, CommandSource, ComponentSource};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Bind the listener, start sampling, and serve HTTP until Ctrl-C.
///
/// Only a failure to bind the listener (or a fatal accept error) is returned;
/// sampling errors are logged by the sampler and never end the process.
/// Nothing is spawned until the listener is bound.
pub async fn run(config: MonitorConfig) -> Result<()> {
    let listener = TcpListener::bind(&config.server.listen)
        .await
        .map_err(|e| MonitorError::Server(format!("cannot bind '{}': {e}", config.server.listen)))?;

    let store = Arc::new(RollingTemperatureStore::new(config.history.capacity));
    let sampler = start_sampler(Arc::clone(&store), &config.sampler);

    info!(
        "Web server is running on http://{} (static files from '{}')",
        listener.local_addr()?,
        config.server.static_dir
    );

    axum::serve(listener, router(store, &config.server.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sampler.abort();
    info!("Shut down");
    Ok(())
}

fn start_sampler(store: Arc<RollingTemperatureStore>, config: &SamplerConfig) -> JoinHandle<()> {
    match config.source {
        SourceKind::Command => {
            let source = CommandSource::new(config.command.clone(), config.args.clone());
            spawn_sampler(store, source, config)
        }
        SourceKind::Component => {
            let source = ComponentSource::new(config.component.clone());
            let labels = source.available_labels();
            if !labels.contains(&config.component) {
                warn!(
                    "Sensor '{}' not found; available: {}",
                    config.component,
                    labels.join(", ")
                );
            }
            spawn_sampler(store, source, config)
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received; shutting down"),
        Err(e) => {
            // Without a signal handler, keep serving until killed.
            error!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

// ── Routes ────────────────────────────────────────────────────────────────────

/// Build the HTTP router: `/data` plus static files from `static_dir`.
pub fn router(store: Arc<RollingTemperatureStore>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/data", get(data))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn data(State(store): State<Arc<RollingTemperatureStore>>) -> Response {
    json_response(&store.snapshot())
}

/// Serialize `value` as a CORS-open JSON response, or a plain-text 500.
fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            [(CONTENT_TYPE, "application/json"), (ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Cannot serialize snapshot: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
