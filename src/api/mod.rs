//! REST API over a live monitoring service.
//!
//! Query endpoints return point-in-time snapshots:
//! - `GET /state` — run state, totals, and session energy
//! - `GET /appliances` — per-appliance readings and statuses
//! - `GET /groups` — per-group loads and statuses
//! - `GET /alerts` — alert log, newest first
//! - `GET /shedding` — current load-shedding recommendation
//!
//! Command endpoints mutate the service:
//! - `POST /start`, `POST /stop` — run-state control
//! - `POST /tick` — one monitoring cycle on demand
//! - `POST /alerts/clear` — empty the alert log
//! - `POST /appliances/{name}/toggle` — flip an appliance on or off
//! - `PUT /settings` — validated settings update

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::routing::{get, post, put};

use crate::monitor::MonitoringService;

/// Application state shared across all request handlers.
///
/// Command endpoints mutate the service, so it lives behind a mutex;
/// every handler takes the lock for the duration of one request.
pub type AppState = Arc<Mutex<MonitoringService>>;

/// Locks the service, recovering the guard if a handler panicked while
/// holding it.
fn lock(state: &AppState) -> MutexGuard<'_, MonitoringService> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Builds the axum router with all API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/appliances", get(handlers::get_appliances))
        .route("/groups", get(handlers::get_groups))
        .route("/alerts", get(handlers::get_alerts))
        .route("/shedding", get(handlers::get_shedding))
        .route("/start", post(handlers::post_start))
        .route("/stop", post(handlers::post_stop))
        .route("/tick", post(handlers::post_tick))
        .route("/alerts/clear", post(handlers::post_clear_alerts))
        .route("/appliances/{name}/toggle", post(handlers::post_toggle))
        .route("/settings", put(handlers::put_settings))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: AppState, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
