use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::SlotStore;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub mode: String,
    pub store: StoreHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: String,
    pub path: String,
    pub bookings: usize,
    pub response_time_ms: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub store: SlotStore,
    pub mode: &'static str,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    /// `mode` is reported as-is, e.g. "polling" or "webhook".
    pub fn new(store: SlotStore, mode: &'static str) -> Self {
        let state = AppState {
            store,
            mode,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let start = std::time::Instant::now();

    let ready = state.store.is_ready().await;
    let bookings = state.store.count().await;

    let response_time_ms = start.elapsed().as_millis() as u64;
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let store_status = if ready { "healthy" } else { "unhealthy" };

    let health_response = HealthResponse {
        status: store_status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: state.mode.to_string(),
        store: StoreHealth {
            status: store_status.to_string(),
            path: state.store.path().display().to_string(),
            bookings,
            response_time_ms,
        },
        uptime_seconds: uptime,
    };

    if ready {
        Ok(Json(health_response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    // Ready once the store's directory is there to write into
    if state.store.is_ready().await {
        Ok(Json("ready"))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness_check() -> Json<&'static str> {
    // Simple liveness check - if this endpoint responds, the service is alive
    Json("alive")
}
