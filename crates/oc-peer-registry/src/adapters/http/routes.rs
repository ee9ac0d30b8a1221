use super::error::ApiError;
use crate::domain::{HealthBody, JoinRequest, PeerRecord};
use crate::ports::PeerRegistryApi;
use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{header, Request},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info_span, warn};
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    api: Arc<dyn PeerRegistryApi>,
}

/// Build the controller router over any registry implementation.
pub fn router(api: Arc<dyn PeerRegistryApi>) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        info_span!(
            "http_request",
            request_id = %Uuid::new_v4(),
            http.method = %request.method(),
            http.target = %request.uri().path(),
        )
    });

    Router::new()
        .route("/join", post(handle_join))
        .route("/peers", get(handle_peers))
        .route("/health", get(health_check))
        .layer(trace)
        .with_state(AppState { api })
}

/// Serve the router on `listener` until `shutdown` resolves.
///
/// Connections carry their peer address so `/join` can derive endpoints.
pub async fn serve<F>(
    listener: TcpListener,
    api: Arc<dyn PeerRegistryApi>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(api);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}

/// Handle `POST /join`.
///
/// The body is decoded from raw bytes so a missing or wrong `Content-Type`
/// does not change the outcome: anything undecodable is a 400.
async fn handle_join(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: JoinRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(remote = %remote, error = %e, "Bad join request");
        ApiError::malformed(e)
    })?;

    let outcome = state.api.join(request, remote.ip())?;
    roster_response(&outcome.roster)
}

/// Handle `GET /peers`.
async fn handle_peers(State(state): State<AppState>) -> Result<Response, ApiError> {
    roster_response(&state.api.peers())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthBody> {
    let stats = state.api.stats();
    Json(HealthBody {
        status: "healthy".to_string(),
        service: "overlay-controller".to_string(),
        version: crate::VERSION.to_string(),
        peers: stats.peers,
        addresses_allocated: stats.addresses_allocated,
        addresses_remaining: stats.addresses_remaining,
    })
}

/// Pretty-printed (2-space) JSON array of records.
fn roster_response(roster: &[PeerRecord]) -> Result<Response, ApiError> {
    let body = serde_json::to_vec_pretty(roster).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
