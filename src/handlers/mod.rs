pub(crate) mod admin;
pub(crate) mod error;
pub(crate) mod todo;
pub mod types;

pub(crate) use crate::service::Service;
use axum::{extract::State, response::IntoResponse, Json};
pub(crate) use types::*;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is running", body = StatusResponse)),
    tag = "status"
)]
#[tracing::instrument(name = "root", skip_all)]
pub(crate) async fn root(State(service): State<Service>) -> impl IntoResponse {
    Json(StatusResponse {
        message: "Todo Backend API Server is running!",
        database: service.database_state(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Liveness and store state", body = HealthResponse)),
    tag = "status"
)]
#[tracing::instrument(name = "health", skip_all)]
pub(crate) async fn health(State(service): State<Service>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now(),
        database: service.database_state(),
    })
}
