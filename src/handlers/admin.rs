use super::error::AppError;
use super::types::RestartResponse;
use super::Service;
use crate::utils::ShutdownTrigger;
use axum::{extract::State, response::IntoResponse, Extension, Json};

/// Closes the store, then asks the server to drain and exit so a process
/// supervisor can start it again.
#[utoipa::path(
    post,
    path = "/restart",
    responses(
        (status = 200, description = "Restart scheduled", body = RestartResponse),
        (status = 500, description = "Failed to close storage"),
    ),
    tag = "admin"
)]
#[tracing::instrument(name = "handlers::admin::restart", skip_all)]
pub(crate) async fn restart(
    State(service): State<Service>,
    Extension(shutdown): Extension<ShutdownTrigger>,
) -> Result<impl IntoResponse, AppError> {
    tracing::warn!("restart requested");

    service
        .close_storage()
        .await
        .map_err(|e| AppError::RestartFailed(Box::new(e)))?;

    shutdown.fire();

    Ok(Json(RestartResponse {
        message: "Server restarting",
    }))
}
