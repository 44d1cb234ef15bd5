use crate::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use strum_macros::AsRefStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, AsRefStr, ToSchema)]
#[strum(serialize_all = "snake_case")]
pub enum AppError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Todo not found")]
    NotFound,

    #[schema(value_type = String)]
    #[error("Internal storage error")]
    InternalStorage(#[source] StorageError),

    #[schema(value_type = String)]
    #[error("Server restart failed")]
    RestartFailed(#[source] Box<AppError>),

    #[schema(value_type = String)]
    #[error("Failed joining tokio task")]
    JoinTask(#[from] tokio::task::JoinError),
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound | StorageError::ParseIdFromString(_) => Self::NotFound,
            _ => Self::InternalStorage(value),
        }
    }
}

impl AppError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingTitle | AppError::EmptyTitle => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InternalStorage { .. }
            | AppError::RestartFailed { .. }
            | AppError::JoinTask { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "AppError");
        } else {
            tracing::warn!(error = ?self, "AppError");
        }

        let body = Json(json!({
            "error": self.as_ref(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
