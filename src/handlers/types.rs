use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::DatabaseState;
use crate::storage::Todo;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateTodo {
    /// Required; an absent or empty title is rejected.
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Partial update: only the fields present in the body are applied.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DeletedTodoResponse {
    pub message: String,
    pub todo: Todo,
}

#[derive(Serialize, Debug, ToSchema)]
pub(crate) struct StatusResponse {
    pub message: &'static str,
    pub database: DatabaseState,
}

#[derive(Serialize, Debug, ToSchema)]
pub(crate) struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseState,
}

#[derive(Serialize, Debug, ToSchema)]
pub(crate) struct RestartResponse {
    pub message: &'static str,
}
