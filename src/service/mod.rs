pub(crate) mod todo;

use std::sync::Arc;

use crate::{
    handlers::error::AppError,
    storage::{ConnectionStorage, TodoStorage},
    utils::measure_metrics::measure_and_record_service,
};
use serde::Serialize;
use strum_macros::AsRefStr;
use todo::ServiceTodoRef;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DatabaseState {
    Connected,
    Disconnected,
}

/// Handle shared by all requests; cloning it only bumps reference counts.
#[derive(Clone)]
pub struct Service {
    todo_storage: Arc<dyn TodoStorage>,
    connection_storage: Arc<dyn ConnectionStorage>,
}

impl Service {
    #[instrument(name = "Service::new", skip_all)]
    pub fn new(
        todo_storage: Arc<dyn TodoStorage>,
        connection_storage: Arc<dyn ConnectionStorage>,
    ) -> Self {
        Self {
            todo_storage,
            connection_storage,
        }
    }

    pub fn todo(&self) -> ServiceTodoRef {
        ServiceTodoRef::new(self.todo_storage.clone())
    }

    pub fn database_state(&self) -> DatabaseState {
        if self.connection_storage.is_connected() {
            DatabaseState::Connected
        } else {
            DatabaseState::Disconnected
        }
    }

    #[instrument(name = "Service::close_storage", skip_all)]
    pub async fn close_storage(&self) -> Result<(), AppError> {
        info!("closing storage");

        measure_and_record_service("close_storage", || async {
            self.connection_storage.close().await.map_err(Into::into)
        })
        .await
    }
}
