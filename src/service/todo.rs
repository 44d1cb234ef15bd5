use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    handlers::{error::AppError, CreateTodo, UpdateTodo},
    storage::{now, Todo, TodoId, TodoStorage},
    utils::measure_metrics::measure_and_record_service,
};

pub struct ServiceTodoRef {
    storage: Arc<dyn TodoStorage>,
}

/// Parses a path id; anything that is not a valid id cannot name a record.
fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse::<TodoId>().map_err(|e| {
        info!(raw_id = %raw, error = %e, "malformed todo id");
        AppError::NotFound
    })
}

impl ServiceTodoRef {
    pub(crate) fn new(storage: Arc<dyn TodoStorage>) -> Self {
        Self { storage }
    }

    #[instrument(name = "Service::todo::add", skip_all)]
    pub(crate) async fn add(&self, input: &CreateTodo) -> Result<Todo, AppError> {
        let title = match input.title.as_deref() {
            None => return Err(AppError::MissingTitle),
            Some("") => return Err(AppError::EmptyTitle),
            Some(title) => title,
        };

        let todo = Todo::new(TodoId::new(), title, input.description.as_deref(), now());
        info!(todo_id = %todo.id, "add todo");

        measure_and_record_service("add_todo", || async {
            self.storage.put(todo.id, todo.clone()).await
        })
        .await?;

        Ok(todo)
    }

    #[instrument(name = "Service::todo::get", skip_all)]
    pub(crate) async fn get(&self, raw_id: &str) -> Result<Todo, AppError> {
        let todo_id = parse_id(raw_id)?;

        measure_and_record_service("get_todo", || async { self.storage.get(todo_id).await })
            .await
            .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::get_all", skip_all)]
    pub(crate) async fn get_all(&self) -> Result<Vec<Todo>, AppError> {
        measure_and_record_service("get_all_todos", || async {
            self.storage.get_all().await
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(
        name = "Service::todo::update",
        skip_all,
        fields(title_is_some = patch.title.is_some(),
        description_is_some = patch.description.is_some(),
        completed_is_some = patch.completed.is_some()))
    ]
    pub(crate) async fn update(&self, raw_id: &str, patch: &UpdateTodo) -> Result<Todo, AppError> {
        let todo_id = parse_id(raw_id)?;

        if patch.title.as_deref() == Some("") {
            return Err(AppError::EmptyTitle);
        }

        info!(todo_id = %todo_id, "update todo");

        measure_and_record_service("update_todo", || async {
            self.storage.update(todo_id, patch.into(), now()).await
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::delete", skip_all)]
    pub(crate) async fn delete(&self, raw_id: &str) -> Result<Todo, AppError> {
        let todo_id = parse_id(raw_id)?;
        info!(todo_id = %todo_id, "delete todo");

        measure_and_record_service("delete_todo", || async {
            self.storage.delete(todo_id).await
        })
        .await
        .map_err(Into::into)
    }
}
