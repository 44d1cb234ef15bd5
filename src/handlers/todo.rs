use super::error::AppError;
use super::types::*;
use crate::{handlers::Service, storage::Todo, utils::RootSpan};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/todos",
    responses(
        (status = 200, description = "All todos, most recently created first", body = [Todo]),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::get_all", skip_all)]
pub(crate) async fn get_all(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
) -> Result<impl IntoResponse, AppError> {
    let items = service.todo().get_all().await?;

    root_span.record().todo_count(items.len());
    info!("Get {} ToDos", items.len());

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(
        ("id" = String, Path, description = "ToDo ID")
    ),
    responses(
        (status = 200, description = "Get ToDo by ID", body = Todo),
        (status = 404, description = "ToDo not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::get", skip_all)]
pub(crate) async fn get(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_raw_id(&id);

    let todo = service.todo().get(&id).await?;

    tracing::info!(todo = ?todo, "Get ToDo");

    Ok(Json(todo))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    request_body(
        content = CreateTodo,
        description = "New ToDo item",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "ToDo created", body = Todo),
        (status = 400, description = "Missing or empty title"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::post", skip_all)]
pub(crate) async fn add(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Json(input): Json<CreateTodo>,
) -> Result<impl IntoResponse, AppError> {
    match service.todo().add(&input).await {
        Ok(todo) => {
            root_span.record().todo_id(&todo.id);
            Ok((StatusCode::CREATED, Json(todo)))
        }
        Err(e) => {
            tracing::error!(err = ?e, "failed to add new ToDo");
            Err(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(
        ("id" = String, Path, description = "ToDo ID")
    ),
    request_body(
        content = UpdateTodo,
        description = "Partial ToDo update",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "ToDo updated", body = Todo),
        (status = 400, description = "Empty title"),
        (status = 404, description = "ToDo not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::update", skip_all)]
pub(crate) async fn update(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_raw_id(&id);

    let todo = service.todo().update(&id, &input).await?;

    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(
        ("id" = String, Path, description = "ToDo ID")
    ),
    responses(
        (status = 200, description = "ToDo deleted", body = DeletedTodoResponse),
        (status = 404, description = "ToDo not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::delete", skip_all)]
pub(crate) async fn delete(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_raw_id(&id);

    let todo = service.todo().delete(&id).await?;

    Ok(Json(DeletedTodoResponse {
        message: "Todo deleted".to_string(),
        todo,
    }))
}
