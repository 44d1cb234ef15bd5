use utoipa::OpenApi;

use crate::handlers::error::AppError;
use crate::handlers::types::{
    CreateTodo, DeletedTodoResponse, HealthResponse, RestartResponse, StatusResponse, UpdateTodo,
};
use crate::service::DatabaseState;
use crate::storage::Todo;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::todo::get_all,
        crate::handlers::todo::get,
        crate::handlers::todo::add,
        crate::handlers::todo::update,
        crate::handlers::todo::delete,
        crate::handlers::admin::restart,
    ),
    components(
        schemas(
            Todo,
            CreateTodo,
            UpdateTodo,
            DeletedTodoResponse,
            StatusResponse,
            HealthResponse,
            RestartResponse,
            DatabaseState,
            AppError,
        ),
    ),
    tags(
        (name = "todos", description = "Endpoints to create and manage todo items"),
        (name = "status", description = "Liveness and store state"),
        (name = "admin", description = "Operational endpoints")
    ),
    info(
        title = "Todo API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
