use std::convert::Infallible;

use crate::config::Settings;
use crate::docs::openapi::ApiDoc;
use crate::middleware::rate_limiter::{GlobalRateLimitLayer, PerIpRateLimiter};
use crate::service::Service;
use crate::utils::ShutdownTrigger;
use crate::{
    handlers,
    middleware::{cors::cors, metrics::record_metrics, trace_root::trace_root},
};
use axum::Extension;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};

use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

fn todo_routes(settings: &Settings) -> OpenApiRouter<Service> {
    let limits = &settings.rate_limiter;
    let global_read_limiter = GlobalRateLimitLayer::new(limits.read.global);
    let per_ip_read_limiter = PerIpRateLimiter::new(limits.read.per_ip);
    let global_write_limiter = GlobalRateLimitLayer::new(limits.write.global);
    let per_ip_write_limiter = PerIpRateLimiter::new(limits.write.per_ip);

    OpenApiRouter::new()
        .route(
            "/",
            get(handlers::todo::get_all)
                .layer::<_, Infallible>(global_read_limiter.clone())
                .layer::<_, Infallible>(per_ip_read_limiter.clone()),
        )
        .route(
            "/",
            post(handlers::todo::add)
                .layer::<_, Infallible>(global_write_limiter.clone())
                .layer::<_, Infallible>(per_ip_write_limiter.clone()),
        )
        .route(
            "/{id}",
            get(handlers::todo::get)
                .layer::<_, Infallible>(global_read_limiter)
                .layer::<_, Infallible>(per_ip_read_limiter),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::todo::update)
                .layer::<_, Infallible>(global_write_limiter.clone())
                .layer::<_, Infallible>(per_ip_write_limiter.clone()),
        )
        .route(
            "/{id}",
            axum::routing::delete(handlers::todo::delete)
                .layer::<_, Infallible>(global_write_limiter)
                .layer::<_, Infallible>(per_ip_write_limiter),
        )
}

fn admin_routes() -> OpenApiRouter<Service> {
    OpenApiRouter::new().route("/restart", post(handlers::admin::restart))
}

#[instrument(name = "build_app", skip_all)]
pub fn build_app(service: Service, settings: Settings, shutdown: ShutdownTrigger) -> Router {
    let mut app_router = OpenApiRouter::new()
        .nest("/api/todos", todo_routes(&settings))
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    if settings.admin.restart_enabled {
        app_router = app_router.merge(admin_routes());
    } else {
        info!("restart endpoint disabled");
    }

    let app_router = app_router
        .layer(from_fn(record_metrics))
        .layer(from_fn(trace_root))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(shutdown))
        .layer(Extension(settings))
        .with_state(service);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(app_router)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(from_fn(cors))
}
