use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::state::AppState;
use crate::system::middleware::request_logger::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Stages
        .route(
            "/api/stages",
            get(handlers::a001_stage::list_all).post(handlers::a001_stage::create),
        )
        .route("/api/stages/seed", post(handlers::a001_stage::seed))
        .route(
            "/api/stages/:id",
            get(handlers::a001_stage::get_by_id)
                .put(handlers::a001_stage::update)
                .delete(handlers::a001_stage::delete),
        )
        // API docs
        .route("/api-docs", get(handlers::api_docs::swagger_ui))
        .route(
            "/api-docs/openapi.json",
            get(handlers::api_docs::openapi_json),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
