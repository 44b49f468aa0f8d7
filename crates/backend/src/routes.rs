use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// All routes of the application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // UseCase u508: Build picking list
        .route(
            "/api/u508/picking/process",
            post(handlers::usecases::u508_process),
        )
        .route(
            "/api/u508/picking/export/:table",
            post(handlers::usecases::u508_export),
        )
}
