//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, tracing, bearer auth),
//! and creates the axum router ready for serving.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::middleware::require_auth;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes that require a bearer token
    let collections = Router::new()
        .route(
            "/collections",
            get(handlers::list_collections).post(handlers::create_collection),
        )
        .route("/collections/save", post(handlers::save_exhibit))
        .route(
            "/collections/{id}/exhibits",
            get(handlers::list_collection_exhibits),
        )
        .route(
            "/collections/{id}/exhibits/{exhibit_id}",
            delete(handlers::remove_exhibit),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/exhibits", get(handlers::list_exhibits))
        .route("/api/exhibits/", get(handlers::missing_exhibit_id))
        .route("/api/exhibits/{id}", get(handlers::get_exhibit))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .merge(collections)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
