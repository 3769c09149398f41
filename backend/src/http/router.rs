//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! static file serving, and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Form bodies are three short strings.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the CORS policy.
///
/// Any origin, method and header is allowed, with credentials. The request's
/// own values are mirrored back since `*` cannot be combined with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // `{user_id}` and `{entry_id}` share a path position, so GET and DELETE
    // hang off the same route.
    let api = Router::new()
        .route("/availability", post(handlers::create_availability))
        .route(
            "/availability/{user_id}",
            get(handlers::get_user_availability).delete(handlers::delete_availability),
        )
        .route(
            "/availability/{day}/{time_slot}",
            get(handlers::get_on_call),
        );

    let static_files = ServeDir::new(&state.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/", get(handlers::root_redirect))
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
