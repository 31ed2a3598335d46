use crate::api::handlers;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/research", post(handlers::research::research))
        .route("/memory/search", post(handlers::memory::search_memory))
        .route("/memory/stats", get(handlers::memory::memory_stats))
}

/// The full application: API routes under `/api` with request tracing and
/// permissive CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", create_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
