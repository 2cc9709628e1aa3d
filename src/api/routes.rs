use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Emotion-based recommendation
        .route("/recommend", post(handlers::recommend))
        // Title search
        .route("/search", get(handlers::search))
        // Rankings
        .route("/rank/tmdb", get(handlers::rank_tmdb))
        .route("/rank/kobis", get(handlers::rank_kobis))
        .route("/rank/imdb", get(handlers::rank_imdb))
        .route("/rank/all", get(handlers::rank_all))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
