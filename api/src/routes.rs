use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{admin_only, authenticate, track_metrics};
use crate::state::AppState;

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Readable by anyone
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .route("/jobs", get(handlers::jobs::list_jobs))
        .route("/jobs/:id", get(handlers::jobs::get_job))
        .route("/companies", get(handlers::companies::list_companies))
        .route("/companies/:handle", get(handlers::companies::get_company));

    // Mutations require an admin token
    let admin_routes = Router::new()
        .route("/jobs", post(handlers::jobs::create_job))
        .route("/jobs/:id", patch(handlers::jobs::update_job))
        .route("/jobs/:id", delete(handlers::jobs::delete_job))
        .route("/companies", post(handlers::companies::create_company))
        .route("/companies/:handle", patch(handlers::companies::update_company))
        .route("/companies/:handle", delete(handlers::companies::delete_company))
        .route_layer(from_fn(admin_only));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(track_metrics))
                .layer(from_fn_with_state(state.clone(), authenticate)),
        )
        .with_state(state)
}
