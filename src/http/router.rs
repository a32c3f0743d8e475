//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Booking CRUD
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings", post(handlers::create_booking))
        .route(
            "/bookings/{id}",
            get(handlers::get_booking)
                .put(handlers::update_booking)
                .delete(handlers::delete_booking),
        )
        // Free slot search
        .route("/tracks/{track}/slots", get(handlers::list_free_slots))
        // Master data
        .route("/trains", get(handlers::list_trains))
        .route("/trains", post(handlers::create_train))
        .route("/stations", get(handlers::list_stations))
        .route("/stations", post(handlers::create_station))
        // Reporting
        .route("/stats", get(handlers::get_stats))
        .route("/audit", get(handlers::get_audit));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
