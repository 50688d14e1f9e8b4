use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, approve_booking, create_booking, get_booking_by_id, list_bookings_by_booker,
    list_bookings_by_owner,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Create a new booking
/// - PATCH /bookings/:booking_id?approved= - Approve or reject a booking
///
/// Query endpoints (Read operations):
/// - GET /bookings/:booking_id - Get booking details
/// - GET /bookings?state= - List bookings made by the caller
/// - GET /bookings/owner?state= - List bookings on the caller's items
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Booking endpoints
        .route("/bookings", post(create_booking).get(list_bookings_by_booker))
        .route("/bookings/owner", get(list_bookings_by_owner))
        .route(
            "/bookings/:booking_id",
            patch(approve_booking).get(get_booking_by_id),
        )
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
