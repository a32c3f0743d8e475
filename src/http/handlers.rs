//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. The caller's identity arrives in the
//! `X-User-Id` header (session handling lives in front of this service) and
//! is only ever stamped onto records, never used for allocation decisions.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};

use super::dto::{
    AuditListResponse, BookingListResponse, BookingRequest, CreateBookingResponse,
    CreateStationRequest, CreateTrainRequest, HealthResponse, SlotsQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{Booking, BookingId, Station, TimeSlot, Train, UserId};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Number of audit entries returned by the audit endpoint.
const AUDIT_PAGE_SIZE: usize = 100;

fn actor_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .map(UserId::new)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Booking CRUD
// =============================================================================

/// GET /v1/bookings
pub async fn list_bookings(State(state): State<AppState>) -> HandlerResult<BookingListResponse> {
    let bookings = services::list_bookings(state.repository.as_ref()).await?;
    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}

/// GET /v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Booking> {
    let booking = services::get_booking(state.repository.as_ref(), BookingId::new(id)).await?;
    Ok(Json(booking))
}

/// POST /v1/bookings
///
/// Validate and create a booking. Rejections return 409 with alternative
/// slots (interval conflicts) or 400 (duration/train failures).
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let actor = actor_from_headers(&headers);
    let created = services::create_booking(
        state.repository.as_ref(),
        state.track_locks.as_ref(),
        request.into(),
        actor,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking: created.booking,
            generated: created.generated,
        }),
    ))
}

/// PUT /v1/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<BookingRequest>,
) -> HandlerResult<Booking> {
    let actor = actor_from_headers(&headers);
    let updated = services::update_booking(
        state.repository.as_ref(),
        state.track_locks.as_ref(),
        BookingId::new(id),
        request.into(),
        actor,
    )
    .await?;
    Ok(Json(updated))
}

/// DELETE /v1/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> HandlerResult<Booking> {
    let actor = actor_from_headers(&headers);
    let removed =
        services::delete_booking(state.repository.as_ref(), BookingId::new(id), actor).await?;
    Ok(Json(removed))
}

// =============================================================================
// Free Slots
// =============================================================================

/// GET /v1/tracks/{track}/slots
///
/// Enumerate up to three free slots of the requested duration on a track.
pub async fn list_free_slots(
    State(state): State<AppState>,
    Path(track): Path<i32>,
    Query(query): Query<SlotsQuery>,
) -> HandlerResult<Vec<TimeSlot>> {
    if query.duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "duration_minutes must be positive".to_string(),
        ));
    }
    // try_minutes: values past the chrono range would otherwise panic.
    let duration = Duration::try_minutes(query.duration_minutes).ok_or_else(|| {
        AppError::BadRequest("duration_minutes is out of range".to_string())
    })?;

    let near = query.near.unwrap_or_else(Utc::now);
    let slots =
        services::find_free_slots(state.repository.as_ref(), track, duration, near).await?;
    Ok(Json(slots))
}

// =============================================================================
// Master Data
// =============================================================================

/// GET /v1/trains
pub async fn list_trains(State(state): State<AppState>) -> HandlerResult<Vec<Train>> {
    Ok(Json(services::list_trains(state.repository.as_ref()).await?))
}

/// POST /v1/trains
pub async fn create_train(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateTrainRequest>,
) -> Result<(StatusCode, Json<Train>), AppError> {
    let actor = actor_from_headers(&headers);
    let train =
        services::create_train(state.repository.as_ref(), request.into(), actor).await?;
    Ok((StatusCode::CREATED, Json(train)))
}

/// GET /v1/stations
pub async fn list_stations(State(state): State<AppState>) -> HandlerResult<Vec<Station>> {
    Ok(Json(
        services::list_stations(state.repository.as_ref()).await?,
    ))
}

/// POST /v1/stations
pub async fn create_station(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateStationRequest>,
) -> Result<(StatusCode, Json<Station>), AppError> {
    let actor = actor_from_headers(&headers);
    let station =
        services::create_station(state.repository.as_ref(), request.into(), actor).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

// =============================================================================
// Reporting
// =============================================================================

/// GET /v1/stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> HandlerResult<services::DispatchStats> {
    Ok(Json(
        services::dispatch_stats(state.repository.as_ref()).await?,
    ))
}

/// GET /v1/audit
pub async fn get_audit(State(state): State<AppState>) -> HandlerResult<AuditListResponse> {
    let entries =
        services::recent_audit(state.repository.as_ref(), AUDIT_PAGE_SIZE).await?;
    let total = entries.len();
    Ok(Json(AuditListResponse { entries, total }))
}
