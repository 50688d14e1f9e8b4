use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, approve_booking as execute_approve_booking,
    create_booking as execute_create_booking, get_booking_by_id as execute_get_booking_by_id,
    get_bookings_by_booker, get_bookings_by_owner,
};
use crate::domain::booking::BookingState;
use crate::domain::commands::{ApproveBooking, CreateBooking};
use crate::domain::value_objects::{BookingId, ItemId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        ApproveQuery, BookingResponse, CreateBookingRequest, ListBookingsQuery, SharerUserId,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// state クエリパラメータをパースする
///
/// 省略・空文字は All 扱い（元の振る舞いを保存）。未知のトークンは
/// 有効値の一覧を含む Validation エラーになる。
fn parse_state_filter(state: Option<&str>) -> Result<BookingState, ApiError> {
    match state {
        None => Ok(BookingState::All),
        Some(s) if s.trim().is_empty() => Ok(BookingState::All),
        Some(s) => s
            .parse::<BookingState>()
            .map_err(|msg| ApiError::from(BookingApplicationError::UnknownState(msg))),
    }
}

// ============================================================================
// Command handlers (POST / PATCH)
// ============================================================================

/// POST /bookings - 新しい予約を作成
///
/// 呼び出し元（`X-Sharer-User-Id`）を予約者として、Waiting 状態の
/// 予約を作成する。
///
/// 強制されるビジネスルール:
/// - 予約者が存在すること
/// - アイテムが存在し、貸出可能であること
/// - 予約者がアイテムの所有者でないこと
/// - `start` が `end` より厳密に前であること
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let cmd = CreateBooking {
        item_id: ItemId::from_i64(req.item_id),
        booker_id: user_id,
        start: req.start,
        end: req.end,
    };

    let booking = execute_create_booking(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:booking_id?approved= - 予約を承認または却下
///
/// 強制されるビジネスルール:
/// - 呼び出し元ユーザーが存在すること
/// - 予約が存在すること
/// - 呼び出し元がアイテムの所有者であること
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApproveQuery>,
    SharerUserId(user_id): SharerUserId,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = ApproveBooking {
        booking_id: BookingId::from_i64(booking_id),
        caller_id: user_id,
        approved: query.approved,
    };

    let booking = execute_approve_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:booking_id - 予約詳細をIDで取得
///
/// 予約者本人またはアイテムの所有者のみ閲覧可能。
pub async fn get_booking_by_id(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    SharerUserId(user_id): SharerUserId,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = execute_get_booking_by_id(
        &state.service_deps,
        BookingId::from_i64(booking_id),
        user_id,
    )
    .await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings?state= - 呼び出し元が予約者である予約の一覧
///
/// クエリパラメータ:
/// - state: 予約フィルタ（all, current, past, future, waiting, rejected）
///   省略時は all
pub async fn list_bookings_by_booker(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
    SharerUserId(user_id): SharerUserId,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let filter = parse_state_filter(query.state.as_deref())?;

    let bookings = get_bookings_by_booker(&state.service_deps, user_id, filter).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner?state= - 呼び出し元が所有するアイテムへの予約の一覧
///
/// クエリパラメータは `list_bookings_by_booker` と同じ。
pub async fn list_bookings_by_owner(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
    SharerUserId(user_id): SharerUserId,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let filter = parse_state_filter(query.state.as_deref())?;

    let bookings = get_bookings_by_owner(&state.service_deps, user_id, filter).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}
