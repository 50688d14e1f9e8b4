use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::booking::Booking;
use crate::domain::value_objects::UserId;

/// 呼び出し元ユーザーを示す必須ヘッダー
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// 予約作成リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 承認操作のクエリパラメータ（PATCH /bookings/:booking_id）
#[derive(Debug, Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

/// 一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// 予約フィルタ（省略・空文字は all 扱い）
    pub state: Option<String>,
}

/// アイテムの短縮ビュー（レスポンス用）
#[derive(Debug, Serialize)]
pub struct ItemShortResponse {
    pub id: i64,
    pub name: String,
}

/// 予約者の短縮ビュー（レスポンス用）
#[derive(Debug, Serialize)]
pub struct UserShortResponse {
    pub id: i64,
}

/// 予約レスポンス
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
    pub item: ItemShortResponse,
    pub booker: UserShortResponse,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.value(),
            start: booking.start,
            end: booking.end,
            status: booking.status.as_str().to_string(),
            item: ItemShortResponse {
                id: booking.item.id.value(),
                name: booking.item.name,
            },
            booker: UserShortResponse {
                id: booking.booker.id.value(),
            },
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// 呼び出し元ユーザーの抽出
// ============================================================================

/// `X-Sharer-User-Id` ヘッダーから呼び出し元ユーザーIDを抽出する
///
/// ヘッダーが欠けている・整数でない場合は 400 Bad Request で拒否し、
/// アプリケーション層には到達させない。
#[derive(Debug, Clone, Copy)]
pub struct SharerUserId(pub UserId);

/// ヘッダー抽出のエラー
#[derive(Debug)]
pub enum SharerHeaderError {
    Missing,
    Malformed,
}

impl IntoResponse for SharerHeaderError {
    fn into_response(self) -> Response {
        let message = match self {
            SharerHeaderError::Missing => {
                format!("Missing required header: {}", SHARER_USER_ID_HEADER)
            }
            SharerHeaderError::Malformed => {
                format!("Header {} must be an integer user id", SHARER_USER_ID_HEADER)
            }
        };

        let body = Json(ErrorResponse::new("bad_request", message));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = SharerHeaderError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or(SharerHeaderError::Missing)?;

        let user_id = raw
            .to_str()
            .map_err(|_| SharerHeaderError::Malformed)?
            .trim()
            .parse::<i64>()
            .map_err(|_| SharerHeaderError::Malformed)?;

        Ok(SharerUserId(UserId::from_i64(user_id)))
    }
}
