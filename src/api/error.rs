use crate::application::booking::{BookingApplicationError, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、エラー種別から
/// HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0.kind() {
            // 404 Not Found - リクエストされたリソースが存在しない
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found", self.0.to_string()),

            // 409 Conflict - ビジネスルール違反
            ErrorKind::Validation => (StatusCode::CONFLICT, "validation_error", self.0.to_string()),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ErrorKind::Internal => {
                tracing::error!("Internal error in booking service: {}", DisplayChain(&self.0));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

/// エラーと原因チェーンをまとめて表示するためのラッパー
struct DisplayChain<'a>(&'a BookingApplicationError);

impl std::fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = std::error::Error::source(self.0);
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}
