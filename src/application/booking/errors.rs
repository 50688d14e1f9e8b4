use thiserror::Error;

/// エラー種別
///
/// トランスポート層（HTTPステータス等）へのマッピングは境界層の責務。
/// アプリケーション層は種別のみを公開する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 参照先（予約・アイテム・ユーザー）が存在しない
    NotFound,
    /// ビジネスルール違反
    Validation,
    /// ポート層のインフラ障害
    Internal,
}

/// 予約管理アプリケーション層のエラー
///
/// すべて入力に対して決定的なエラーであり、リトライは行わない
/// （Internal系のみインフラ障害）。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 予約が見つからない
    #[error("Booking not found")]
    BookingNotFound,

    /// アイテムが見つからない
    #[error("Item not found")]
    ItemNotFound,

    /// ユーザーが見つからない
    #[error("User not found")]
    UserNotFound,

    /// アイテムが貸出不可
    #[error("Item is not available")]
    ItemNotAvailable,

    /// 所有者自身による予約
    #[error("owner must not be the same as booker")]
    BookerIsOwner,

    /// `start` が `end` より後
    #[error("`start` must be before `end`")]
    StartAfterEnd,

    /// `start` と `end` が同時刻
    #[error("`start` must not be equals `end`")]
    StartEqualsEnd,

    /// 承認操作の呼び出し元がアイテムの所有者でない
    #[error("Item belongs to another user")]
    NotItemOwner,

    /// 予約者でも所有者でもないユーザーによる閲覧
    #[error("Restricted access")]
    RestrictedAccess,

    /// 承認操作の呼び出し元ユーザーが存在しない
    ///
    /// 不変条件：この経路に限り NotFound ではなく Validation として
    /// 扱われる。呼び出し箇所ごとに種別が揃っていないのは元システムの
    /// 挙動をそのまま保存したもの。
    #[error("User not found")]
    CallerNotFound,

    /// 未知の state トークン
    #[error("{0}")]
    UnknownState(String),

    /// 予約ストアのエラー
    #[error("Booking store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// アイテムディレクトリのエラー
    #[error("Item directory error")]
    ItemDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ユーザーディレクトリのエラー
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingApplicationError {
    /// エラー種別を取得する
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingApplicationError::BookingNotFound
            | BookingApplicationError::ItemNotFound
            | BookingApplicationError::UserNotFound => ErrorKind::NotFound,

            BookingApplicationError::ItemNotAvailable
            | BookingApplicationError::BookerIsOwner
            | BookingApplicationError::StartAfterEnd
            | BookingApplicationError::StartEqualsEnd
            | BookingApplicationError::NotItemOwner
            | BookingApplicationError::RestrictedAccess
            | BookingApplicationError::CallerNotFound
            | BookingApplicationError::UnknownState(_) => ErrorKind::Validation,

            BookingApplicationError::StoreError(_)
            | BookingApplicationError::ItemDirectoryError(_)
            | BookingApplicationError::UserDirectoryError(_) => ErrorKind::Internal,
        }
    }
}

impl From<crate::domain::errors::BookingRequestError> for BookingApplicationError {
    fn from(err: crate::domain::errors::BookingRequestError) -> Self {
        use crate::domain::errors::BookingRequestError;
        match err {
            BookingRequestError::ItemNotAvailable => BookingApplicationError::ItemNotAvailable,
            BookingRequestError::BookerIsOwner => BookingApplicationError::BookerIsOwner,
            BookingRequestError::StartAfterEnd => BookingApplicationError::StartAfterEnd,
            BookingRequestError::StartEqualsEnd => BookingApplicationError::StartEqualsEnd,
        }
    }
}

impl From<crate::domain::errors::ViewAccessError> for BookingApplicationError {
    fn from(err: crate::domain::errors::ViewAccessError) -> Self {
        match err {
            crate::domain::errors::ViewAccessError::RestrictedAccess => {
                BookingApplicationError::RestrictedAccess
            }
        }
    }
}

impl From<crate::domain::errors::ApprovalAccessError> for BookingApplicationError {
    fn from(err: crate::domain::errors::ApprovalAccessError) -> Self {
        match err {
            crate::domain::errors::ApprovalAccessError::NotItemOwner => {
                BookingApplicationError::NotItemOwner
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
