#![allow(dead_code)]

/// 予約作成リクエストのエラー
///
/// バリデーション順（最初の違反で打ち切り）：
/// アイテム利用可否 → 自己予約 → 開始/終了の前後関係 → 同時刻
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRequestError {
    /// アイテムが貸出不可
    ItemNotAvailable,
    /// 予約者がアイテムの所有者と同一
    BookerIsOwner,
    /// `start` が `end` より後
    StartAfterEnd,
    /// `start` と `end` が同時刻（境界一致も拒否する）
    StartEqualsEnd,
}

/// 予約閲覧のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAccessError {
    /// 予約者でも所有者でもないユーザーからのアクセス
    RestrictedAccess,
}

/// 予約承認のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalAccessError {
    /// 呼び出し元がアイテムの所有者でない
    NotItemOwner,
}
