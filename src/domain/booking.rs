use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ApprovalAccessError, BookingId, BookingRequestError, ItemId, UserId, ViewAccessError,
};

// ============================================================================
// 予約ステータス（永続化される状態）
// ============================================================================

/// 予約ステータス
///
/// 状態遷移：
/// - Waiting が初期状態
/// - 承認操作で Approved または Rejected へ遷移する
/// - Waiting へ戻る遷移はない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// 所有者の承認待ち
    Waiting,
    /// 所有者が承認済み
    Approved,
    /// 所有者が却下済み
    Rejected,
}

impl BookingStatus {
    /// 承認フラグからステータスを決定する
    ///
    /// 現在のステータスは参照しない。確定済みの予約に対して再度呼ばれた
    /// 場合も上書きする（後勝ち）。
    pub fn decided(approved: bool) -> Self {
        if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        }
    }

    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "waiting",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(BookingStatus::Waiting),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// ============================================================================
// 予約フィルタ（クエリ時の分類、永続化されない）
// ============================================================================

/// 一覧取得のソート戦略
///
/// All/Waiting/Rejected 系は開始日時の降順、Current/Past/Future 系は
/// ID の昇順（= 作成順）。2系統のクエリが別々の順序を持つのは仕様であり、
/// 開始日時が重複・逆転するデータでは結果が一致しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOrdering {
    /// 開始日時の降順
    StartDesc,
    /// 予約IDの昇順
    IdAsc,
}

/// 予約フィルタ
///
/// 永続化されるステータスとは別の、クエリ時の分類。
/// 時間軸での分類（Current/Past/Future）とステータスでの分類
/// （Waiting/Rejected）が混在する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// 有効な state トークンの一覧（エラーメッセージ用）
    pub const LEGAL_VALUES: &'static str = "all, current, past, future, waiting, rejected";

    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "all",
            BookingState::Current => "current",
            BookingState::Past => "past",
            BookingState::Future => "future",
            BookingState::Waiting => "waiting",
            BookingState::Rejected => "rejected",
        }
    }

    /// 予約がこのフィルタに合致するか判定する
    ///
    /// - Current: `start <= now <= end`（両端を含む）
    /// - Past: `end < now`
    /// - Future: `start > now`
    /// - Waiting/Rejected: ステータスのみで判定、時間は見ない
    pub fn matches(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => start <= now && now <= end,
            BookingState::Past => end < now,
            BookingState::Future => start > now,
            BookingState::Waiting => status == BookingStatus::Waiting,
            BookingState::Rejected => status == BookingStatus::Rejected,
        }
    }

    /// このフィルタに対応するソート戦略を選択する
    pub fn ordering(&self) -> BookingOrdering {
        match self {
            BookingState::All | BookingState::Waiting | BookingState::Rejected => {
                BookingOrdering::StartDesc
            }
            BookingState::Current | BookingState::Past | BookingState::Future => {
                BookingOrdering::IdAsc
            }
        }
    }
}

impl std::str::FromStr for BookingState {
    type Err = String;

    /// 大文字小文字を区別せずにパースする
    ///
    /// 未知のトークンは有効値の一覧を含むエラーメッセージを返す。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(BookingState::All),
            "current" => Ok(BookingState::Current),
            "past" => Ok(BookingState::Past),
            "future" => Ok(BookingState::Future),
            "waiting" => Ok(BookingState::Waiting),
            "rejected" => Ok(BookingState::Rejected),
            _ => Err(format!(
                "Invalid state parameter: {}. Allowed values: {}",
                s,
                BookingState::LEGAL_VALUES
            )),
        }
    }
}

// ============================================================================
// 予約ビュー
// ============================================================================

/// アイテムの短縮ビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemShort {
    pub id: ItemId,
    pub name: String,
}

/// ユーザーの短縮ビュー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserShort {
    pub id: UserId,
}

/// 予約 - 1つのアイテムの1回の貸出予約
///
/// `item` と `booker` は作成後に変更されない。`start < end` は
/// 作成時のバリデーションで保証される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub booker: UserShort,
    pub item: ItemShort,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

// ============================================================================
// 純粋関数：ポリシー判定
// ============================================================================

/// 純粋関数：予約作成リクエストを検証する
///
/// ビジネスルール（この順で判定し、最初の違反を返す）：
/// - アイテムが貸出可能であること
/// - 予約者が所有者自身でないこと
/// - `start` が `end` より厳密に前であること（同時刻も拒否）
///
/// 同一アイテム・同一期間の既存予約との重複は検査しない。重複する予約は
/// どちらも成立する。
pub fn validate_booking_request(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    item_owner_id: UserId,
    item_available: bool,
    booker_id: UserId,
) -> Result<(), BookingRequestError> {
    if !item_available {
        return Err(BookingRequestError::ItemNotAvailable);
    }

    if item_owner_id == booker_id {
        return Err(BookingRequestError::BookerIsOwner);
    }

    if start > end {
        return Err(BookingRequestError::StartAfterEnd);
    }

    if start == end {
        return Err(BookingRequestError::StartEqualsEnd);
    }

    Ok(())
}

/// 純粋関数：予約の閲覧権限を判定する
///
/// 予約者本人またはアイテムの所有者のみ閲覧可能。
pub fn authorize_view(
    booker_id: UserId,
    item_owner_id: UserId,
    caller_id: UserId,
) -> Result<(), ViewAccessError> {
    if caller_id == booker_id || caller_id == item_owner_id {
        Ok(())
    } else {
        Err(ViewAccessError::RestrictedAccess)
    }
}

/// 純粋関数：予約の承認権限を判定する
///
/// アイテムの所有者のみ承認・却下が可能。
pub fn authorize_approval(
    item_owner_id: UserId,
    caller_id: UserId,
) -> Result<(), ApprovalAccessError> {
    if caller_id == item_owner_id {
        Ok(())
    } else {
        Err(ApprovalAccessError::NotItemOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn owner() -> UserId {
        UserId::from_i64(1)
    }

    fn booker() -> UserId {
        UserId::from_i64(2)
    }

    // TDD: validate_booking_request() のテスト
    #[test]
    fn test_validate_booking_request_success() {
        let now = Utc::now();
        let result = validate_booking_request(
            now + Duration::days(1),
            now + Duration::days(2),
            owner(),
            true,
            booker(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_booking_request_fails_when_item_not_available() {
        let now = Utc::now();
        let result = validate_booking_request(
            now + Duration::days(1),
            now + Duration::days(2),
            owner(),
            false,
            booker(),
        );
        assert_eq!(result.unwrap_err(), BookingRequestError::ItemNotAvailable);
    }

    #[test]
    fn test_validate_booking_request_fails_when_booker_is_owner() {
        let now = Utc::now();
        let result = validate_booking_request(
            now + Duration::days(1),
            now + Duration::days(2),
            owner(),
            true,
            owner(),
        );
        assert_eq!(result.unwrap_err(), BookingRequestError::BookerIsOwner);
    }

    #[test]
    fn test_validate_booking_request_fails_when_start_after_end() {
        let now = Utc::now();
        let result = validate_booking_request(
            now + Duration::days(5),
            now + Duration::days(1),
            owner(),
            true,
            booker(),
        );
        assert_eq!(result.unwrap_err(), BookingRequestError::StartAfterEnd);
    }

    #[test]
    fn test_validate_booking_request_fails_when_start_equals_end() {
        let at = Utc::now() + Duration::days(1);
        let result = validate_booking_request(at, at, owner(), true, booker());
        assert_eq!(result.unwrap_err(), BookingRequestError::StartEqualsEnd);
    }

    #[test]
    fn test_validate_booking_request_availability_checked_before_dates() {
        // 日付も不正だが、アイテム利用可否の違反が先に報告される
        let now = Utc::now();
        let result = validate_booking_request(
            now + Duration::days(5),
            now + Duration::days(1),
            owner(),
            false,
            booker(),
        );
        assert_eq!(result.unwrap_err(), BookingRequestError::ItemNotAvailable);
    }

    // TDD: authorize_view() のテスト
    #[test]
    fn test_authorize_view_allows_booker() {
        assert!(authorize_view(booker(), owner(), booker()).is_ok());
    }

    #[test]
    fn test_authorize_view_allows_owner() {
        assert!(authorize_view(booker(), owner(), owner()).is_ok());
    }

    #[test]
    fn test_authorize_view_rejects_third_party() {
        let third = UserId::from_i64(99);
        assert_eq!(
            authorize_view(booker(), owner(), third).unwrap_err(),
            ViewAccessError::RestrictedAccess
        );
    }

    // TDD: authorize_approval() のテスト
    #[test]
    fn test_authorize_approval_allows_owner() {
        assert!(authorize_approval(owner(), owner()).is_ok());
    }

    #[test]
    fn test_authorize_approval_rejects_booker() {
        assert_eq!(
            authorize_approval(owner(), booker()).unwrap_err(),
            ApprovalAccessError::NotItemOwner
        );
    }

    // TDD: BookingStatus のテスト
    #[test]
    fn test_status_decided() {
        assert_eq!(BookingStatus::decided(true), BookingStatus::Approved);
        assert_eq!(BookingStatus::decided(false), BookingStatus::Rejected);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        assert!("pending".parse::<BookingStatus>().is_err());
    }

    // TDD: BookingState のテスト
    #[test]
    fn test_state_from_str_is_case_insensitive() {
        assert_eq!("FUTURE".parse::<BookingState>().unwrap(), BookingState::Future);
        assert_eq!("Waiting".parse::<BookingState>().unwrap(), BookingState::Waiting);
        assert_eq!("all".parse::<BookingState>().unwrap(), BookingState::All);
    }

    #[test]
    fn test_state_from_str_lists_legal_values_on_error() {
        let err = "yesterday".parse::<BookingState>().unwrap_err();
        assert!(err.contains("yesterday"));
        assert!(err.contains(BookingState::LEGAL_VALUES));
    }

    #[test]
    fn test_state_matches_current_is_inclusive() {
        let now = Utc::now();
        let start = now - Duration::hours(1);
        let end = now + Duration::hours(1);

        assert!(BookingState::Current.matches(start, end, BookingStatus::Waiting, now));
        // 境界もCurrentに含まれる
        assert!(BookingState::Current.matches(now, end, BookingStatus::Waiting, now));
        assert!(BookingState::Current.matches(start, now, BookingStatus::Waiting, now));
    }

    #[test]
    fn test_state_matches_past_and_future_are_strict() {
        let now = Utc::now();
        let start = now - Duration::hours(2);
        let end = now - Duration::hours(1);

        assert!(BookingState::Past.matches(start, end, BookingStatus::Approved, now));
        assert!(!BookingState::Past.matches(start, now, BookingStatus::Approved, now));

        let start = now + Duration::hours(1);
        let end = now + Duration::hours(2);
        assert!(BookingState::Future.matches(start, end, BookingStatus::Waiting, now));
        assert!(!BookingState::Future.matches(now, end, BookingStatus::Waiting, now));
    }

    #[test]
    fn test_state_matches_status_filters_ignore_time() {
        let now = Utc::now();
        let start = now - Duration::days(10);
        let end = now - Duration::days(5);

        assert!(BookingState::Waiting.matches(start, end, BookingStatus::Waiting, now));
        assert!(!BookingState::Waiting.matches(start, end, BookingStatus::Approved, now));
        assert!(BookingState::Rejected.matches(start, end, BookingStatus::Rejected, now));
        assert!(!BookingState::Rejected.matches(start, end, BookingStatus::Waiting, now));
    }

    #[test]
    fn test_state_time_partition_is_exhaustive_and_disjoint() {
        // 任意の予約は Current/Past/Future のちょうど1つに分類される
        let now = Utc::now();
        let cases = [
            (now - Duration::days(2), now - Duration::days(1)),
            (now - Duration::days(1), now + Duration::days(1)),
            (now + Duration::days(1), now + Duration::days(2)),
            (now, now + Duration::days(1)),
            (now - Duration::days(1), now),
        ];

        for (start, end) in cases {
            let matched = [BookingState::Current, BookingState::Past, BookingState::Future]
                .iter()
                .filter(|s| s.matches(start, end, BookingStatus::Waiting, now))
                .count();
            assert_eq!(matched, 1, "start={:?} end={:?}", start, end);
        }
    }

    #[test]
    fn test_state_ordering_selection() {
        assert_eq!(BookingState::All.ordering(), BookingOrdering::StartDesc);
        assert_eq!(BookingState::Waiting.ordering(), BookingOrdering::StartDesc);
        assert_eq!(BookingState::Rejected.ordering(), BookingOrdering::StartDesc);
        assert_eq!(BookingState::Current.ordering(), BookingOrdering::IdAsc);
        assert_eq!(BookingState::Past.ordering(), BookingOrdering::IdAsc);
        assert_eq!(BookingState::Future.ordering(), BookingOrdering::IdAsc);
    }
}
