use crate::domain::booking::{BookingState, BookingStatus};
use crate::domain::value_objects::{BookingId, ItemId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 永続化される予約レコード
///
/// アイテムの短縮ビュー（名前・所有者）は作成時点のスナップショットとして
/// 非正規化して保持する。所有者スコープのクエリと閲覧権限の判定が
/// ディレクトリへの問い合わせなしで完結する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub id: BookingId,
    pub item_id: ItemId,
    pub item_name: String,
    pub item_owner_id: UserId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// 新規予約（ID未採番）
///
/// IDはストアが採番する。シーケンス採番のため、ID昇順 = 作成順。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub item_id: ItemId,
    pub item_name: String,
    pub item_owner_id: UserId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// 予約ストアポート
///
/// `now` は呼び出し側から明示的に渡す。時間軸での分類
/// （Current/Past/Future）が決定的になり、テスト可能になる。
#[allow(dead_code)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 新規予約を保存し、採番済みのレコードを返す
    async fn save(&self, booking: NewBooking) -> Result<BookingRecord>;

    /// 予約のステータスを更新する
    ///
    /// 予約が存在しない場合は `None` を返す。現在のステータスに対する
    /// ガードは行わない（確定済みの予約も上書きされる、後勝ち）。
    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingRecord>>;

    /// 予約者の予約をフィルタ付きで検索する
    ///
    /// ソート順はフィルタごとのソート戦略（`BookingState::ordering`）に従う。
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>>;

    /// アイテム所有者の予約をフィルタ付きで検索する
    ///
    /// 所有者のすべてのアイテムに対する予約が対象。ソート順は
    /// `find_by_booker` と同じ戦略に従う。
    async fn find_by_owner(
        &self,
        owner_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>>;
}
