use crate::domain::booking::{BookingOrdering, BookingState, BookingStatus};
use crate::domain::value_objects::{BookingId, ItemId, UserId};
use crate::ports::booking_store::{
    BookingRecord, BookingStore as BookingStoreTrait, NewBooking, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// 取得カラムの一覧（全クエリで共通）
const BOOKING_COLUMNS: &str =
    "id, item_id, item_name, item_owner_id, booker_id, start_date, end_date, status";

/// PostgreSQLの行データをBookingRecordに変換する
///
/// status の文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking_record(row: &PgRow) -> Result<BookingRecord> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(BookingRecord {
        id: BookingId::from_i64(row.get("id")),
        item_id: ItemId::from_i64(row.get("item_id")),
        item_name: row.get("item_name"),
        item_owner_id: UserId::from_i64(row.get("item_owner_id")),
        booker_id: UserId::from_i64(row.get("booker_id")),
        start: row.get("start_date"),
        end: row.get("end_date"),
        status,
    })
}

/// フィルタごとのSELECT文を組み立てる
///
/// 戻り値の bool は `$2` に now をバインドする必要があるかどうか。
/// ORDER BY はフィルタのソート戦略に従って2系統に分かれる。
fn select_sql(scope_column: &str, state: BookingState) -> (String, bool) {
    let (predicate, uses_now) = match state {
        BookingState::All => ("", false),
        BookingState::Current => (" AND $2 BETWEEN start_date AND end_date", true),
        BookingState::Past => (" AND end_date < $2", true),
        BookingState::Future => (" AND start_date > $2", true),
        BookingState::Waiting => (" AND status = 'waiting'", false),
        BookingState::Rejected => (" AND status = 'rejected'", false),
    };

    let order_by = match state.ordering() {
        BookingOrdering::StartDesc => "start_date DESC",
        BookingOrdering::IdAsc => "id ASC",
    };

    (
        format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE {scope_column} = $1{predicate} ORDER BY {order_by}"
        ),
        uses_now,
    )
}

/// BookingStoreのPostgreSQL実装
///
/// 予約はアイテムの短縮ビュー込みで非正規化して1テーブルに保存する。
/// IDは BIGSERIAL で採番されるため、昇順 = 作成順。
#[allow(dead_code)]
pub struct BookingStore {
    pool: PgPool,
}

#[allow(dead_code)]
impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_for(
        &self,
        scope_column: &str,
        user_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>> {
        let (sql, uses_now) = select_sql(scope_column, state);

        let mut query = sqlx::query(&sql).bind(user_id.value());
        if uses_now {
            query = query.bind(now);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(map_row_to_booking_record).collect()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 予約を保存し、採番済みのレコードを返す
    async fn save(&self, booking: NewBooking) -> Result<BookingRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (
                item_id,
                item_name,
                item_owner_id,
                booker_id,
                start_date,
                end_date,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, item_id, item_name, item_owner_id, booker_id, start_date, end_date, status
            "#,
        )
        .bind(booking.item_id.value())
        .bind(&booking.item_name)
        .bind(booking.item_owner_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_booking_record(&row)
    }

    /// ステータスを上書きする（現在のステータスに対するガードなし）
    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let row = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE id = $1
            RETURNING id, item_id, item_name, item_owner_id, booker_id, start_date, end_date, status
            "#,
        )
        .bind(booking_id.value())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking_record).transpose()
    }

    /// IDで予約を取得
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, item_id, item_name, item_owner_id, booker_id, start_date, end_date, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking_record).transpose()
    }

    /// 予約者の予約をフィルタ付きで検索
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>> {
        self.find_for("booker_id", booker_id, state, now).await
    }

    /// アイテム所有者の予約をフィルタ付きで検索
    async fn find_by_owner(
        &self,
        owner_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>> {
        self.find_for("item_owner_id", owner_id, state, now).await
    }
}
