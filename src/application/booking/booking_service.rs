use crate::domain::{
    self,
    booking::{Booking, BookingState, BookingStatus, ItemShort, UserShort},
    commands::{ApproveBooking, CreateBooking},
    value_objects::{BookingId, UserId},
};
use crate::ports::*;
use chrono::Utc;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
///
/// ストアとディレクトリはトレイト越しに注入されるため、インメモリの
/// フェイクと永続ストアのどちらに対しても同じコードで動作する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub item_directory: Arc<dyn ItemDirectory>,
    pub user_directory: Arc<dyn UserDirectory>,
}

/// 予約レコードからクライアント向けビューを構築するヘルパー関数
///
/// アイテムと予約者は短縮ビュー（ItemShort/UserShort）に落とす。
fn build_booking_view(record: BookingRecord) -> Booking {
    Booking {
        id: record.id,
        booker: UserShort {
            id: record.booker_id,
        },
        item: ItemShort {
            id: record.item_id,
            name: record.item_name,
        },
        start: record.start,
        end: record.end,
        status: record.status,
    }
}

/// ユーザーの存在確認ヘルパー関数
///
/// 一覧系の操作で共通利用される。存在しない場合は
/// `UserNotFound`（NotFound種別）を返す。
async fn ensure_user_exists(deps: &ServiceDependencies, user_id: UserId) -> Result<()> {
    let exists = deps
        .user_directory
        .exists(user_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?;

    if !exists {
        return Err(BookingApplicationError::UserNotFound);
    }

    Ok(())
}

/// 予約を作成する（純粋な関数）
///
/// ビジネスルール：
/// - 予約者が存在すること
/// - アイテムが存在し、貸出可能であること
/// - 予約者がアイテムの所有者でないこと
/// - `start` が `end` より厳密に前であること（同時刻も拒否）
///
/// すべての依存が引数として明示的に渡される（関数型の原則）。
///
/// 成功時は Waiting 状態の予約が1件永続化される。途中で失敗した場合は
/// 何も永続化されない（部分適用なし）。
///
/// 同一アイテム・同一期間の既存予約との重複は検査しない。同時に呼ばれた
/// 場合も両方成立する（直列化なし、ストアの書き込み順がそのまま残る）。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 予約作成コマンド
///
/// # 戻り値
/// 作成された予約のビュー
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<Booking> {
    // 1. 予約者の解決
    let booker = deps
        .user_directory
        .resolve(cmd.booker_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?
        .ok_or(BookingApplicationError::UserNotFound)?;

    // 2. アイテムの解決
    let item = deps
        .item_directory
        .resolve(cmd.item_id)
        .await
        .map_err(BookingApplicationError::ItemDirectoryError)?
        .ok_or(BookingApplicationError::ItemNotFound)?;

    // 3. ドメイン層の純粋関数でポリシー判定
    domain::booking::validate_booking_request(
        cmd.start,
        cmd.end,
        item.owner_id,
        item.is_available,
        booker.id,
    )?;

    // 4. Waiting状態で保存（IDはストアが採番）
    let record = deps
        .booking_store
        .save(NewBooking {
            item_id: item.id,
            item_name: item.name,
            item_owner_id: item.owner_id,
            booker_id: booker.id,
            start: cmd.start,
            end: cmd.end,
            status: BookingStatus::Waiting,
        })
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(build_booking_view(record))
}

/// 予約を承認または却下する（純粋な関数）
///
/// ビジネスルール：
/// - 呼び出し元ユーザーが存在すること（違反は NotFound ではなく
///   Validation として報告される。この経路だけ種別が異なる）
/// - 予約が存在すること
/// - 呼び出し元がアイテムの現在の所有者であること
///
/// 現在のステータスに対するガードはない。Waiting でない予約に対して
/// 呼ばれた場合もステータスを上書きする（後勝ち）。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 承認コマンド
///
/// # 戻り値
/// 更新後の予約のビュー
pub async fn approve_booking(deps: &ServiceDependencies, cmd: ApproveBooking) -> Result<Booking> {
    // 1. 呼び出し元の存在確認（不在は Validation 種別に落とす）
    let caller_exists = deps
        .user_directory
        .exists(cmd.caller_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?;

    if !caller_exists {
        return Err(BookingApplicationError::CallerNotFound);
    }

    // 2. 予約の解決
    let record = deps
        .booking_store
        .get_by_id(cmd.booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::BookingNotFound)?;

    // 3. アイテムを再解決し、現在の所有者に対して権限判定
    let item = deps
        .item_directory
        .resolve(record.item_id)
        .await
        .map_err(BookingApplicationError::ItemDirectoryError)?
        .ok_or(BookingApplicationError::ItemNotFound)?;

    domain::booking::authorize_approval(item.owner_id, cmd.caller_id)?;

    // 4. ステータスを確定して保存
    let status = BookingStatus::decided(cmd.approved);
    let updated = deps
        .booking_store
        .update_status(cmd.booking_id, status)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::BookingNotFound)?;

    Ok(build_booking_view(updated))
}

/// 予約をIDで取得する（純粋な関数）
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 呼び出し元が予約者本人またはアイテムの所有者であること
///
/// 所有者の判定にはレコードに保持した作成時点のスナップショットを使う。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `booking_id` - 予約ID
/// * `caller_id` - 呼び出し元ユーザーID
pub async fn get_booking_by_id(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    caller_id: UserId,
) -> Result<Booking> {
    let record = deps
        .booking_store
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::BookingNotFound)?;

    domain::booking::authorize_view(record.booker_id, record.item_owner_id, caller_id)?;

    Ok(build_booking_view(record))
}

/// 予約者の予約一覧をフィルタ付きで取得する（純粋な関数）
///
/// ビジネスルール：
/// - ユーザーが存在すること
///
/// `now` は1回の呼び出しにつき1度だけ取得し、フィルタ判定全体で
/// 同じ時刻を使う。ソート順はフィルタごとのソート戦略に従う。
pub async fn get_bookings_by_booker(
    deps: &ServiceDependencies,
    user_id: UserId,
    state: BookingState,
) -> Result<Vec<Booking>> {
    ensure_user_exists(deps, user_id).await?;

    let records = deps
        .booking_store
        .find_by_booker(user_id, state, Utc::now())
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(records.into_iter().map(build_booking_view).collect())
}

/// アイテム所有者の予約一覧をフィルタ付きで取得する（純粋な関数）
///
/// ビジネスルール：
/// - ユーザーが存在すること
///
/// 所有者のすべてのアイテムに対する予約が対象。
pub async fn get_bookings_by_owner(
    deps: &ServiceDependencies,
    user_id: UserId,
    state: BookingState,
) -> Result<Vec<Booking>> {
    ensure_user_exists(deps, user_id).await?;

    let records = deps
        .booking_store
        .find_by_owner(user_id, state, Utc::now())
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(records.into_iter().map(build_booking_view).collect())
}
