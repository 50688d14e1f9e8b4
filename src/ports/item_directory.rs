use crate::domain::value_objects::{ItemId, UserId};
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムの要約ビュー
///
/// 予約コンテキストが必要とする最小限のアイテム情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    pub owner_id: UserId,
    pub is_available: bool,
}

/// アイテムディレクトリポート
///
/// 予約コンテキストとアイテムコンテキストの境界を維持する。
/// 予約コンテキストは要約ビューのみを知り、アイテムの詳細は知らない。
#[allow(dead_code)]
#[async_trait]
pub trait ItemDirectory: Send + Sync {
    /// アイテムIDを解決する
    ///
    /// 存在しない場合は `None` を返す。予約作成時のバリデーションと
    /// 承認時の所有者チェックに使用される。
    async fn resolve(&self, item_id: ItemId) -> Result<Option<ItemSummary>>;
}
