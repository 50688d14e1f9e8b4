use crate::domain::value_objects::UserId;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーの要約ビュー
///
/// 予約コンテキストが必要とする最小限のユーザー情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザーコンテキストの境界を維持する。
/// 予約コンテキストはUserIDと要約ビューのみを知り、ユーザー詳細は知らない。
#[allow(dead_code)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// ユーザーが存在するか確認する
    ///
    /// 一覧取得・承認前のユーザーバリデーションに使用される。
    async fn exists(&self, user_id: UserId) -> Result<bool>;

    /// ユーザーIDを解決する
    ///
    /// 存在しない場合は `None` を返す。予約作成時に予約者を解決する
    /// ために使用される。
    async fn resolve(&self, user_id: UserId) -> Result<Option<UserSummary>>;
}
