#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// 予約ID - 予約管理コンテキストの集約ID
///
/// ストア側のシーケンスで採番される。昇順 = 作成順。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// アイテムID - アイテム管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(i64);

impl ItemId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_from_i64() {
        let id = BookingId::from_i64(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_booking_id_orders_by_value() {
        let first = BookingId::from_i64(1);
        let second = BookingId::from_i64(2);
        assert!(first < second);
    }

    #[test]
    fn test_item_id_equality() {
        assert_eq!(ItemId::from_i64(7), ItemId::from_i64(7));
        assert_ne!(ItemId::from_i64(7), ItemId::from_i64(8));
    }

    #[test]
    fn test_user_id_equality() {
        assert_eq!(UserId::from_i64(3), UserId::from_i64(3));
        assert_ne!(UserId::from_i64(3), UserId::from_i64(4));
    }
}
