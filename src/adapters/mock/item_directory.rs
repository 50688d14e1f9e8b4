use crate::domain::value_objects::ItemId;
use crate::ports::item_directory::{ItemDirectory as ItemDirectoryTrait, ItemSummary, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of ItemDirectory
///
/// Supports stateful testing by storing item summaries.
/// Items can be registered with any owner and availability flag.
#[allow(dead_code)]
pub struct ItemDirectory {
    items: Mutex<HashMap<ItemId, ItemSummary>>,
}

#[allow(dead_code)]
impl ItemDirectory {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Register an item for testing purposes
    pub fn add_item(&self, item: ItemSummary) {
        self.items.lock().unwrap().insert(item.id, item);
    }

    /// Flip the availability flag of a registered item
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&item_id) {
            item.is_available = available;
        }
    }
}

impl Default for ItemDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemDirectoryTrait for ItemDirectory {
    /// Look up the item among the registered items
    async fn resolve(&self, item_id: ItemId) -> Result<Option<ItemSummary>> {
        Ok(self.items.lock().unwrap().get(&item_id).cloned())
    }
}
