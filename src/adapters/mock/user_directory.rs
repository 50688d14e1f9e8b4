use crate::domain::value_objects::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserSummary};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock implementation of UserDirectory
///
/// Supports stateful testing by storing user IDs.
#[allow(dead_code)]
pub struct UserDirectory {
    existing_users: Mutex<HashSet<UserId>>,
}

#[allow(dead_code)]
impl UserDirectory {
    pub fn new() -> Self {
        Self {
            existing_users: Mutex::new(HashSet::new()),
        }
    }

    /// Register a user for testing purposes
    pub fn add_user(&self, user_id: UserId) {
        self.existing_users.lock().unwrap().insert(user_id);
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    /// Check if the user is among the registered users
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        Ok(self.existing_users.lock().unwrap().contains(&user_id))
    }

    /// Resolve a registered user with a fixed display name
    async fn resolve(&self, user_id: UserId) -> Result<Option<UserSummary>> {
        let users = self.existing_users.lock().unwrap();
        Ok(users.contains(&user_id).then(|| UserSummary {
            id: user_id,
            name: "Mock User".to_string(),
        }))
    }
}
