use std::collections::BTreeMap;

use axum::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::users::{
    repo::{StoreError, StoreResult, UserStore},
    repo_types::{User, UserChanges},
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, User>,
    last_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Process-local backend. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryUserStore {
    table: RwLock<Table>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_many(&self) -> StoreResult<Vec<User>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, changes: &UserChanges) -> StoreResult<User> {
        let mut table = self.table.write().await;
        if table.email_taken(&changes.email, None) {
            return Err(StoreError::UniqueEmail);
        }
        table.last_id += 1;
        let user = User {
            id: table.last_id,
            first_name: changes.first_name.clone(),
            last_name: changes.last_name.clone(),
            email: changes.email.clone(),
            password: changes.password_hash.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> StoreResult<User> {
        let mut table = self.table.write().await;
        let taken = table.email_taken(&changes.email, Some(id));
        let row = table.rows.get_mut(&id).ok_or(StoreError::RecordNotFound {
            action: "update",
            id: id.into(),
        })?;
        if taken {
            return Err(StoreError::UniqueEmail);
        }
        row.first_name = changes.first_name.clone();
        row.last_name = changes.last_name.clone();
        row.email = changes.email.clone();
        row.password = changes.password_hash.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::RecordNotFound {
                action: "delete",
                id: id.into(),
            })
    }
}
