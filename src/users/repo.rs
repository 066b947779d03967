use axum::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::users::repo_types::{User, UserChanges};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Record to {action} does not exist: no user with id {id}")]
    RecordNotFound { action: &'static str, id: i64 },

    #[error("Unique constraint failed on the field: `email`")]
    UniqueEmail,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence backend for the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_many(&self) -> StoreResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn create(&self, changes: &UserChanges) -> StoreResult<User>;
    /// Fails with [`StoreError::RecordNotFound`] when `id` is absent.
    async fn update(&self, id: i32, changes: &UserChanges) -> StoreResult<User>;
    /// Fails with [`StoreError::RecordNotFound`] when `id` is absent.
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_many(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, changes: &UserChanges) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, password, created_at
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, email = $3, password = $4
            WHERE id = $5
            RETURNING id, first_name, last_name, email, password, created_at
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::RecordNotFound {
            action: "update",
            id: id.into(),
        })
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let done = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound {
                action: "delete",
                id: id.into(),
            });
        }
        Ok(())
    }
}
