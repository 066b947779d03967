use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    auth::password::hash_password_blocking,
    error::AppResult,
    users::{
        repo::{StoreError, UserStore},
        repo_types::{User, UserChanges, UserInput},
    },
};

/// CRUD over the user table. Passwords are hashed here, once per write.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        Ok(self.store.find_many().await?)
    }

    /// Absence is `Ok(None)`, not an error. Ids outside the column's range
    /// cannot exist, so they are absent too.
    pub async fn get_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let Ok(id) = i32::try_from(id) else {
            return Ok(None);
        };
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.store.find_by_email(email).await?)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: UserInput) -> AppResult<User> {
        let changes = hashed(input).await?;
        let user = self.store.create(&changes).await?;
        debug!(user_id = user.id, "user row inserted");
        Ok(user)
    }

    /// Full replace of the mutable fields; the password is always rehashed.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn update_user(&self, input: UserInput, id: i64) -> AppResult<User> {
        let id = stored_id(id, "update")?;
        let changes = hashed(input).await?;
        Ok(self.store.update(id, &changes).await?)
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        let id = stored_id(id, "delete")?;
        Ok(self.store.delete(id).await?)
    }
}

/// Narrows a request id to the column type; an id that cannot be stored is a missing record.
fn stored_id(id: i64, action: &'static str) -> Result<i32, StoreError> {
    i32::try_from(id).map_err(|_| StoreError::RecordNotFound { action, id })
}

async fn hashed(input: UserInput) -> AppResult<UserChanges> {
    let UserInput {
        first_name,
        last_name,
        email,
        password,
    } = input;
    Ok(UserChanges {
        first_name,
        last_name,
        email,
        password_hash: hash_password_blocking(password).await?,
    })
}
