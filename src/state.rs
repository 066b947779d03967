use std::sync::Arc;

use crate::{
    auth::services::Authenticator,
    config::AppConfig,
    db,
    users::{memory::InMemoryUserStore, repo::PgUserStore, repo::UserStore, services::UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub auth: Arc<Authenticator>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn UserStore> = match config.database_url.as_deref() {
            Some(url) => {
                let pool = db::connect(&config, url).await?;
                db::migrate(&pool).await;
                Arc::new(PgUserStore::new(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; users are kept in memory only");
                Arc::new(InMemoryUserStore::new())
            }
        };
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        let users = Arc::new(UserService::new(store));
        let auth = Arc::new(Authenticator::new(users.clone()));
        Self {
            users,
            auth,
            config,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(AppConfig::default()),
        )
    }
}
