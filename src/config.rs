use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL; without one the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 10,
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(v) => v.parse::<u32>().context("DB_MAX_CONNECTIONS must be a number")?,
            Err(_) => defaults.db_max_connections,
        };
        let host = std::env::var("APP_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => defaults.port,
        };
        Ok(Self {
            database_url,
            db_max_connections,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
