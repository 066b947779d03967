//! User management REST API: CRUD over users plus email/password login.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod users;
pub mod validation;

pub use app::build_app;
pub use error::{AppError, AppResult};
pub use state::AppState;
