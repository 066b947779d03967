use serde::{Deserialize, Serialize};

use crate::{users::repo_types::PublicUser, validation::TextFields};

pub const LOGIN_SUCCESS: &str = "Login Successfull";

/// Request body for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TextFields for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password"];
}

/// Response returned after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}
