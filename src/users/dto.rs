use serde::{Deserialize, Serialize};

use crate::{users::repo_types::UserInput, validation::TextFields};

impl TextFields for UserInput {
    const FIELDS: &'static [&'static str] = &["firstName", "lastName", "email", "password"];
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(id: i64) -> Self {
        Self {
            message: format!("User with ID: {id} is successfully deleted"),
        }
    }
}
