use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, LOGIN_SUCCESS},
        services::LoginOutcome,
    },
    error::{AppError, AppResult},
    state::AppState,
    users::repo_types::{PublicUser, UserInput},
    validation::ValidatedJson,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserInput>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = state.users.create_user(payload).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    match state.auth.login(&payload.email, payload.password).await? {
        LoginOutcome::Success(user) => {
            info!(user_id = user.id, email = %user.email, "user logged in");
            Ok(Json(LoginResponse {
                message: LOGIN_SUCCESS.into(),
                user: user.into(),
            }))
        }
        LoginOutcome::UserNotFound => Err(AppError::NotFound("User not found")),
        LoginOutcome::InvalidPassword => Err(AppError::Unauthorized("Invalid password")),
    }
}
