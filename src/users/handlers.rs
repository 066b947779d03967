use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    users::{
        dto::MessageResponse,
        repo_types::{PublicUser, UserInput},
    },
    validation::{UserId, ValidatedJson},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<PublicUser>>> {
    let users = state.users.get_all_users().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<PublicUser>> {
    state
        .users
        .get_user_by_id(id)
        .await?
        .map(|u| Json(u.into()))
        .ok_or(AppError::NotFound("User not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserInput>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = state.users.create_user(payload).await?;
    info!(user_id = user.id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UserInput>,
) -> AppResult<Json<PublicUser>> {
    let user = state.users.update_user(payload, id).await?;
    info!(user_id = user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<MessageResponse>> {
    state.users.delete_user(id).await?;
    info!(user_id = id, "user deleted");
    Ok(Json(MessageResponse::deleted(id)))
}
