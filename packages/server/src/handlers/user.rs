use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

use crate::cascade;
use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::shared::{DeleteResponse, Payload};
use crate::models::user::*;
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    description = "Returns every user with the ids of their comments.",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = store::user::list(&state.db).await?;
    let mut comments = store::user::comment_index(&state.db).await?;

    let data = users
        .into_iter()
        .map(|u| {
            let ids = comments.remove(&u.id).unwrap_or_default();
            UserResponse::new(u, ids)
        })
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by ID",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let model = find_user(&state.db, id).await?;
    let comments = store::user::comment_ids(&state.db, id).await?;
    Ok(Json(UserResponse::new(model, comments)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a new user",
    description = "Creates a user. `id` and `comments` in the body are ignored.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Payload>,
) -> Result<impl IntoResponse, AppError> {
    let req = validate_create_user(payload)?;

    let model = store::user::create(&state.db, req)
        .await
        .map_err(AppError::persistence)?;
    tracing::info!(user_id = %model.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::new(model, Vec::new()))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    operation_id = "updateUser",
    summary = "Update an existing user",
    description = "Partially updates a user using PATCH semantics. `id` and `comments` in the body are ignored. An empty payload returns the current resource unchanged.",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<Payload>,
) -> Result<Json<UserResponse>, AppError> {
    let txn = state.db.begin().await.map_err(AppError::persistence)?;

    let existing = find_user(&txn, id).await?;
    let req = validate_update_user(payload)?;

    let model = if req == UpdateUserRequest::default() {
        existing
    } else {
        store::user::update(&txn, existing, req)
            .await
            .map_err(AppError::persistence)?
    };
    let comments = store::user::comment_ids(&txn, id)
        .await
        .map_err(AppError::persistence)?;
    txn.commit().await.map_err(AppError::persistence)?;

    Ok(Json(UserResponse::new(model, comments)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete a user by ID",
    description = "Deletes the user and every comment they wrote; those comments leave their blogs' `comments` lists.",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Cascade failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let txn = state.db.begin().await?;

    let user = find_user(&txn, id).await?;
    cascade::delete_user(&txn, user).await?;

    txn.commit().await?;
    Ok(Json(DeleteResponse::new("User has been deleted")))
}

async fn find_user<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<user::Model, AppError> {
    store::user::find(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cannot find the user".into()))
}
