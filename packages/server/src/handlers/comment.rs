use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

use crate::cascade;
use crate::entity::comment;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::comment::*;
use crate::models::shared::{DeleteResponse, Payload};
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    get,
    path = "/",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List all comments",
    responses(
        (status = 200, description = "List of comments", body = Vec<CommentResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = store::comment::list(&state.db).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Comments",
    operation_id = "getComment",
    summary = "Get a comment by ID",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment details", body = CommentResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<CommentResponse>, AppError> {
    let model = find_comment(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Create a new comment",
    description = "Creates a comment on an existing blog by an existing user; the new id shows up in both the blog's and the user's `comments`. `id` in the body is ignored.",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog or user not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Payload>,
) -> Result<impl IntoResponse, AppError> {
    let req = validate_create_comment(payload)?;

    let txn = state.db.begin().await.map_err(AppError::persistence)?;

    store::blog::find(&txn, req.blog)
        .await
        .map_err(AppError::persistence)?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;
    store::user::find(&txn, req.user)
        .await
        .map_err(AppError::persistence)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let model = store::comment::create(&txn, req)
        .await
        .map_err(AppError::persistence)?;
    txn.commit().await.map_err(AppError::persistence)?;
    tracing::info!(
        comment_id = %model.id,
        blog_id = %model.blog_id,
        user_id = %model.user_id,
        "Comment created"
    );

    Ok((StatusCode::CREATED, Json(CommentResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Comments",
    operation_id = "updateComment",
    summary = "Update an existing comment",
    description = "Updates the content of a comment. `id`, `blog` and `user` in the body are ignored. An empty payload returns the current resource unchanged.",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<Payload>,
) -> Result<Json<CommentResponse>, AppError> {
    let txn = state.db.begin().await.map_err(AppError::persistence)?;

    let existing = find_comment(&txn, id).await?;
    let req = validate_update_comment(payload)?;

    let model = if req == UpdateCommentRequest::default() {
        existing
    } else {
        store::comment::update(&txn, existing, req)
            .await
            .map_err(AppError::persistence)?
    };
    txn.commit().await.map_err(AppError::persistence)?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment by ID",
    description = "Deletes the comment; it leaves its blog's and its user's `comments` lists.",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let txn = state.db.begin().await?;

    let comment = find_comment(&txn, id).await?;
    cascade::delete_comment(&txn, comment).await?;

    txn.commit().await?;
    Ok(Json(DeleteResponse::new("The comment has been deleted.")))
}

async fn find_comment<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<comment::Model, AppError> {
    store::comment::find(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cannot find comment".into()))
}
