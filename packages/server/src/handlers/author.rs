use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

use crate::cascade;
use crate::entity::author;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::author::*;
use crate::models::shared::{DeleteResponse, Payload};
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    get,
    path = "/",
    tag = "Authors",
    operation_id = "listAuthors",
    summary = "List all authors",
    description = "Returns every author with the ids of their blogs.",
    responses(
        (status = 200, description = "List of authors", body = Vec<AuthorResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorResponse>>, AppError> {
    let authors = store::author::list(&state.db).await?;
    let mut blogs = store::author::blog_index(&state.db).await?;

    let data = authors
        .into_iter()
        .map(|a| {
            let ids = blogs.remove(&a.id).unwrap_or_default();
            AuthorResponse::new(a, ids)
        })
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Authors",
    operation_id = "getAuthor",
    summary = "Get an author by ID",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_author(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<AuthorResponse>, AppError> {
    let model = find_author(&state.db, id).await?;
    let blogs = store::author::blog_ids(&state.db, id).await?;
    Ok(Json(AuthorResponse::new(model, blogs)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Authors",
    operation_id = "createAuthor",
    summary = "Create a new author",
    description = "Creates an author. `id` and `blogs` in the body are ignored.",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_author(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Payload>,
) -> Result<impl IntoResponse, AppError> {
    let req = validate_create_author(payload)?;

    let model = store::author::create(&state.db, req)
        .await
        .map_err(AppError::persistence)?;
    tracing::info!(author_id = %model.id, "Author created");

    Ok((StatusCode::CREATED, Json(AuthorResponse::new(model, Vec::new()))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Authors",
    operation_id = "updateAuthor",
    summary = "Update an existing author",
    description = "Partially updates an author using PATCH semantics. `id` and `blogs` in the body are ignored. An empty payload returns the current resource unchanged.",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_author(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<Payload>,
) -> Result<Json<AuthorResponse>, AppError> {
    let txn = state.db.begin().await.map_err(AppError::persistence)?;

    let existing = find_author(&txn, id).await?;
    let req = validate_update_author(payload)?;

    let model = if req == UpdateAuthorRequest::default() {
        existing
    } else {
        store::author::update(&txn, existing, req)
            .await
            .map_err(AppError::persistence)?
    };
    let blogs = store::author::blog_ids(&txn, id)
        .await
        .map_err(AppError::persistence)?;
    txn.commit().await.map_err(AppError::persistence)?;

    Ok(Json(AuthorResponse::new(model, blogs)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Authors",
    operation_id = "deleteAuthor",
    summary = "Delete an author by ID",
    description = "Deletes the author, every blog they wrote, and every comment on those blogs.",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Cascade failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_author(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let txn = state.db.begin().await?;

    let author = find_author(&txn, id).await?;
    cascade::delete_author(&txn, author).await?;

    txn.commit().await?;
    Ok(Json(DeleteResponse::new("Author has been deleted")))
}

async fn find_author<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<author::Model, AppError> {
    store::author::find(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cannot find the author".into()))
}
