use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

use crate::cascade;
use crate::entity::blog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::blog::*;
use crate::models::shared::{DeleteResponse, Payload};
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    description = "Returns every blog with its author id and the ids of its comments.",
    responses(
        (status = 200, description = "List of blogs", body = Vec<BlogResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = store::blog::list(&state.db).await?;
    let mut comments = store::blog::comment_index(&state.db).await?;

    let data = blogs
        .into_iter()
        .map(|b| {
            let ids = comments.remove(&b.id).unwrap_or_default();
            BlogResponse::new(b, ids)
        })
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog by ID",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<BlogResponse>, AppError> {
    let model = find_blog(&state.db, id).await?;
    let comments = store::blog::comment_ids(&state.db, id).await?;
    Ok(Json(BlogResponse::new(model, comments)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a new blog",
    description = "Creates a blog for an existing author; the new id shows up in the author's `blogs`. `id` and `comments` in the body are ignored.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Payload>,
) -> Result<impl IntoResponse, AppError> {
    let req = validate_create_blog(payload)?;

    let txn = state.db.begin().await.map_err(AppError::persistence)?;

    let author = store::author::find(&txn, req.author)
        .await
        .map_err(AppError::persistence)?
        .ok_or_else(|| AppError::NotFound("Author not found".into()))?;

    let model = store::blog::create(&txn, req)
        .await
        .map_err(AppError::persistence)?;
    txn.commit().await.map_err(AppError::persistence)?;
    tracing::info!(blog_id = %model.id, author_id = %author.id, "Blog created");

    Ok((StatusCode::CREATED, Json(BlogResponse::new(model, Vec::new()))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update an existing blog",
    description = "Partially updates the title and content of a blog. `id`, `author` and `comments` in the body are ignored. An empty payload returns the current resource unchanged.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Validation or store error (VALIDATION_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<Payload>,
) -> Result<Json<BlogResponse>, AppError> {
    let txn = state.db.begin().await.map_err(AppError::persistence)?;

    let existing = find_blog(&txn, id).await?;
    let req = validate_update_blog(payload)?;

    let model = if req == UpdateBlogRequest::default() {
        existing
    } else {
        store::blog::update(&txn, existing, req)
            .await
            .map_err(AppError::persistence)?
    };
    let comments = store::blog::comment_ids(&txn, id)
        .await
        .map_err(AppError::persistence)?;
    txn.commit().await.map_err(AppError::persistence)?;

    Ok(Json(BlogResponse::new(model, comments)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog by ID",
    description = "Deletes the blog and all of its comments. The comments leave their users' `comments` lists and the blog leaves its author's `blogs` list.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Cascade failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let txn = state.db.begin().await?;

    let blog = find_blog(&txn, id).await?;
    let removed = cascade::delete_blog(&txn, blog).await?;

    txn.commit().await?;
    tracing::info!(blog_id = %id, comments = removed.comments, "Blog deleted");
    Ok(Json(DeleteResponse::new("Blog has been deleted.")))
}

async fn find_blog<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<blog::Model, AppError> {
    store::blog::find(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cannot find the blog".into()))
}
