use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

use super::shared::{Gate, Payload};

#[derive(Debug, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "My First Blog", min_length = 3)]
    pub title: String,
    #[schema(example = "This is my first blog.", min_length = 3)]
    pub content: String,
    /// Id of an existing author.
    pub author: Uuid,
}

/// The author of a blog is fixed at creation and stripped here.
#[derive(Debug, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    #[schema(min_length = 3)]
    pub title: Option<String>,
    #[schema(min_length = 3)]
    pub content: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    /// Ids of the blog's comments, oldest first.
    pub comments: Vec<Uuid>,
}

impl BlogResponse {
    pub fn new(m: crate::entity::blog::Model, comments: Vec<Uuid>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            author: m.author_id,
            comments,
        }
    }
}

pub fn validate_create_blog(payload: Payload) -> Result<CreateBlogRequest, AppError> {
    let mut gate = Gate::new(payload, &["comments"]);
    let title = gate.required_text("title", "Title", 3);
    let content = gate.required_text("content", "Content", 3);
    let author = gate.required_id("author", "Author");
    gate.finish(|| {
        Some(CreateBlogRequest {
            title: title?,
            content: content?,
            author: author?,
        })
    })
}

pub fn validate_update_blog(payload: Payload) -> Result<UpdateBlogRequest, AppError> {
    let mut gate = Gate::new(payload, &["comments", "author"]);
    let title = gate.optional_text("title", "Title", 3);
    let content = gate.optional_text("content", "Content", 3);
    gate.finish(|| Some(UpdateBlogRequest { title, content }))
}
