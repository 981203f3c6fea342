use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

use super::shared::{Gate, Payload};

#[derive(Debug, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    /// Id of an existing blog.
    pub blog: Uuid,
    #[schema(example = "Nice post", min_length = 2)]
    pub content: String,
    /// Id of an existing user.
    pub user: Uuid,
}

/// Only the text of a comment can change; `blog` and `user` are stripped.
#[derive(Debug, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateCommentRequest {
    #[schema(min_length = 2)]
    pub content: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub blog: Uuid,
    pub content: String,
    pub user: Uuid,
}

impl From<crate::entity::comment::Model> for CommentResponse {
    fn from(m: crate::entity::comment::Model) -> Self {
        Self {
            id: m.id,
            blog: m.blog_id,
            content: m.content,
            user: m.user_id,
        }
    }
}

pub fn validate_create_comment(payload: Payload) -> Result<CreateCommentRequest, AppError> {
    let mut gate = Gate::new(payload, &[]);
    let blog = gate.required_id("blog", "Blog");
    let content = gate.required_text("content", "Content", 2);
    let user = gate.required_id("user", "User");
    gate.finish(|| {
        Some(CreateCommentRequest {
            blog: blog?,
            content: content?,
            user: user?,
        })
    })
}

pub fn validate_update_comment(payload: Payload) -> Result<UpdateCommentRequest, AppError> {
    let mut gate = Gate::new(payload, &["blog", "user"]);
    let content = gate.optional_text("content", "Content", 2);
    gate.finish(|| Some(UpdateCommentRequest { content }))
}
