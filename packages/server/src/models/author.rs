use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

use super::shared::{Gate, Payload};

#[derive(Debug, utoipa::ToSchema)]
pub struct CreateAuthorRequest {
    #[schema(example = "John Doe", min_length = 3)]
    pub full_name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
}

#[derive(Debug, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateAuthorRequest {
    #[schema(min_length = 3)]
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Ids of the author's blogs, oldest first.
    pub blogs: Vec<Uuid>,
}

impl AuthorResponse {
    pub fn new(m: crate::entity::author::Model, blogs: Vec<Uuid>) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            blogs,
        }
    }
}

pub fn validate_create_author(payload: Payload) -> Result<CreateAuthorRequest, AppError> {
    let mut gate = Gate::new(payload, &["blogs"]);
    let full_name = gate.required_text("full_name", "Full name", 3);
    let email = gate.required_email("email", "Email");
    gate.finish(|| {
        Some(CreateAuthorRequest {
            full_name: full_name?,
            email: email?,
        })
    })
}

pub fn validate_update_author(payload: Payload) -> Result<UpdateAuthorRequest, AppError> {
    let mut gate = Gate::new(payload, &["blogs"]);
    let full_name = gate.optional_text("full_name", "Full name", 3);
    let email = gate.optional_email("email", "Email");
    gate.finish(|| Some(UpdateAuthorRequest { full_name, email }))
}
