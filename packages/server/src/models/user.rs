use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

use super::shared::{Gate, Payload};

#[derive(Debug, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Jane Roe", min_length = 3)]
    pub full_name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
}

#[derive(Debug, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[schema(min_length = 3)]
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Ids of the user's comments, oldest first.
    pub comments: Vec<Uuid>,
}

impl UserResponse {
    pub fn new(m: crate::entity::user::Model, comments: Vec<Uuid>) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            comments,
        }
    }
}

pub fn validate_create_user(payload: Payload) -> Result<CreateUserRequest, AppError> {
    let mut gate = Gate::new(payload, &["comments"]);
    let full_name = gate.required_text("full_name", "Full name", 3);
    let email = gate.required_email("email", "Email");
    gate.finish(|| {
        Some(CreateUserRequest {
            full_name: full_name?,
            email: email?,
        })
    })
}

pub fn validate_update_user(payload: Payload) -> Result<UpdateUserRequest, AppError> {
    let mut gate = Gate::new(payload, &["comments"]);
    let full_name = gate.optional_text("full_name", "Full name", 3);
    let email = gate.optional_email("email", "Email");
    gate.finish(|| Some(UpdateUserRequest { full_name, email }))
}
