//! Request/response shapes and the Validation Gate that turns raw JSON bodies
//! into sanitized requests.

pub mod author;
pub mod blog;
pub mod comment;
pub mod shared;
pub mod user;
