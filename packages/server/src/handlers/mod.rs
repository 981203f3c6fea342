pub mod author;
pub mod blog;
pub mod comment;
pub mod user;
