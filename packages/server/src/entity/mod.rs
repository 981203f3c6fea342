//! Persisted records. Reverse links (an author's blogs, a blog's or user's
//! comments) are not columns; see [`crate::store`].

pub mod author;
pub mod blog;
pub mod comment;
pub mod user;
