//! Referential cleanup run by every delete before it reports success.
//!
//! Children always go before their parent, so foreign keys hold at every
//! step. Reverse links are derived from the children's forward references
//! (see [`crate::store`]); deleting a child row is what pulls its id from
//! the parent's `blogs` or `comments` list.
//!
//! The functions only issue statements on the connection they are given.
//! The delete handlers pass a transaction, so a failure partway through
//! rolls back instead of leaving a half-cleaned graph.

use std::ops::AddAssign;

use sea_orm::{ConnectionTrait, DbErr};
use tracing::{debug, info};

use crate::entity::{author, blog, comment, user};
use crate::store;

/// Records removed by one cascade, the deleted entity included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub authors: u64,
    pub blogs: u64,
    pub comments: u64,
    pub users: u64,
}

impl AddAssign for Removed {
    fn add_assign(&mut self, rhs: Self) {
        self.authors += rhs.authors;
        self.blogs += rhs.blogs;
        self.comments += rhs.comments;
        self.users += rhs.users;
    }
}

/// Delete an author together with every blog it wrote, each cascading per
/// [`delete_blog`].
pub async fn delete_author<C: ConnectionTrait>(
    db: &C,
    author: author::Model,
) -> Result<Removed, DbErr> {
    let mut removed = Removed::default();

    for blog in store::blog::by_author(db, author.id).await? {
        removed += delete_blog(db, blog).await?;
    }

    store::author::delete(db, author.id).await?;
    removed.authors += 1;

    info!(author_id = %author.id, ?removed, "Author deleted");
    Ok(removed)
}

/// Delete a blog and all comments on it.
///
/// The comments disappear from their users' `comments` lists and the blog
/// disappears from its author's `blogs` list.
pub async fn delete_blog<C: ConnectionTrait>(
    db: &C,
    blog: blog::Model,
) -> Result<Removed, DbErr> {
    let deleted = store::comment::delete_by_blog(db, blog.id).await?;
    debug!(blog_id = %blog.id, comments = deleted, "Unlinked comments from their users");

    store::blog::delete(db, blog.id).await?;
    debug!(blog_id = %blog.id, author_id = %blog.author_id, "Unlinked blog from its author");

    Ok(Removed {
        blogs: 1,
        comments: deleted,
        ..Default::default()
    })
}

/// Delete one comment, unlinking it from its blog and its user.
pub async fn delete_comment<C: ConnectionTrait>(
    db: &C,
    comment: comment::Model,
) -> Result<Removed, DbErr> {
    store::comment::delete(db, comment.id).await?;
    debug!(
        comment_id = %comment.id,
        blog_id = %comment.blog_id,
        user_id = %comment.user_id,
        "Comment deleted"
    );

    Ok(Removed {
        comments: 1,
        ..Default::default()
    })
}

/// Delete a user and every comment they wrote, each cascading per
/// [`delete_comment`].
pub async fn delete_user<C: ConnectionTrait>(
    db: &C,
    user: user::Model,
) -> Result<Removed, DbErr> {
    let mut removed = Removed::default();

    for comment in store::comment::by_user(db, user.id).await? {
        removed += delete_comment(db, comment).await?;
    }

    store::user::delete(db, user.id).await?;
    removed.users += 1;

    info!(user_id = %user.id, ?removed, "User deleted");
    Ok(removed)
}
