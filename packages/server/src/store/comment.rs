use sea_orm::*;
use uuid::Uuid;

use crate::entity::comment;
use crate::models::comment::{CreateCommentRequest, UpdateCommentRequest};

use super::new_id;

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<comment::Model>, DbErr> {
    comment::Entity::find_by_id(id).one(db).await
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<comment::Model>, DbErr> {
    comment::Entity::find()
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await
}

pub async fn by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<comment::Model>, DbErr> {
    comment::Entity::find()
        .filter(comment::Column::UserId.eq(user_id))
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await
}

/// Insert a comment. Blog and user must already have been resolved by the caller.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    req: CreateCommentRequest,
) -> Result<comment::Model, DbErr> {
    comment::ActiveModel {
        id: Set(new_id()),
        content: Set(req.content),
        blog_id: Set(req.blog),
        user_id: Set(req.user),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: comment::Model,
    req: UpdateCommentRequest,
) -> Result<comment::Model, DbErr> {
    let mut active: comment::ActiveModel = existing.into();
    if let Some(content) = req.content {
        active.content = Set(content);
    }
    active.update(db).await
}

/// Remove the comment row only. Callers go through [`crate::cascade::delete_comment`].
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DbErr> {
    comment::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Remove every comment on one blog, returning how many went.
pub async fn delete_by_blog<C: ConnectionTrait>(db: &C, blog_id: Uuid) -> Result<u64, DbErr> {
    let res = comment::Entity::delete_many()
        .filter(comment::Column::BlogId.eq(blog_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
