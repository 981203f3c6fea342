use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{blog, comment};
use crate::models::blog::{CreateBlogRequest, UpdateBlogRequest};

use super::{group_by_parent, new_id};

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<blog::Model>, DbErr> {
    blog::Entity::find_by_id(id).one(db).await
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<blog::Model>, DbErr> {
    blog::Entity::find()
        .order_by_asc(blog::Column::Id)
        .all(db)
        .await
}

/// Blogs written by one author.
pub async fn by_author<C: ConnectionTrait>(
    db: &C,
    author_id: Uuid,
) -> Result<Vec<blog::Model>, DbErr> {
    blog::Entity::find()
        .filter(blog::Column::AuthorId.eq(author_id))
        .order_by_asc(blog::Column::Id)
        .all(db)
        .await
}

/// Insert a blog. The author must already have been resolved by the caller.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    req: CreateBlogRequest,
) -> Result<blog::Model, DbErr> {
    blog::ActiveModel {
        id: Set(new_id()),
        title: Set(req.title),
        content: Set(req.content),
        author_id: Set(req.author),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: blog::Model,
    req: UpdateBlogRequest,
) -> Result<blog::Model, DbErr> {
    let mut active: blog::ActiveModel = existing.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(content) = req.content {
        active.content = Set(content);
    }
    active.update(db).await
}

/// Remove the blog row only. Callers go through [`crate::cascade::delete_blog`].
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DbErr> {
    blog::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Ids of one blog's comments, oldest first.
pub async fn comment_ids<C: ConnectionTrait>(db: &C, blog_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
    comment::Entity::find()
        .select_only()
        .column(comment::Column::Id)
        .filter(comment::Column::BlogId.eq(blog_id))
        .order_by_asc(comment::Column::Id)
        .into_tuple::<Uuid>()
        .all(db)
        .await
}

/// Comment ids of every blog that has comments.
pub async fn comment_index<C: ConnectionTrait>(
    db: &C,
) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr> {
    let pairs = comment::Entity::find()
        .select_only()
        .column(comment::Column::BlogId)
        .column(comment::Column::Id)
        .order_by_asc(comment::Column::Id)
        .into_tuple::<(Uuid, Uuid)>()
        .all(db)
        .await?;
    Ok(group_by_parent(pairs))
}
