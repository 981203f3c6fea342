use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{author, blog};
use crate::models::author::{CreateAuthorRequest, UpdateAuthorRequest};

use super::{group_by_parent, new_id};

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<author::Model>, DbErr> {
    author::Entity::find_by_id(id).one(db).await
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<author::Model>, DbErr> {
    author::Entity::find()
        .order_by_asc(author::Column::Id)
        .all(db)
        .await
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    req: CreateAuthorRequest,
) -> Result<author::Model, DbErr> {
    author::ActiveModel {
        id: Set(new_id()),
        full_name: Set(req.full_name),
        email: Set(req.email),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: author::Model,
    req: UpdateAuthorRequest,
) -> Result<author::Model, DbErr> {
    let mut active: author::ActiveModel = existing.into();
    if let Some(full_name) = req.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    active.update(db).await
}

/// Remove the author row only. Callers go through [`crate::cascade::delete_author`].
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DbErr> {
    author::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Ids of one author's blogs, oldest first.
pub async fn blog_ids<C: ConnectionTrait>(db: &C, author_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
    blog::Entity::find()
        .select_only()
        .column(blog::Column::Id)
        .filter(blog::Column::AuthorId.eq(author_id))
        .order_by_asc(blog::Column::Id)
        .into_tuple::<Uuid>()
        .all(db)
        .await
}

/// Blog ids of every author that has at least one blog.
pub async fn blog_index<C: ConnectionTrait>(db: &C) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr> {
    let pairs = blog::Entity::find()
        .select_only()
        .column(blog::Column::AuthorId)
        .column(blog::Column::Id)
        .order_by_asc(blog::Column::Id)
        .into_tuple::<(Uuid, Uuid)>()
        .all(db)
        .await?;
    Ok(group_by_parent(pairs))
}
