use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{comment, user};
use crate::models::user::{CreateUserRequest, UpdateUserRequest};

use super::{group_by_parent, new_id};

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id).one(db).await
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<user::Model>, DbErr> {
    user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    req: CreateUserRequest,
) -> Result<user::Model, DbErr> {
    user::ActiveModel {
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
    existing: user::Model,
    req: UpdateUserRequest,
) -> Result<user::Model, DbErr> {
    let mut active: user::ActiveModel = existing.into();
    if let Some(full_name) = req.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    active.update(db).await
}

/// Remove the user row only. Callers go through [`crate::cascade::delete_user`].
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DbErr> {
    user::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Ids of one user's comments, oldest first.
pub async fn comment_ids<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
    comment::Entity::find()
        .select_only()
        .column(comment::Column::Id)
        .filter(comment::Column::UserId.eq(user_id))
        .order_by_asc(comment::Column::Id)
        .into_tuple::<Uuid>()
        .all(db)
        .await
}

/// Comment ids of every user that has commented.
pub async fn comment_index<C: ConnectionTrait>(
    db: &C,
) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr> {
    let pairs = comment::Entity::find()
        .select_only()
        .column(comment::Column::UserId)
        .column(comment::Column::Id)
        .order_by_asc(comment::Column::Id)
        .into_tuple::<(Uuid, Uuid)>()
        .all(db)
        .await?;
    Ok(group_by_parent(pairs))
}
