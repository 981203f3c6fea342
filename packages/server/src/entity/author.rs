use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub full_name: String,
    pub email: String,

    #[sea_orm(has_many)]
    pub blogs: HasMany<super::blog::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
