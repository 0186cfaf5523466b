use crate::models::tag_name::TagName;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: TagName,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::photo_tag::Entity")]
    PhotoTag,
}

impl Related<super::photo_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhotoTag.def()
    }
}

impl Related<super::photo::Entity> for Entity {
    fn to() -> RelationDef {
        super::photo_tag::Relation::Photo.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::photo_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
