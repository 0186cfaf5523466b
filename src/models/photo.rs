use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub path: String,
    pub host: String,
    pub url: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::photo_tag::Entity")]
    PhotoTag,
    #[sea_orm(has_one = "super::photo_detail::Entity")]
    PhotoDetail,
}

impl Related<super::photo_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhotoTag.def()
    }
}

impl Related<super::photo_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhotoDetail.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::photo_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::photo_tag::Relation::Photo.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
