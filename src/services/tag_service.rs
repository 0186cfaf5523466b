use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use crate::models::tag_name::TagName;
use crate::models::{photo_tag, tag};

pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: TagName,
) -> Result<Option<tag::Model>, DbErr> {
    tag::Entity::find()
        .filter(tag::Column::Name.eq(name.as_str()))
        .one(db)
        .await
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await
}

/// Tag names for every photo in `photo_ids`. Photos without tags are absent from the map.
pub async fn get_tags_for_photos<C: ConnectionTrait>(
    photo_ids: &[i64],
    db: &C,
) -> Result<HashMap<i64, BTreeSet<TagName>>, DbErr> {
    if photo_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = photo_tag::Entity::find()
        .select_only()
        .column(photo_tag::Column::PhotoId)
        .column(tag::Column::Name)
        .join(JoinType::InnerJoin, photo_tag::Relation::Tag.def())
        .filter(photo_tag::Column::PhotoId.is_in(photo_ids.to_vec()))
        .into_tuple::<(i64, TagName)>()
        .all(db)
        .await?;

    let mut tags: HashMap<i64, BTreeSet<TagName>> = HashMap::new();
    for (photo_id, name) in rows {
        tags.entry(photo_id).or_default().insert(name);
    }

    Ok(tags)
}
