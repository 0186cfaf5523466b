use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::config::get_settings;
use crate::dtos::paged_response::PagedResponse;
use crate::dtos::photo_dto::{PhotoDetailResponse, PhotoRequest, PhotoResponse};
use crate::error::AppError;
use crate::models::tag_name::TagName;
use crate::models::{photo, photo_detail, photo_tag, tag};
use crate::services::tag_service;

pub async fn get_all_photos(
    db: &DatabaseConnection,
    page: i64,
    size: i64,
) -> Result<PagedResponse<PhotoResponse>, AppError> {
    search_photos(db, Condition::all(), page, size).await
}

/// Newest-first page of the photos matching `condition`.
pub async fn search_photos(
    db: &DatabaseConnection,
    condition: Condition,
    page: i64,
    size: i64,
) -> Result<PagedResponse<PhotoResponse>, AppError> {
    let (page, size) = validate_page_number_and_size(page, size)?;

    let query = photo::Entity::find().filter(condition);

    let total_elements = query.clone().count(db).await?;

    let photos = query
        .order_by(photo::Column::Id, Order::Desc)
        .limit(size)
        .offset(page * size)
        .all(db)
        .await?;

    debug!(
        "Loaded {} of {} photo(s) for page {}",
        photos.len(),
        total_elements,
        page
    );

    let content = to_responses(db, photos).await?;

    Ok(PagedResponse::new(content, page, size, total_elements))
}

pub async fn create_photo(
    db: &DatabaseConnection,
    request: PhotoRequest,
) -> Result<PhotoResponse, AppError> {
    let txn = db.begin().await?;

    let tags = resolve_tags(&txn, request.tags.as_deref()).await?;

    let photo = photo::ActiveModel {
        name: Set(request.name),
        path: Set(request.path),
        host: Set(request.host),
        url: Set(request.url),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    photo_tag::Entity::insert_many(tags.iter().map(|tag| photo_tag::ActiveModel {
        photo_id: Set(photo.id),
        tag_id: Set(tag.id),
    }))
    .exec_without_returning(&txn)
    .await?;

    let detail = match request.detail {
        Some(detail) => Some(
            photo_detail::ActiveModel {
                photo_id: Set(photo.id),
                title: Set(detail.title),
                description: Set(detail.description),
                ..Default::default()
            }
            .insert(&txn)
            .await?,
        ),
        None => None,
    };

    txn.commit().await?;

    info!("Created photo {} with {} tag(s)", photo.id, tags.len());

    let tag_names = tags.into_iter().map(|tag| tag.name).collect();
    Ok(to_response(photo, tag_names, detail))
}

pub async fn get_photo_by_id(
    db: &DatabaseConnection,
    photo_id: i64,
) -> Result<PhotoResponse, AppError> {
    let photo = photo::Entity::find_by_id(photo_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound {
            resource: "Photo",
            field: "id",
            value: photo_id.to_string(),
        })?;

    let mut responses = to_responses(db, vec![photo]).await?;
    responses
        .pop()
        .ok_or_else(|| AppError::App(format!("Photo {photo_id} vanished while loading")))
}

/// Checks paging input and converts it to the unsigned form the queries use.
pub fn validate_page_number_and_size(page: i64, size: i64) -> Result<(u64, u64), AppError> {
    let max_page_size = get_settings().config.max_page_size;

    if page < 0 {
        return Err(AppError::BadRequest(
            "Page number cannot be less than zero.".to_string(),
        ));
    }

    if size < 1 {
        return Err(AppError::BadRequest(
            "Page size must be greater than zero.".to_string(),
        ));
    }

    if size as u64 > max_page_size {
        return Err(AppError::BadRequest(format!(
            "Page size must not be greater than {max_page_size}"
        )));
    }

    if page.checked_mul(size).is_none() {
        return Err(AppError::BadRequest(format!("Page number {page} is out of range.")));
    }

    Ok((page as u64, size as u64))
}

/// Stored tags for the requested names, or the unknown tag when none are given.
async fn resolve_tags<C: ConnectionTrait>(
    db: &C,
    requested: Option<&[String]>,
) -> Result<Vec<tag::Model>, AppError> {
    let requested = requested.unwrap_or_default();

    if requested.is_empty() {
        let unknown = tag_service::find_by_name(db, TagName::default())
            .await?
            .ok_or_else(|| AppError::App("Default tag not set.".to_string()))?;
        return Ok(vec![unknown]);
    }

    let mut tags = BTreeMap::new();
    for raw in requested {
        let name = TagName::from_str(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown tag name: {raw}")))?;
        let tag = tag_service::find_by_name(db, name)
            .await?
            .ok_or_else(|| AppError::App("Tag not found.".to_string()))?;
        tags.insert(tag.id, tag);
    }

    Ok(tags.into_values().collect())
}

async fn to_responses(
    db: &DatabaseConnection,
    photos: Vec<photo::Model>,
) -> Result<Vec<PhotoResponse>, AppError> {
    let photo_ids: Vec<i64> = photos.iter().map(|p| p.id).collect();

    let mut tags_map = tag_service::get_tags_for_photos(&photo_ids, db).await?;
    let mut details: HashMap<i64, photo_detail::Model> = if photo_ids.is_empty() {
        HashMap::new()
    } else {
        photo_detail::Entity::find()
            .filter(photo_detail::Column::PhotoId.is_in(photo_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|detail| (detail.photo_id, detail))
            .collect()
    };

    Ok(photos
        .into_iter()
        .map(|photo| {
            let tags = tags_map.remove(&photo.id).unwrap_or_default();
            let detail = details.remove(&photo.id);
            to_response(photo, tags, detail)
        })
        .collect())
}

fn to_response(
    photo: photo::Model,
    tags: BTreeSet<TagName>,
    detail: Option<photo_detail::Model>,
) -> PhotoResponse {
    PhotoResponse {
        id: photo.id,
        name: photo.name,
        path: photo.path,
        host: photo.host,
        url: photo.url,
        tags,
        detail: detail.map(|d| PhotoDetailResponse {
            title: d.title,
            description: d.description,
        }),
        created_at: photo.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::photo_dto::PhotoDetailRequest;
    use crate::services::connection_db::test_support::memory_db;
    use crate::spec::search_operation::SearchOperation;
    use crate::spec::specifications_builder::SpecificationsBuilder;

    fn request(name: &str, tags: Option<&[&str]>) -> PhotoRequest {
        PhotoRequest {
            name: name.to_string(),
            path: format!("/photos/{name}.jpg"),
            host: "img.example.com".to_string(),
            url: format!("https://img.example.com/{name}.jpg"),
            tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
            detail: None,
        }
    }

    fn with_detail(mut request: PhotoRequest, title: &str, description: &str) -> PhotoRequest {
        request.detail = Some(PhotoDetailRequest {
            title: title.to_string(),
            description: description.to_string(),
        });
        request
    }

    async fn names_matching(
        db: &DatabaseConnection,
        builder: SpecificationsBuilder,
    ) -> Vec<String> {
        let condition = builder.build().unwrap();
        let mut names: Vec<String> = search_photos(db, condition, 0, 50)
            .await
            .unwrap()
            .content
            .into_iter()
            .map(|p| p.name)
            .collect();
        names.sort();
        names
    }

    async fn seed(db: &DatabaseConnection) {
        create_photo(db, request("IMG_001", Some(&["TAG_FOOD"]))).await.unwrap();
        create_photo(db, request("MYIMG_001", Some(&["TAG_STREET", "TAG_NATURE"])))
            .await
            .unwrap();
        create_photo(
            db,
            with_detail(request("DSC_100", Some(&["TAG_ANIMAL"])), "Red fox", "at dawn"),
        )
        .await
        .unwrap();
        create_photo(
            db,
            with_detail(request("DSC_200", None), "Harbour", "boats and foxes"),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn create_defaults_to_unknown_tag() {
        let db = memory_db().await;

        let created = create_photo(&db, request("IMG_010", None)).await.unwrap();
        assert_eq!(created.tags, BTreeSet::from([TagName::TagUnknown]));

        let empty = create_photo(&db, request("IMG_011", Some(&[]))).await.unwrap();
        assert_eq!(empty.tags, BTreeSet::from([TagName::TagUnknown]));
    }

    #[tokio::test]
    async fn create_rejects_unknown_tag_and_stores_nothing() {
        let db = memory_db().await;

        let err = create_photo(&db, request("IMG_012", Some(&["TAG_FOOD", "TAG_NOPE"])))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let page = get_all_photos(&db, 0, 10).await.unwrap();
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn get_by_id_returns_tags_and_detail() {
        let db = memory_db().await;
        let portrait = request("IMG_020", Some(&["TAG_PORTRAIT", "TAG_PORTRAIT"]));
        let created = create_photo(&db, with_detail(portrait, "Me", "selfie"))
            .await
            .unwrap();

        let loaded = get_photo_by_id(&db, created.id).await.unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.tags, BTreeSet::from([TagName::TagPortrait]));
        assert_eq!(loaded.detail.unwrap().title, "Me");
    }

    #[tokio::test]
    async fn get_by_id_reports_missing_photo() {
        let db = memory_db().await;
        let err = get_photo_by_id(&db, 404).await.unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound { resource: "Photo", .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn list_is_paginated_newest_first() {
        let db = memory_db().await;
        for i in 0..5 {
            create_photo(&db, request(&format!("IMG_{i:03}"), None)).await.unwrap();
        }

        let first = get_all_photos(&db, 0, 2).await.unwrap();
        let names: Vec<&str> = first.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["IMG_004", "IMG_003"]);
        assert_eq!(first.total_elements, 5);
        assert_eq!(first.total_pages, 3);
        assert!(!first.last);

        let last = get_all_photos(&db, 2, 2).await.unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].name, "IMG_000");
        assert!(last.last);
    }

    #[tokio::test]
    async fn page_bounds_are_validated() {
        let db = memory_db().await;
        for (page, size) in [(-1, 10), (0, 0), (0, 51)] {
            let result = get_all_photos(&db, page, size).await;
            assert!(
                matches!(result, Err(AppError::BadRequest(_))),
                "page {page}, size {size}"
            );
        }
        assert!(get_all_photos(&db, 0, 50).await.is_ok());
    }

    #[tokio::test]
    async fn page_offset_overflow_is_rejected() {
        let db = memory_db().await;
        let result = get_all_photos(&db, i64::MAX / 10, 50).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))), "{result:?}");
    }

    #[tokio::test]
    async fn starts_with_matches_prefix_only() {
        let db = memory_db().await;
        seed(&db).await;

        let names = names_matching(
            &db,
            SpecificationsBuilder::new().with("name", SearchOperation::StartsWith, "IMG"),
        )
        .await;
        assert_eq!(names, vec!["IMG_001"]);
    }

    #[tokio::test]
    async fn tag_equality_matches_any_listed_tag() {
        let db = memory_db().await;
        seed(&db).await;

        let names = names_matching(
            &db,
            SpecificationsBuilder::new().with(
                "tags",
                SearchOperation::Equality,
                "TAG_FOOD,TAG_NATURE",
            ),
        )
        .await;
        assert_eq!(names, vec!["IMG_001", "MYIMG_001"]);

        let unknown = names_matching(
            &db,
            SpecificationsBuilder::new().with("tags", SearchOperation::Equality, "TAG_UNKNOWN"),
        )
        .await;
        assert_eq!(unknown, vec!["DSC_200"]);
    }

    #[tokio::test]
    async fn detail_contains_searches_both_halves() {
        let db = memory_db().await;
        seed(&db).await;

        let in_title = names_matching(
            &db,
            SpecificationsBuilder::new().with("detail", SearchOperation::Contains, "fox"),
        )
        .await;
        assert_eq!(in_title, vec!["DSC_100", "DSC_200"]);

        let in_description = names_matching(
            &db,
            SpecificationsBuilder::new().with("detail", SearchOperation::Contains, "dawn"),
        )
        .await;
        assert_eq!(in_description, vec!["DSC_100"]);
    }

    #[tokio::test]
    async fn unknown_operation_symbol_filters_nothing() {
        let db = memory_db().await;
        seed(&db).await;

        let names = names_matching(&db, SpecificationsBuilder::parse("name=IMG_001")).await;
        assert_eq!(names.len(), 4);
    }

    #[tokio::test]
    async fn combined_search_expression() {
        let db = memory_db().await;
        seed(&db).await;

        let and = names_matching(&db, SpecificationsBuilder::parse("name:DSC*;tags:TAG_ANIMAL")).await;
        assert_eq!(and, vec!["DSC_100"]);

        let or = names_matching(&db, SpecificationsBuilder::parse("name:IMG*;'tags:TAG_ANIMAL")).await;
        assert_eq!(or, vec!["DSC_100", "IMG_001"]);

        let negated = names_matching(&db, SpecificationsBuilder::parse("name!IMG_001")).await;
        assert_eq!(negated, vec!["DSC_100", "DSC_200", "MYIMG_001"]);
    }

    #[tokio::test]
    async fn id_comparisons_follow_column_affinity() {
        let db = memory_db().await;
        seed(&db).await;

        let names = names_matching(
            &db,
            SpecificationsBuilder::new().with("id", SearchOperation::GreaterThan, 2i64),
        )
        .await;
        assert_eq!(names, vec!["DSC_100", "DSC_200"]);
    }

    #[tokio::test]
    async fn text_comparisons_are_lexical() {
        let db = memory_db().await;
        seed(&db).await;

        let before = names_matching(
            &db,
            SpecificationsBuilder::new().with("name", SearchOperation::LessThan, "IMG"),
        )
        .await;
        assert_eq!(before, vec!["DSC_100", "DSC_200"]);

        let after = names_matching(
            &db,
            SpecificationsBuilder::new().with("name", SearchOperation::GreaterThan, "IMG"),
        )
        .await;
        assert_eq!(after, vec!["IMG_001", "MYIMG_001"]);
    }
}
