use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::tag_name::TagName;

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRequest {
    pub name: String,
    pub path: String,
    pub host: String,
    pub url: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub detail: Option<PhotoDetailRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoDetailRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub host: String,
    pub url: String,
    pub tags: BTreeSet<TagName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<PhotoDetailResponse>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoDetailResponse {
    pub title: String,
    pub description: String,
}
