use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of tag names a photo can carry.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    DeriveActiveEnum,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagName {
    #[sea_orm(string_value = "TAG_UNKNOWN")]
    TagUnknown,
    #[sea_orm(string_value = "TAG_PORTRAIT")]
    TagPortrait,
    #[sea_orm(string_value = "TAG_LANDSCAPE")]
    TagLandscape,
    #[sea_orm(string_value = "TAG_ANIMAL")]
    TagAnimal,
    #[sea_orm(string_value = "TAG_ARCHITECTURE")]
    TagArchitecture,
    #[sea_orm(string_value = "TAG_FOOD")]
    TagFood,
    #[sea_orm(string_value = "TAG_STREET")]
    TagStreet,
    #[sea_orm(string_value = "TAG_NATURE")]
    TagNature,
}

impl Default for TagName {
    fn default() -> Self {
        TagName::TagUnknown
    }
}

impl TagName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagName::TagUnknown => "TAG_UNKNOWN",
            TagName::TagPortrait => "TAG_PORTRAIT",
            TagName::TagLandscape => "TAG_LANDSCAPE",
            TagName::TagAnimal => "TAG_ANIMAL",
            TagName::TagArchitecture => "TAG_ARCHITECTURE",
            TagName::TagFood => "TAG_FOOD",
            TagName::TagStreet => "TAG_STREET",
            TagName::TagNature => "TAG_NATURE",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_str(s: &str) -> Option<Self> {
        TagName::iter().find(|name| name.as_str() == s)
    }

    pub fn all() -> Vec<TagName> {
        TagName::iter().collect()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
