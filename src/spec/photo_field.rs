use crate::error::AppError;
use crate::models::photo;

/// What a search key refers to on a photo.
#[derive(Copy, Clone, Debug)]
pub enum PhotoField {
    /// A plain column of the `photos` table.
    Column(photo::Column),
    /// The tag set, reached through `photo_tags`.
    Tags,
    /// The `photo_details` row, searched on title and description together.
    Detail,
}

impl PhotoField {
    pub fn resolve(key: &str) -> Result<Self, AppError> {
        let field = match key {
            "id" => PhotoField::Column(photo::Column::Id),
            "name" => PhotoField::Column(photo::Column::Name),
            "path" => PhotoField::Column(photo::Column::Path),
            "host" => PhotoField::Column(photo::Column::Host),
            "url" => PhotoField::Column(photo::Column::Url),
            "createdAt" | "created_at" => PhotoField::Column(photo::Column::CreatedAt),
            "tags" => PhotoField::Tags,
            "detail" => PhotoField::Detail,
            _ => return Err(AppError::UnknownField(key.to_string())),
        };

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_columns_and_relations() {
        assert!(matches!(
            PhotoField::resolve("name"),
            Ok(PhotoField::Column(photo::Column::Name))
        ));
        assert!(matches!(
            PhotoField::resolve("createdAt"),
            Ok(PhotoField::Column(photo::Column::CreatedAt))
        ));
        assert!(matches!(PhotoField::resolve("tags"), Ok(PhotoField::Tags)));
        assert!(matches!(PhotoField::resolve("detail"), Ok(PhotoField::Detail)));
    }

    #[test]
    fn unknown_key_is_an_error() {
        match PhotoField::resolve("colour") {
            Err(AppError::UnknownField(key)) => assert_eq!(key, "colour"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
