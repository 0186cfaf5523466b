use log::debug;
use sea_orm::sea_query::{BinOper, Expr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

use crate::error::AppError;
use crate::models::tag_name::TagName;
use crate::models::{photo, photo_detail, photo_tag, tag};
use crate::spec::photo_field::PhotoField;
use crate::spec::search_criteria::{CriteriaValue, SpecSearchCriteria};
use crate::spec::search_operation::SearchOperation;

/// A single criteria bound to the photo entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoSpecification {
    criteria: SpecSearchCriteria,
}

impl PhotoSpecification {
    pub fn new(criteria: SpecSearchCriteria) -> Self {
        Self { criteria }
    }

    pub fn to_predicate(&self) -> Result<Condition, AppError> {
        build_predicate(&self.criteria)
    }
}

/// Translates one criteria into a condition over `photos`.
///
/// Relation keys are expressed as `photos.id IN (subquery)`, so the result can
/// be nested inside any AND/OR tree without extra joins on the outer query.
pub fn build_predicate(criteria: &SpecSearchCriteria) -> Result<Condition, AppError> {
    let field = PhotoField::resolve(criteria.key())?;
    let operation = criteria.operation();

    let expr = match field {
        PhotoField::Column(column) => column_predicate(column, operation, criteria.value()),
        PhotoField::Tags => tags_predicate(criteria)?,
        PhotoField::Detail => detail_predicate(criteria)?,
    };

    debug!(
        "Built predicate for {} {} {}",
        criteria.key(),
        operation,
        criteria.value()
    );

    Ok(Condition::all().add(expr))
}

fn column_predicate(
    column: photo::Column,
    operation: SearchOperation,
    value: &CriteriaValue,
) -> SimpleExpr {
    // Comparisons bind the textual form of the value; the column's storage
    // type decides how it is compared.
    let value = value.to_string();

    match operation {
        SearchOperation::Equality => column.eq(value),
        SearchOperation::Negation => column.ne(value),
        SearchOperation::GreaterThan => column.gt(value),
        SearchOperation::LessThan => column.lt(value),
        SearchOperation::Like => column.like(value),
        SearchOperation::StartsWith => column.like(format!("{value}%")),
        SearchOperation::EndsWith => column.like(format!("%{value}")),
        SearchOperation::Contains => column.like(format!("%{value}%")),
    }
}

fn tags_predicate(criteria: &SpecSearchCriteria) -> Result<SimpleExpr, AppError> {
    if criteria.operation() != SearchOperation::Equality {
        return Err(unsupported(criteria));
    }

    let names = criteria
        .value()
        .tokens()
        .into_iter()
        .map(|token| {
            TagName::from_str(token).ok_or_else(|| AppError::UnknownTag(token.to_string()))
        })
        .collect::<Result<Vec<TagName>, AppError>>()?;

    let tagged_photos = Query::select()
        .column((photo_tag::Entity, photo_tag::Column::PhotoId))
        .from(photo_tag::Entity)
        .inner_join(
            tag::Entity,
            Expr::col((tag::Entity, tag::Column::Id))
                .equals((photo_tag::Entity, photo_tag::Column::TagId)),
        )
        .and_where(
            Expr::col((tag::Entity, tag::Column::Name))
                .is_in(names.iter().map(TagName::as_str)),
        )
        .to_owned();

    Ok(photo::Column::Id.in_subquery(tagged_photos))
}

fn detail_predicate(criteria: &SpecSearchCriteria) -> Result<SimpleExpr, AppError> {
    if criteria.operation() != SearchOperation::Contains {
        return Err(unsupported(criteria));
    }

    let title_and_description = Expr::col((photo_detail::Entity, photo_detail::Column::Title))
        .binary(
            BinOper::Custom("||"),
            Expr::col((photo_detail::Entity, photo_detail::Column::Description)),
        );

    let matching_photos = Query::select()
        .column((photo_detail::Entity, photo_detail::Column::PhotoId))
        .from(photo_detail::Entity)
        .and_where(Expr::expr(title_and_description).like(format!("%{}%", criteria.value())))
        .to_owned();

    Ok(photo::Column::Id.in_subquery(matching_photos))
}

fn unsupported(criteria: &SpecSearchCriteria) -> AppError {
    AppError::UnsupportedOperation {
        key: criteria.key().to_string(),
        operation: criteria.operation(),
    }
}
