use log::warn;
use sea_orm::Condition;

use crate::error::AppError;
use crate::spec::photo_specification::PhotoSpecification;
use crate::spec::search_criteria::{CriteriaValue, SpecSearchCriteria};
use crate::spec::search_operation::{OR_PREDICATE_FLAG, SearchOperation, ZERO_OR_MORE};

/// Separates criteria inside a search expression.
pub const CRITERIA_SEPARATOR: char = ';';

/// Collects criteria and folds them into one predicate.
///
/// Criteria are combined left to right: each one is AND-ed with the result so
/// far, unless it is flagged as an or-predicate.
#[derive(Clone, Debug, Default)]
pub struct SpecificationsBuilder {
    params: Vec<SpecSearchCriteria>,
}

impl SpecificationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        self,
        key: impl Into<String>,
        operation: SearchOperation,
        value: impl Into<CriteriaValue>,
    ) -> Self {
        self.with_criteria(SpecSearchCriteria::new(key, operation, value))
    }

    pub fn with_criteria(mut self, criteria: SpecSearchCriteria) -> Self {
        self.params.push(criteria);
        self
    }

    /// Adds a criteria from the raw pieces of a search expression.
    ///
    /// A symbol that names no operation adds nothing, so it filters nothing.
    pub fn with_symbol(
        self,
        or_predicate: bool,
        key: &str,
        symbol: char,
        prefix: &str,
        value: &str,
        suffix: &str,
    ) -> Self {
        match SearchOperation::from_symbol(symbol) {
            Some(operation) => self.with_criteria(SpecSearchCriteria::from_parts(
                or_predicate,
                key,
                operation,
                prefix,
                value,
                suffix,
            )),
            None => {
                warn!("Ignoring filter on '{key}': unknown operation '{symbol}'");
                self
            }
        }
    }

    /// Parses expressions such as `name:IMG*;'host:cdn.example.com;tags:TAG_FOOD,TAG_STREET`.
    ///
    /// Each segment is `key<op>value`, where `<op>` is one of `: ! > < ~`, the
    /// value may carry a leading and/or trailing `*`, and a leading `'` on the
    /// key makes the segment an or-predicate. Malformed segments are skipped.
    pub fn parse(search: &str) -> Self {
        search
            .split(CRITERIA_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .fold(Self::new(), |builder, segment| builder.with_segment(segment))
    }

    fn with_segment(self, segment: &str) -> Self {
        let (or_predicate, rest) = match segment.strip_prefix(OR_PREDICATE_FLAG) {
            Some(rest) => (true, rest),
            None => (false, segment),
        };

        let key_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (key, rest) = rest.split_at(key_len);

        let mut chars = rest.chars();
        let Some(symbol) = chars.next().filter(|_| !key.is_empty()) else {
            warn!("Ignoring malformed filter '{segment}'");
            return self;
        };

        let raw_value = chars.as_str();
        let (prefix, value) = match raw_value.strip_prefix(ZERO_OR_MORE) {
            Some(value) => ("*", value),
            None => ("", raw_value),
        };
        let (value, suffix) = match value.strip_suffix(ZERO_OR_MORE) {
            Some(value) => (value, "*"),
            None => (value, ""),
        };

        self.with_symbol(or_predicate, key, symbol, prefix, value, suffix)
    }

    pub fn criteria(&self) -> &[SpecSearchCriteria] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Builds the combined predicate. No criteria matches every photo.
    pub fn build(&self) -> Result<Condition, AppError> {
        let mut params = self.params.iter();

        let Some(first) = params.next() else {
            return Ok(Condition::all());
        };

        let mut result = PhotoSpecification::new(first.clone()).to_predicate()?;

        for criteria in params {
            let next = PhotoSpecification::new(criteria.clone()).to_predicate()?;
            result = if criteria.is_or_predicate() {
                Condition::any().add(result).add(next)
            } else {
                Condition::all().add(result).add(next)
            };
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::photo;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(builder: &SpecificationsBuilder) -> String {
        photo::Entity::find()
            .filter(builder.build().unwrap())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn parses_operations_and_wildcards() {
        let builder =
            SpecificationsBuilder::parse("name:IMG*; host!cdn ;'url~%jpg;path:*2024*");
        let criteria = builder.criteria();

        assert_eq!(criteria.len(), 4);
        assert_eq!(criteria[0].key(), "name");
        assert_eq!(criteria[0].operation(), SearchOperation::StartsWith);
        assert_eq!(criteria[0].value(), &CriteriaValue::from("IMG"));
        assert_eq!(criteria[1].operation(), SearchOperation::Negation);
        assert!(criteria[2].is_or_predicate());
        assert_eq!(criteria[2].operation(), SearchOperation::Like);
        assert_eq!(criteria[2].value(), &CriteriaValue::from("%jpg"));
        assert_eq!(criteria[3].operation(), SearchOperation::Contains);
        assert_eq!(criteria[3].value(), &CriteriaValue::from("2024"));
    }

    #[test]
    fn tag_lists_survive_parsing() {
        let builder = SpecificationsBuilder::parse("tags:TAG_FOOD,TAG_STREET");
        let criteria = &builder.criteria()[0];
        assert_eq!(criteria.value().tokens(), vec!["TAG_FOOD", "TAG_STREET"]);
    }

    #[test]
    fn unknown_symbols_and_malformed_segments_are_dropped() {
        let builder = SpecificationsBuilder::parse("name=IMG;:nokey;justakey;host:cdn");
        assert_eq!(builder.criteria().len(), 1);
        assert_eq!(builder.criteria()[0].key(), "host");

        assert!(SpecificationsBuilder::parse("name=IMG").is_empty());
    }

    #[test]
    fn criteria_are_and_ed_by_default() {
        let builder = SpecificationsBuilder::new()
            .with("name", SearchOperation::StartsWith, "IMG")
            .with("host", SearchOperation::Equality, "cdn");
        let sql = sql(&builder);
        assert!(sql.contains(r#""photos"."name" LIKE 'IMG%'"#), "{sql}");
        assert!(sql.contains(r#""photos"."host" = 'cdn'"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
        assert!(!sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn or_flag_switches_to_or() {
        let builder = SpecificationsBuilder::parse("name:IMG*;'host:cdn");
        let sql = sql(&builder);
        assert!(sql.contains(r#""photos"."name" LIKE 'IMG%'"#), "{sql}");
        assert!(sql.contains(r#""photos"."host" = 'cdn'"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(!sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn programmatic_or_criteria() {
        let builder = SpecificationsBuilder::new()
            .with("host", SearchOperation::Equality, "a.example.com")
            .with_criteria(SpecSearchCriteria::new("host", SearchOperation::Equality, "b.example.com").or());
        let sql = sql(&builder);
        assert!(sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn empty_builder_has_no_filter() {
        let condition = SpecificationsBuilder::new().build().unwrap();
        assert!(condition.is_empty());
    }

    #[test]
    fn one_bad_criteria_fails_the_whole_build() {
        let builder = SpecificationsBuilder::new()
            .with("name", SearchOperation::Equality, "IMG")
            .with("tags", SearchOperation::Equality, "TAG_FOOD,NOT_A_REAL_TAG");
        assert!(matches!(builder.build(), Err(AppError::UnknownTag(_))));
    }
}
