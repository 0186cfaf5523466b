use std::fmt;

use crate::spec::search_operation::{SearchOperation, ZERO_OR_MORE};

/// Raw comparison operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CriteriaValue {
    Scalar(String),
    List(Vec<String>),
}

impl CriteriaValue {
    /// Individual items: a scalar is split on commas, a list is taken as-is.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            CriteriaValue::Scalar(value) => value.split(',').collect(),
            CriteriaValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for CriteriaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaValue::Scalar(value) => write!(f, "{value}"),
            CriteriaValue::List(values) => write!(f, "{}", values.join(",")),
        }
    }
}

impl From<&str> for CriteriaValue {
    fn from(value: &str) -> Self {
        CriteriaValue::Scalar(value.to_string())
    }
}

impl From<String> for CriteriaValue {
    fn from(value: String) -> Self {
        CriteriaValue::Scalar(value)
    }
}

impl From<Vec<String>> for CriteriaValue {
    fn from(values: Vec<String>) -> Self {
        CriteriaValue::List(values)
    }
}

impl From<i64> for CriteriaValue {
    fn from(value: i64) -> Self {
        CriteriaValue::Scalar(value.to_string())
    }
}

/// One filter condition. Nothing is validated here; bad keys or values only
/// fail once the predicate is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecSearchCriteria {
    key: String,
    operation: SearchOperation,
    value: CriteriaValue,
    or_predicate: bool,
}

impl SpecSearchCriteria {
    pub fn new(
        key: impl Into<String>,
        operation: SearchOperation,
        value: impl Into<CriteriaValue>,
    ) -> Self {
        Self {
            key: key.into(),
            operation,
            value: value.into(),
            or_predicate: false,
        }
    }

    /// Builds a criteria from the pieces of a parsed search expression.
    ///
    /// An equality whose value is wrapped in `*` becomes a substring match,
    /// a leading `*` alone a suffix match and a trailing `*` alone a prefix
    /// match. Wildcards on any other operation are dropped.
    pub fn from_parts(
        or_predicate: bool,
        key: &str,
        operation: SearchOperation,
        prefix: &str,
        value: &str,
        suffix: &str,
    ) -> Self {
        let mut operation = operation;
        if operation == SearchOperation::Equality {
            let starts_with_wildcard = prefix.contains(ZERO_OR_MORE);
            let ends_with_wildcard = suffix.contains(ZERO_OR_MORE);

            operation = match (starts_with_wildcard, ends_with_wildcard) {
                (true, true) => SearchOperation::Contains,
                (true, false) => SearchOperation::EndsWith,
                (false, true) => SearchOperation::StartsWith,
                (false, false) => SearchOperation::Equality,
            };
        }

        Self {
            key: key.to_string(),
            operation,
            value: CriteriaValue::from(value),
            or_predicate,
        }
    }

    pub fn or(mut self) -> Self {
        self.or_predicate = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn operation(&self) -> SearchOperation {
        self.operation
    }

    pub fn value(&self) -> &CriteriaValue {
        &self.value
    }

    pub fn is_or_predicate(&self) -> bool {
        self.or_predicate
    }
}
