use std::fmt;

/// Marks a criteria that is OR-ed with everything before it.
pub const OR_PREDICATE_FLAG: char = '\'';

/// Wildcard accepted around a value in a search expression.
pub const ZERO_OR_MORE: char = '*';

/// Symbols understood by [`SearchOperation::from_symbol`].
pub const SIMPLE_OPERATION_SET: [char; 5] = [':', '!', '>', '<', '~'];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchOperation {
    Equality,
    Negation,
    GreaterThan,
    LessThan,
    Like,
    StartsWith,
    EndsWith,
    Contains,
}

impl SearchOperation {
    /// Maps a search-expression symbol to its operation.
    ///
    /// Prefix/suffix operations have no symbol of their own; they come from
    /// wildcards around an equality value.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ':' => Some(SearchOperation::Equality),
            '!' => Some(SearchOperation::Negation),
            '>' => Some(SearchOperation::GreaterThan),
            '<' => Some(SearchOperation::LessThan),
            '~' => Some(SearchOperation::Like),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOperation::Equality => "EQUALITY",
            SearchOperation::Negation => "NEGATION",
            SearchOperation::GreaterThan => "GREATER_THAN",
            SearchOperation::LessThan => "LESS_THAN",
            SearchOperation::Like => "LIKE",
            SearchOperation::StartsWith => "STARTS_WITH",
            SearchOperation::EndsWith => "ENDS_WITH",
            SearchOperation::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for SearchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
