use thiserror::Error;

/// Errors raised while constructing filters and query expressions.
///
/// These signal a defect in how an expression was assembled, never a
/// missing list or a signed-out session. Those are ordinary empty results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A conjunction was built from an empty sequence of criteria
    #[error("Cannot build a conjunction from zero criteria")]
    EmptyConjunction,

    /// A table, column or key name was empty
    #[error("Invalid {what}: name must not be empty")]
    EmptyName { what: &'static str },

    /// A query joined a table the evaluator does not know about
    #[error("Unknown table '{table}' in query")]
    UnknownTable { table: String },

    /// A query shape the in-memory evaluator cannot execute
    #[error("Unsupported query: {reason}")]
    UnsupportedQuery { reason: &'static str },
}

/// Result type alias for filter construction
pub type FilterResult<T> = Result<T, FilterError>;
