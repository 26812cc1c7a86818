//! Resolver error types.

use thiserror::Error;
use turbo_inventory::InventoryError;

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Errors raised while post-processing resolver output.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// GraphQL document could not be parsed.
    #[error("GraphQL parse error: {0}")]
    Parse(String),

    /// Document contains no executable operation.
    #[error("GraphQL document has no operation")]
    NoOperation,

    /// Named operation does not exist in the document.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Document has several operations and no name was given.
    #[error("Operation name required: document has {0} operations")]
    AmbiguousOperation(usize),

    /// Fragment spread refers to an undefined fragment.
    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),

    /// Fragment spreads form a cycle.
    #[error("Fragment cycle through: {0}")]
    FragmentCycle(String),

    /// Config value exists but cannot be used.
    #[error("Invalid config value at {path}: {message}")]
    InvalidConfig { path: String, message: String },

    /// Stock lookup failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl From<graphql_parser::query::ParseError> for ResolverError {
    fn from(e: graphql_parser::query::ParseError) -> Self {
        ResolverError::Parse(e.to_string())
    }
}
