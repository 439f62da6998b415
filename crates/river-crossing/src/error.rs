//! Configuration errors raised while building or loading an instance.
//!
//! Search outcomes are never errors: an unsolvable instance produces an
//! empty path and sentinel metrics (see [`crate::solver::SearchResult`]).

use thiserror::Error;

/// A malformed puzzle instance.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("instance has no items")]
    EmptyCatalog,

    #[error("instance has {count} items, at most {max} are supported")]
    TooManyItems { count: usize, max: usize },

    #[error("item names must not be empty")]
    EmptyItemName,

    #[error("item `{0}` appears more than once in the catalog")]
    DuplicateItem(String),

    #[error("forbidden pair references unknown item `{0}`")]
    UnknownPairItem(String),

    #[error("forbidden pair names `{0}` twice")]
    SelfPair(String),

    #[error("start assignment references unknown item `{0}`")]
    UnknownStartItem(String),

    #[error("unknown built-in instance `{0}`")]
    UnknownInstance(String),
}
