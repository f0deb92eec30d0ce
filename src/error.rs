use thiserror::Error;

/// Things that can go wrong when building a store. Missing records are not
/// errors; lookups report those with `Option` and deletes with `bool`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid configuration: a hash map needs at least one bucket, got {capacity}")]
    InvalidConfiguration { capacity: usize },
}
