use thiserror::Error;

use crate::Value;

/// Result type for grouping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`GroupedCollection`](crate::GroupedCollection) and
/// [`CountingGroupedCollection`](crate::CountingGroupedCollection).
///
/// Failures are reported immediately and never recovered internally. An
/// operation that fails leaves the collection exactly as it was: construction
/// returns no partial tree, and [`add`](crate::GroupedCollection::add) /
/// [`add_grouper`](crate::GroupedCollection::add_grouper) validate every key
/// before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grouper produced a [`Value`] that cannot serve as a bucket key
    /// (see [`Value::usable_as_key`]).
    #[error("value returned by grouper {grouper:?} is not usable as a bucket key")]
    UnhashableGrouperResult {
        /// Name of the offending grouper.
        grouper: String,
    },

    /// A bucket lookup failed: the key is absent, or the node is a leaf and
    /// has no buckets at all.
    #[error("bucket {key} not found")]
    KeyNotFound {
        /// The key that was looked up.
        key: Value,
    },
}
