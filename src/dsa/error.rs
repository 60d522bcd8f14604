//! Container contract-violation errors.

/// Errors raised when a container contract is violated.
///
/// Ordinary "not found" lookups are not errors - they return `Option` or
/// `bool`. These variants mark caller mistakes: indexing past the end or
/// draining an empty heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DsaError {
    /// Index is at or past the current length.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Pop or peek on an empty container.
    #[error("container is empty")]
    EmptyContainer,
}
