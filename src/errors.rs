//! # Error Types Module
//!
//! Structured error types for embeddingstore operations. Every variant except
//! `LockError` is a caller-correctable input error; none of them is retryable.

use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Main error type for embeddingstore operations
#[derive(Error, Debug)]
pub enum EmbeddingStoreError {
    /// Vector length differs from the index dimension
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An index was configured with a zero dimension
    #[error("Invalid dimension: an index dimension must be at least 1")]
    InvalidDimension,

    /// Unknown distance metric name
    #[error("Invalid distance metric: {metric}. Must be 'euclidean', 'squared_euclidean', 'manhattan' or 'cosine'")]
    InvalidMetric { metric: String },

    /// Index configuration could not be parsed
    #[error("Invalid index configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Lock acquisition error
    #[error("Failed to acquire lock for {operation}")]
    LockError { operation: String },
}

impl EmbeddingStoreError {
    /// Whether the caller can fix this error by changing its input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EmbeddingStoreError::LockError { .. })
    }
}

/// Result type for embeddingstore operations
pub type EmbeddingStoreResult<T> = Result<T, EmbeddingStoreError>;

/// Helper trait for converting lock errors to EmbeddingStoreError
pub trait ToLockError<G> {
    fn to_lock_error(self, operation: &str) -> EmbeddingStoreResult<G>;
}

impl<'a, T> ToLockError<RwLockReadGuard<'a, T>>
    for Result<RwLockReadGuard<'a, T>, PoisonError<RwLockReadGuard<'a, T>>>
{
    fn to_lock_error(self, operation: &str) -> EmbeddingStoreResult<RwLockReadGuard<'a, T>> {
        self.map_err(|_| EmbeddingStoreError::LockError {
            operation: format!("read {}", operation),
        })
    }
}

impl<'a, T> ToLockError<RwLockWriteGuard<'a, T>>
    for Result<RwLockWriteGuard<'a, T>, PoisonError<RwLockWriteGuard<'a, T>>>
{
    fn to_lock_error(self, operation: &str) -> EmbeddingStoreResult<RwLockWriteGuard<'a, T>> {
        self.map_err(|_| EmbeddingStoreError::LockError {
            operation: format!("write {}", operation),
        })
    }
}
