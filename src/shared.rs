//! # Shared Index
//!
//! [`SharedIndex`] wraps a [`VectorIndex`] in `Arc<RwLock<_>>` for callers that
//! write and query from several threads. Writes hold the write lock for the
//! whole replacement, so a concurrent query sees either the old vector or the
//! new one, never a mix.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use crate::errors::{EmbeddingStoreResult, ToLockError};
use crate::index::flat::BruteForce;
use crate::index::SearchBackend;
use crate::metric::{DistanceMetric, Element, Euclidean};
use crate::store::{Neighbor, VectorIndex};

/// Thread-safe handle to a [`VectorIndex`]. Clones share the same index.
#[derive(Debug)]
pub struct SharedIndex<K, T = f32, M = Euclidean, B = BruteForce> {
    inner: Arc<RwLock<VectorIndex<K, T, M, B>>>,
}

impl<K, T, M, B> Clone for SharedIndex<K, T, M, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T, M, B> From<VectorIndex<K, T, M, B>> for SharedIndex<K, T, M, B> {
    fn from(index: VectorIndex<K, T, M, B>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }
}

impl<K, T, M, B> SharedIndex<K, T, M, B>
where
    K: Eq + Hash + Clone,
    T: Element,
    M: DistanceMetric,
    B: SearchBackend,
{
    pub fn new(index: VectorIndex<K, T, M, B>) -> Self {
        Self::from(index)
    }

    pub fn set(&self, key: K, vector: Vec<T>) -> EmbeddingStoreResult<bool> {
        let mut index = self.inner.write().to_lock_error("set")?;
        index.set(key, vector)
    }

    pub fn approx_nearest(&self, query: &[T], k: usize) -> EmbeddingStoreResult<Vec<K>> {
        let index = self.inner.read().to_lock_error("approx_nearest")?;
        index.approx_nearest(query, k)
    }

    pub fn approx_nearest_with_distances(
        &self,
        query: &[T],
        k: usize,
    ) -> EmbeddingStoreResult<Vec<Neighbor<K>>> {
        let index = self.inner.read().to_lock_error("approx_nearest_with_distances")?;
        index.approx_nearest_with_distances(query, k)
    }

    /// Copy of the vector stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> EmbeddingStoreResult<Option<Vec<T>>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.inner.read().to_lock_error("get")?;
        Ok(index.get(key).map(<[T]>::to_vec))
    }

    pub fn remove<Q>(&self, key: &Q) -> EmbeddingStoreResult<Option<Vec<T>>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = self.inner.write().to_lock_error("remove")?;
        Ok(index.remove(key))
    }

    pub fn clear(&self) -> EmbeddingStoreResult<()> {
        let mut index = self.inner.write().to_lock_error("clear")?;
        index.clear();
        Ok(())
    }

    pub fn len(&self) -> EmbeddingStoreResult<usize> {
        let index = self.inner.read().to_lock_error("len")?;
        Ok(index.len())
    }

    pub fn is_empty(&self) -> EmbeddingStoreResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn dimension(&self) -> EmbeddingStoreResult<usize> {
        let index = self.inner.read().to_lock_error("dimension")?;
        Ok(index.dimension())
    }
}
