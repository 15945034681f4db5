//! # Vector Index
//!
//! [`VectorIndex`] maps unique keys to fixed-dimension vectors and answers
//! top-k nearest neighbor queries.
//!
//! Rows live in one contiguous buffer, addressed by slot. A key receives its
//! slot on first insertion and keeps it when its vector is replaced, which
//! gives queries a stable tie-break: equidistant keys come back in
//! first-insertion order.
//!
//! # Examples
//!
//! ```rust
//! use embeddingstore::VectorIndex;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut index = VectorIndex::new(3)?;
//! index.set("a", vec![0.0, 1.0, 0.0])?;
//! index.set("b", vec![1.0, 1.0, 0.0])?;
//! index.set("c", vec![1.0, 0.0, 0.0])?;
//!
//! assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 2)?, vec!["a", "b"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::config::IndexConfig;
use crate::errors::{EmbeddingStoreError, EmbeddingStoreResult};
use crate::index::flat::BruteForce;
use crate::index::SearchBackend;
use crate::metric::{DistanceMetric, Element, Euclidean, MetricKind};

/// A query result carrying the distance alongside the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<K> {
    pub key: K,
    pub distance: f64,
}

/// Keyed vector index with exact nearest neighbor search.
///
/// Generic over the key type `K`, the element type `T`, the distance metric
/// `M` and the search backend `B`. Reads take `&self` and never mutate, so
/// wrapping the index in a `RwLock` (see [`SharedIndex`](crate::SharedIndex))
/// is enough for concurrent use.
#[derive(Debug, Clone)]
pub struct VectorIndex<K, T = f32, M = Euclidean, B = BruteForce> {
    dim: usize,
    metric: M,
    backend: B,
    /// Key stored in each slot
    keys: Vec<K>,
    /// Slot of each key
    slots: HashMap<K, usize>,
    /// Row-major vectors, `dim` elements per slot
    data: Vec<T>,
}

impl<K, T> VectorIndex<K, T, Euclidean, BruteForce>
where
    K: Eq + Hash + Clone,
    T: Element,
{
    /// Create an empty index ranking by Euclidean distance.
    pub fn new(dimension: usize) -> EmbeddingStoreResult<Self> {
        Self::with_metric(dimension, Euclidean)
    }
}

impl<K, T, M> VectorIndex<K, T, M, BruteForce>
where
    K: Eq + Hash + Clone,
    T: Element,
    M: DistanceMetric,
{
    pub fn with_metric(dimension: usize, metric: M) -> EmbeddingStoreResult<Self> {
        Self::with_backend(dimension, metric, BruteForce)
    }
}

impl<K, T> VectorIndex<K, T, MetricKind, BruteForce>
where
    K: Eq + Hash + Clone,
    T: Element,
{
    /// Create an empty index from runtime configuration.
    pub fn from_config(config: &IndexConfig) -> EmbeddingStoreResult<Self> {
        config.validate()?;
        Self::with_metric(config.dimension, config.metric)
    }
}

impl<K, T, M, B> VectorIndex<K, T, M, B>
where
    K: Eq + Hash + Clone,
    T: Element,
    M: DistanceMetric,
    B: SearchBackend,
{
    pub fn with_backend(dimension: usize, metric: M, backend: B) -> EmbeddingStoreResult<Self> {
        if dimension == 0 {
            return Err(EmbeddingStoreError::InvalidDimension);
        }
        debug!(dimension, metric = metric.name(), "created vector index");
        Ok(Self {
            dim: dimension,
            metric,
            backend,
            keys: Vec::new(),
            slots: HashMap::new(),
            data: Vec::new(),
        })
    }

    /// Insert `vector` under `key`, replacing any vector already stored there.
    ///
    /// Returns `true` when an existing entry was replaced. On a dimension
    /// mismatch the index is left untouched.
    pub fn set(&mut self, key: K, vector: Vec<T>) -> EmbeddingStoreResult<bool> {
        self.check_dimension(vector.len(), "set")?;

        let replaced = match self.slots.get(&key).copied() {
            Some(slot) => {
                let start = slot * self.dim;
                self.data[start..start + self.dim].copy_from_slice(&vector);
                true
            }
            None => {
                self.slots.insert(key.clone(), self.keys.len());
                self.keys.push(key);
                self.data.extend_from_slice(&vector);
                false
            }
        };

        debug!(replaced, entries = self.keys.len(), "set vector");
        Ok(replaced)
    }

    /// Keys of the `k` stored vectors closest to `query`, nearest first.
    ///
    /// Returns fewer than `k` keys when the index holds fewer entries.
    pub fn approx_nearest(&self, query: &[T], k: usize) -> EmbeddingStoreResult<Vec<K>> {
        Ok(self
            .approx_nearest_with_distances(query, k)?
            .into_iter()
            .map(|neighbor| neighbor.key)
            .collect())
    }

    /// Like [`approx_nearest`](Self::approx_nearest), keeping each distance.
    pub fn approx_nearest_with_distances(
        &self,
        query: &[T],
        k: usize,
    ) -> EmbeddingStoreResult<Vec<Neighbor<K>>> {
        self.check_dimension(query.len(), "approx_nearest")?;

        let ranked = self.backend.rank(&self.metric, query, &self.data, k);
        trace!(k, entries = self.keys.len(), returned = ranked.len(), "ranked query");

        Ok(ranked
            .into_iter()
            .map(|candidate| Neighbor {
                key: self.keys[candidate.slot].clone(),
                distance: candidate.distance,
            })
            .collect())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[T]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).map(|&slot| self.row(slot))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    /// Remove `key`, returning its vector. Remaining entries keep their
    /// relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Vec<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slots.remove(key)?;
        self.keys.remove(slot);
        let start = slot * self.dim;
        let vector: Vec<T> = self.data.drain(start..start + self.dim).collect();
        for other in self.slots.values_mut() {
            if *other > slot {
                *other -= 1;
            }
        }

        debug!(entries = self.keys.len(), "removed vector");
        Some(vector)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.slots.clear();
        self.data.clear();
    }

    /// Keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.keys.iter().zip(self.data.chunks_exact(self.dim))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    fn row(&self, slot: usize) -> &[T] {
        let start = slot * self.dim;
        &self.data[start..start + self.dim]
    }

    fn check_dimension(&self, actual: usize, operation: &'static str) -> EmbeddingStoreResult<()> {
        if actual != self.dim {
            warn!(operation, expected = self.dim, actual, "rejected vector with wrong dimension");
            return Err(EmbeddingStoreError::DimensionMismatch {
                expected: self.dim,
                actual,
            });
        }
        Ok(())
    }
}
