//! # embeddingstore
//!
//! An in-memory keyed vector index. Vectors of one fixed dimension are stored
//! under unique keys, replaced wholesale by later writes to the same key, and
//! ranked exactly against a query vector.
//!
//! - [`VectorIndex`]: the index itself, generic over key, element type,
//!   [`DistanceMetric`] and [`SearchBackend`]
//! - [`SharedIndex`]: `Arc<RwLock<_>>` handle for multi-threaded callers
//! - [`IndexConfig`]: serde-backed runtime configuration
//!
//! # Examples
//!
//! ```rust
//! use embeddingstore::{IndexConfig, VectorIndex};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IndexConfig::from_json(r#"{ "dimension": 2, "metric": "manhattan" }"#)?;
//! let mut index: VectorIndex<String, f32, _> = VectorIndex::from_config(&config)?;
//!
//! index.set("left".to_string(), vec![-1.0, 0.0])?;
//! index.set("right".to_string(), vec![1.0, 0.0])?;
//!
//! assert_eq!(index.approx_nearest(&[0.9, 0.2], 1)?, vec!["right".to_string()]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod errors;
pub mod index;
pub mod metric;
pub mod shared;
pub mod store;

pub use config::IndexConfig;
pub use errors::{EmbeddingStoreError, EmbeddingStoreResult};
pub use index::flat::BruteForce;
pub use index::{Candidate, SearchBackend};
pub use metric::{Cosine, DistanceMetric, Element, Euclidean, Manhattan, MetricKind, SquaredEuclidean};
pub use shared::SharedIndex;
pub use store::{Neighbor, VectorIndex};

pub const DEFAULT_VECTOR_DIMENSION: usize = 768;
