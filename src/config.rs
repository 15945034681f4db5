//! Runtime configuration for building a [`VectorIndex`](crate::VectorIndex).
//!
//! ```json
//! { "dimension": 768, "metric": "cosine" }
//! ```
//!
//! `metric` is optional and defaults to `euclidean`.

use serde::{Deserialize, Serialize};

use crate::errors::{EmbeddingStoreError, EmbeddingStoreResult};
use crate::metric::MetricKind;
use crate::DEFAULT_VECTOR_DIMENSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    pub dimension: usize,
    #[serde(default)]
    pub metric: MetricKind,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_VECTOR_DIMENSION,
            metric: MetricKind::default(),
        }
    }
}

impl IndexConfig {
    pub fn new(dimension: usize, metric: MetricKind) -> Self {
        Self { dimension, metric }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> EmbeddingStoreResult<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EmbeddingStoreResult<()> {
        if self.dimension == 0 {
            return Err(EmbeddingStoreError::InvalidDimension);
        }
        Ok(())
    }
}
