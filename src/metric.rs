//! # Distance Metrics
//!
//! Distance strategies used to rank stored vectors against a query. Every metric
//! returns a non-negative dissimilarity where lower means more similar, so a
//! single ascending sort ranks results for any of them.
//!
//! | metric             | formula                 |
//! |--------------------|-------------------------|
//! | `Euclidean`        | `sqrt(sum((a - b)^2))`  |
//! | `SquaredEuclidean` | `sum((a - b)^2)`        |
//! | `Manhattan`        | `sum(abs(a - b))`       |
//! | `Cosine`           | `1 - cos(a, b)`         |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EmbeddingStoreError;

/// Numeric element type a vector can be built from.
///
/// Anything that widens losslessly into `f64` qualifies: `f32`, `f64` and the
/// integer types up to 32 bits.
pub trait Element: Copy + Into<f64> {
    #[inline]
    fn to_f64(self) -> f64 {
        self.into()
    }
}

impl<T: Copy + Into<f64>> Element for T {}

/// A distance strategy over equal-length vectors.
///
/// Callers guarantee `a.len() == b.len()`; the index checks dimensions before
/// any metric is invoked.
pub trait DistanceMetric {
    fn distance<T: Element>(&self, a: &[T], b: &[T]) -> f64;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance<T: Element>(&self, a: &[T], b: &[T]) -> f64 {
        SquaredEuclidean.distance(a, b).sqrt()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// Euclidean distance without the final square root. Ranks identically to
/// [`Euclidean`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl DistanceMetric for SquaredEuclidean {
    fn distance<T: Element>(&self, a: &[T], b: &[T]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let d = x.to_f64() - y.to_f64();
                d * d
            })
            .sum()
    }

    fn name(&self) -> &'static str {
        "squared_euclidean"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance<T: Element>(&self, a: &[T], b: &[T]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x.to_f64() - y.to_f64()).abs())
            .sum()
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Cosine distance, `1 - cosine_similarity`. A zero vector has no direction,
/// so any comparison involving one yields `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cosine;

impl DistanceMetric for Cosine {
    fn distance<T: Element>(&self, a: &[T], b: &[T]) -> f64 {
        let (mut dot, mut norm_a_sq, mut norm_b_sq) = (0.0, 0.0, 0.0);

        for (&x, &y) in a.iter().zip(b.iter()) {
            let (x, y) = (x.to_f64(), y.to_f64());
            dot += x * y;
            norm_a_sq += x * x;
            norm_b_sq += y * y;
        }

        if norm_a_sq == 0.0 || norm_b_sq == 0.0 {
            return 1.0;
        }

        // rounding can push the similarity a hair outside [-1, 1]
        let similarity = (dot / (norm_a_sq.sqrt() * norm_b_sq.sqrt())).clamp(-1.0, 1.0);
        1.0 - similarity
    }

    fn name(&self) -> &'static str {
        "cosine"
    }
}

/// Runtime-selected metric, used when the metric comes from configuration.
///
/// `FromStr` and serde accept the same names: the snake_case variant names
/// plus `l2` and `l1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    #[default]
    #[serde(alias = "l2")]
    Euclidean,
    SquaredEuclidean,
    #[serde(alias = "l1")]
    Manhattan,
    Cosine,
}

impl DistanceMetric for MetricKind {
    fn distance<T: Element>(&self, a: &[T], b: &[T]) -> f64 {
        match self {
            MetricKind::Euclidean => Euclidean.distance(a, b),
            MetricKind::SquaredEuclidean => SquaredEuclidean.distance(a, b),
            MetricKind::Manhattan => Manhattan.distance(a, b),
            MetricKind::Cosine => Cosine.distance(a, b),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MetricKind::Euclidean => Euclidean.name(),
            MetricKind::SquaredEuclidean => SquaredEuclidean.name(),
            MetricKind::Manhattan => Manhattan.name(),
            MetricKind::Cosine => Cosine.name(),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = EmbeddingStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" | "l2" => Ok(MetricKind::Euclidean),
            "squared_euclidean" => Ok(MetricKind::SquaredEuclidean),
            "manhattan" | "l1" => Ok(MetricKind::Manhattan),
            "cosine" => Ok(MetricKind::Cosine),
            _ => Err(EmbeddingStoreError::InvalidMetric { metric: s.to_string() }),
        }
    }
}
