//! # Index Module
//!
//! Search backends rank the rows of a [`VectorIndex`](crate::VectorIndex)
//! against a query. The container owns keys and storage; a backend only sees
//! the contiguous row buffer and returns ranked slot numbers, so a different
//! backend can be dropped in without changing the container's contract.
//!
//! ## Available Backends
//!
//! ### BruteForce
//! - **Complexity**: O(n·d) search, O(n) auxiliary space
//! - **Accuracy**: exact
//!
//! ## Ranking Contract
//!
//! Results are ordered by ascending distance. Equal distances are ordered by
//! ascending slot, and NaN distances come after every other distance.

use std::cmp::Ordering;

use crate::metric::{DistanceMetric, Element};

pub mod flat;

/// A ranked row: its slot in the backing store and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub slot: usize,
    pub distance: f64,
}

impl Candidate {
    /// Total ranking order: distance first, then slot.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        compare_distance(self.distance, other.distance).then(self.slot.cmp(&other.slot))
    }
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

pub trait SearchBackend {
    /// Rank the rows of `data` (consecutive chunks of `query.len()` elements)
    /// against `query`, returning at most `k` candidates in ranking order.
    fn rank<T: Element, M: DistanceMetric>(
        &self,
        metric: &M,
        query: &[T],
        data: &[T],
        k: usize,
    ) -> Vec<Candidate>;
}
