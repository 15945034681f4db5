//! # Flat (Brute-Force) Backend
//!
//! Exact search: the query is compared against every stored row.
//!
//! ## Performance Characteristics
//!
//! - **Search Complexity**: O(n·d) distance work plus O(n + k log k) selection
//! - **Memory Usage**: one candidate per stored row while ranking
//! - **Accuracy**: 100% - exact search results
//!
//! Selection uses `select_nth_unstable_by` to isolate the `k` best candidates
//! before sorting only that prefix. Both steps use the total
//! [`Candidate::rank_cmp`] order, so the output does not depend on the
//! unstable algorithms' internal choices.

use crate::index::{Candidate, SearchBackend};
use crate::metric::{DistanceMetric, Element};

/// Exact brute-force backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl SearchBackend for BruteForce {
    fn rank<T: Element, M: DistanceMetric>(
        &self,
        metric: &M,
        query: &[T],
        data: &[T],
        k: usize,
    ) -> Vec<Candidate> {
        if k == 0 || query.is_empty() || data.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = data
            .chunks_exact(query.len())
            .enumerate()
            .map(|(slot, row)| Candidate {
                slot,
                distance: metric.distance(query, row),
            })
            .collect();

        if k < candidates.len() {
            candidates.select_nth_unstable_by(k, Candidate::rank_cmp);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(Candidate::rank_cmp);
        candidates
    }
}
