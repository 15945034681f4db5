use embeddingstore::*;
use std::sync::Once;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn abc_index() -> VectorIndex<&'static str, f32> {
    let mut index = VectorIndex::new(3).expect("dimension 3 is valid");
    index.set("a", vec![0.0, 1.0, 0.0]).unwrap();
    index.set("b", vec![1.0, 1.0, 0.0]).unwrap();
    index.set("c", vec![1.0, 0.0, 0.0]).unwrap();
    index
}

/// Deterministic pseudo-random vectors for property checks.
fn lcg_vectors(count: usize, dimension: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            (0..dimension)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    ((state >> 33) % 2001) as f64 / 100.0 - 10.0
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_nearest_single() {
    init_tracing();
    let index = abc_index();
    assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 1).unwrap(), vec!["a"]);
}

#[test]
fn test_nearest_multiple() {
    init_tracing();
    let index = abc_index();
    assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 2).unwrap(), vec!["a", "b"]);
}

#[test]
fn test_update_replaces_vector() {
    init_tracing();
    let mut index = abc_index();
    index.set("a", vec![0.0, -1.0, 0.0]).unwrap();

    assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 1).unwrap(), vec!["b"]);
    assert_eq!(index.len(), 3);
    assert_eq!(index.get("a"), Some(&[0.0f32, -1.0, 0.0][..]));
    // "a" is now the farthest entry, nothing of its old vector remains
    assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 3).unwrap(), vec!["b", "c", "a"]);
}

#[test]
fn test_empty_index_returns_nothing() {
    init_tracing();
    let index: VectorIndex<&str, f32> = VectorIndex::new(3).unwrap();
    assert!(index.approx_nearest(&[1.0, 2.0, 3.0], 5).unwrap().is_empty());
    assert!(index.is_empty());
}

#[test]
fn test_set_wrong_dimension_fails() {
    init_tracing();
    let mut index: VectorIndex<&str, f32> = VectorIndex::new(3).unwrap();
    let result = index.set("a", vec![1.0, 2.0, 3.0, 4.0]);

    assert!(matches!(
        result,
        Err(EmbeddingStoreError::DimensionMismatch { expected: 3, actual: 4 })
    ));
    assert!(index.is_empty());
}

#[test]
fn test_query_wrong_dimension_fails() {
    let index = abc_index();
    assert!(matches!(
        index.approx_nearest(&[1.0, 2.0, 3.0, 4.0], 1),
        Err(EmbeddingStoreError::DimensionMismatch { expected: 3, actual: 4 })
    ));
    assert!(index.approx_nearest(&[], 0).is_err());
}

#[test]
fn test_k_zero_and_k_beyond_len() {
    let index = abc_index();
    assert!(index.approx_nearest(&[0.0, 1.0, 0.0], 0).unwrap().is_empty());
    assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 50).unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_identical_vectors_tie_break_by_insertion() {
    let mut index = VectorIndex::new(2).unwrap();
    index.set("late", vec![5.0f64, 5.0]).unwrap();
    index.set("twin-1", vec![1.0, 1.0]).unwrap();
    index.set("twin-2", vec![1.0, 1.0]).unwrap();

    let first = index.approx_nearest(&[1.0, 1.0], 3).unwrap();
    assert_eq!(first, vec!["twin-1", "twin-2", "late"]);
    for _ in 0..10 {
        assert_eq!(index.approx_nearest(&[1.0, 1.0], 3).unwrap(), first);
    }
}

#[test]
fn test_results_sorted_and_truncated() {
    init_tracing();
    let vectors = lcg_vectors(200, 8, 42);
    let mut index = VectorIndex::new(8).unwrap();
    for (id, values) in vectors.iter().enumerate() {
        index.set(id as u64, values.clone()).unwrap();
    }

    for (qi, query) in lcg_vectors(20, 8, 7).iter().enumerate() {
        let k = qi * 13;
        let neighbors = index.approx_nearest_with_distances(query, k).unwrap();
        assert_eq!(neighbors.len(), k.min(index.len()));
        assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));

        // nothing left out is closer than the last returned neighbor
        if let Some(last) = neighbors.last() {
            let returned: Vec<u64> = neighbors.iter().map(|n| n.key).collect();
            for (id, values) in vectors.iter().enumerate() {
                if !returned.contains(&(id as u64)) {
                    assert!(Euclidean.distance(query, values) >= last.distance);
                }
            }
        }
    }
}

#[test]
fn test_every_vector_is_its_own_nearest() {
    let vectors = lcg_vectors(100, 4, 1234);
    let mut index = VectorIndex::new(4).unwrap();
    for (id, values) in vectors.iter().enumerate() {
        index.set(id, values.clone()).unwrap();
    }

    for (id, values) in vectors.iter().enumerate() {
        let nearest = index.approx_nearest_with_distances(values, 1).unwrap();
        assert_eq!(nearest[0].distance, 0.0);
        assert_eq!(nearest[0].key, id);
    }
}

#[test]
fn test_removed_key_never_returned() {
    let mut index = abc_index();
    index.remove("a");
    assert!(!index.contains_key("a"));
    assert_eq!(index.approx_nearest(&[0.0, 1.0, 0.0], 3).unwrap(), vec!["b", "c"]);
}

#[test]
fn test_index_from_config() {
    init_tracing();
    let config = IndexConfig::from_json(r#"{"dimension": 2, "metric": "cosine"}"#).unwrap();
    let mut index: VectorIndex<&str, f64, MetricKind> = VectorIndex::from_config(&config).unwrap();
    index.set("long", vec![100.0, 1.0]).unwrap();
    index.set("diagonal", vec![0.5, 0.5]).unwrap();

    assert_eq!(index.metric(), &MetricKind::Cosine);
    assert_eq!(index.approx_nearest(&[1.0, 0.0], 1).unwrap(), vec!["long"]);

    let bad = IndexConfig::new(0, MetricKind::Euclidean);
    assert!(matches!(
        VectorIndex::<&str, f64, MetricKind>::from_config(&bad),
        Err(EmbeddingStoreError::InvalidDimension)
    ));
}

#[test]
fn test_shared_index_concurrent_readers_and_writer() {
    init_tracing();
    let shared = SharedIndex::new(VectorIndex::new(4).unwrap());
    for key in 0..16u32 {
        shared.set(key, vec![key as f32; 4]).unwrap();
    }

    std::thread::scope(|scope| {
        let writer = shared.clone();
        scope.spawn(move || {
            for round in 0..200u32 {
                let value = if round % 2 == 0 { -100.0 } else { 100.0 };
                writer.set(0, vec![value; 4]).unwrap();
            }
        });

        for _ in 0..4 {
            let reader = shared.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    let vector = reader.get(&0).unwrap().unwrap();
                    assert!(vector.iter().all(|&v| v == vector[0]));
                    let nearest = reader.approx_nearest(&[8.0; 4], 16).unwrap();
                    assert_eq!(nearest.len(), 16);
                    assert_eq!(nearest[0], 8);
                }
            });
        }
    });

    assert_eq!(shared.get(&0).unwrap(), Some(vec![100.0; 4]));
}
