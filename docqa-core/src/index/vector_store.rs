//! In-memory vector store with brute-force cosine search

use std::cmp::Ordering;

/// Vectors kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

impl VectorStore {
    /// Every vector must be non-empty and share one dimension.
    pub fn new(vectors: Vec<Vec<f32>>) -> Result<Self, String> {
        let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);

        for (i, v) in vectors.iter().enumerate() {
            if v.is_empty() {
                return Err(format!("Embedding {} is empty", i));
            }
            if v.len() != dimension {
                return Err(format!(
                    "Embedding {} has dimension {}, expected {}",
                    i,
                    v.len(),
                    dimension
                ));
            }
        }

        Ok(Self { vectors, dimension })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Top `k` positions by cosine similarity, best first.
    ///
    /// Equal scores keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(query, v)))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| descending(a.1, b.1));
        scored.truncate(k);
        scored
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    let a = if a.is_nan() { f32::NEG_INFINITY } else { a };
    let b = if b.is_nan() { f32::NEG_INFINITY } else { b };
    // partial_cmp treats -0.0 and 0.0 as equal, total_cmp does not
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Cosine similarity; zero when either vector has no magnitude
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let store = VectorStore::new(vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ])
        .unwrap();

        let results = store.search(&[1.0, 0.1], 3);
        let order: Vec<usize> = results.iter().map(|(i, _)| *i).collect();

        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_search_ties_keep_insertion_order() {
        let store = VectorStore::new(vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![3.0, 0.0],
        ])
        .unwrap();

        let results = store.search(&[1.0, 0.0], 3);
        let order: Vec<usize> = results.iter().map(|(i, _)| *i).collect();

        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_signed_zero_scores_are_ties() {
        let store = VectorStore::new(vec![vec![-0.0, -1.0], vec![0.0, 1.0]]).unwrap();

        let results = store.search(&[1.0, 0.0], 2);
        let order: Vec<usize> = results.iter().map(|(i, _)| *i).collect();

        assert_eq!(results[0].1, results[1].1);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_nan_scores_sort_last() {
        let store = VectorStore::new(vec![vec![f32::NAN, 0.0], vec![1.0, 0.0]]).unwrap();

        let order: Vec<usize> = store.search(&[1.0, 0.0], 2).iter().map(|(i, _)| *i).collect();

        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_search_truncates_to_k() {
        let store = VectorStore::new((0..20).map(|i| vec![1.0, i as f32]).collect()).unwrap();

        assert_eq!(store.search(&[1.0, 1.0], 10).len(), 10);
        assert_eq!(store.search(&[1.0, 1.0], 50).len(), 20);
        assert!(store.search(&[1.0, 1.0], 0).is_empty());
    }

    #[test]
    fn test_new_rejects_inconsistent_dimensions() {
        let err = VectorStore::new(vec![vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(err.contains("dimension 1, expected 2"));

        let err = VectorStore::new(vec![vec![]]).unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn test_empty_store() {
        let store = VectorStore::default();

        assert!(store.is_empty());
        assert_eq!(store.dimension(), 0);
        assert!(store.search(&[1.0], 10).is_empty());
    }
}
