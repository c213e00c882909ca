//! Conditional parallel iteration for snapshot construction.
//!
//! Every snapshot is a pure function of the immutable table, so frames
//! can be built in parallel with no ordering requirement. Uses rayon
//! when the `parallel` feature is enabled.

use serde::{Deserialize, Serialize};

/// Controls whether snapshot construction fans out across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Enable parallel processing (requires the `parallel` feature).
    pub enabled: bool,

    /// Minimum item count to trigger parallel processing. Below this
    /// threshold, sequential is faster due to thread overhead.
    pub threshold: usize,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 16,
        }
    }
}

impl ParallelPolicy {
    /// Creates a policy that always stays sequential.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the parallel threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given
    /// count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && count >= self.threshold
    }
}

/// Maps a function over items, conditionally using parallel iteration.
/// Output order always matches input order.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], policy: &ParallelPolicy, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if policy.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map_preserves_order() {
        let policy = ParallelPolicy::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &policy, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_threshold() {
        let policy = ParallelPolicy::default().with_threshold(10);
        assert!(!policy.should_parallelize(5));
        // Only true when the feature is compiled in
        #[cfg(feature = "parallel")]
        assert!(policy.should_parallelize(50));
        #[cfg(not(feature = "parallel"))]
        assert!(!policy.should_parallelize(50));
    }

    #[test]
    fn test_sequential_never_parallelizes() {
        let policy = ParallelPolicy::sequential();
        assert!(!policy.should_parallelize(1_000));
    }
}
