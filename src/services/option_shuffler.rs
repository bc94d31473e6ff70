use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomIndex: Send + Sync {
    /// Returns an index drawn uniformly from `0..=upper`.
    fn index_up_to(&self, upper: usize) -> usize;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomIndex;

impl RandomIndex for ThreadRandomIndex {
    fn index_up_to(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..=upper)
    }
}

/// Reproducible generator, for callers that need a replayable ordering.
#[derive(Debug)]
pub struct SeededRandomIndex {
    rng: Mutex<StdRng>,
}

impl SeededRandomIndex {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomIndex for SeededRandomIndex {
    fn index_up_to(&self, upper: usize) -> usize {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(0..=upper)
    }
}

/// Fisher–Yates shuffle over an injected index source.
#[derive(Clone)]
pub struct OptionShuffler {
    source: Arc<dyn RandomIndex>,
}

impl OptionShuffler {
    pub fn new(source: Arc<dyn RandomIndex>) -> Self {
        Self { source }
    }

    pub fn shuffle<T>(&self, mut items: Vec<T>) -> Vec<T> {
        for i in (1..items.len()).rev() {
            let j = self.source.index_up_to(i);
            items.swap(i, j);
        }
        items
    }
}

impl Default for OptionShuffler {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandomIndex))
    }
}
