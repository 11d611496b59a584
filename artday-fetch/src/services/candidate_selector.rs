//! Candidate selection
//!
//! Draws artwork ids uniformly from `1..=catalog_max_id`.

use crate::types::Candidate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform candidate source over the known catalog range
pub struct CandidateSelector {
    max_id: u32,
    rng: StdRng,
}

impl CandidateSelector {
    /// Selector seeded from OS entropy
    ///
    /// `max_id` is clamped to at least 1.
    pub fn new(max_id: u32) -> Self {
        Self::with_rng(max_id, StdRng::from_entropy())
    }

    /// Deterministic selector for reproducible runs
    pub fn seeded(max_id: u32, seed: u64) -> Self {
        Self::with_rng(max_id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_id: u32, rng: StdRng) -> Self {
        Self {
            max_id: max_id.max(1),
            rng,
        }
    }

    /// Upper bound of the candidate range
    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// Next candidate, uniform in `[1, max_id]`
    pub fn next_candidate(&mut self) -> Candidate {
        Candidate(self.rng.gen_range(1..=self.max_id))
    }
}
