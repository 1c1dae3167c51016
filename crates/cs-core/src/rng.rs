//! Seeded RNG for the behavior graph.
//!
//! The only random decision in the core is goal selection by
//! `GoalSelector::Random`.  It draws from one `SimRng` seeded from
//! `SimConfig::seed`, and agents are visited in ascending id order, so a
//! given seed always yields the same goal assignments.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Deterministic RNG owned by the FSM.  Not shared across threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Pick one candidate, or `None` when there are none.
    pub fn choose<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        candidates.choose(&mut self.0)
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SimRng")
    }
}
