use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement: draws distinct indices in one pass, so it terminates no matter how
/// dense the board is.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomPlacer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MinePlacer for RandomPlacer {
    fn pick(&mut self, candidates: usize, count: usize) -> Vec<usize> {
        if count > candidates {
            log::warn!(
                "Requested {} mines but only {} candidates, placing all",
                count,
                candidates
            );
            return (0..candidates).collect();
        }
        rand::seq::index::sample(&mut self.rng, candidates, count).into_vec()
    }
}
