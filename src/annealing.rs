//! Simulated annealing over segment reversals.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::solver::CancelFlag;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingOptions {
    /// Number of proposed moves.
    pub iterations: usize,
    /// Starting temperature, in kilometers of tolerated worsening.
    pub initial_temperature: f64,
    /// Multiplied into the temperature after every iteration.
    pub cooling: f64,
    /// Lower bound used in the acceptance exponent.
    pub min_temperature: f64,
}

impl Default for AnnealingOptions {
    fn default() -> Self {
        Self {
            iterations: 2500,
            initial_temperature: 0.5,
            cooling: 0.999,
            min_temperature: 1e-9,
        }
    }
}

/// Anneals from `seed` and returns the best order seen with its cost.
///
/// The returned cost is never above the seed's. Tours shorter than four
/// stops have no interior segment to reverse and come back unchanged.
pub fn anneal<R: Rng + ?Sized>(
    seed: &[usize],
    model: &CostModel,
    options: &AnnealingOptions,
    rng: &mut R,
    cancel: Option<&CancelFlag>,
) -> (Vec<usize>, f64) {
    let mut best = seed.to_vec();
    let mut best_cost = model.cost(&best);

    let n = seed.len();
    if n < 4 {
        return (best, best_cost);
    }

    let mut current = best.clone();
    let mut current_cost = best_cost;
    let mut temperature = options.initial_temperature;
    let mut accepted = 0usize;

    for iteration in 0..options.iterations {
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            tracing::warn!(iteration, "annealing cancelled, returning best so far");
            break;
        }

        let i = rng.gen_range(1..=n - 3);
        let k = rng.gen_range(i + 1..=n - 2);

        current[i..=k].reverse();
        let candidate_cost = model.cost(&current);
        let delta = candidate_cost - current_cost;

        if delta < 0.0
            || rng.r#gen::<f64>() < (-delta / temperature.max(options.min_temperature)).exp()
        {
            current_cost = candidate_cost;
            accepted += 1;
            if current_cost < best_cost {
                best.copy_from_slice(&current);
                best_cost = current_cost;
            }
        } else {
            current[i..=k].reverse();
        }

        temperature *= options.cooling;
    }

    tracing::trace!(accepted, best_cost, "annealing finished");
    (best, best_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::Haversine;
    use crate::model::{Anchor, Topology, is_permutation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ring(n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let theta = i as f64 / n as f64 * std::f64::consts::TAU;
                (43.65 + 0.01 * theta.sin(), -79.38 + 0.01 * theta.cos())
            })
            .collect()
    }

    #[test]
    fn test_never_worse_than_seed() {
        let locations = ring(10);
        let m = CostModel::new(&locations, None, Topology::closed_loop(), &Haversine).unwrap();
        let seed = vec![0, 5, 1, 6, 2, 7, 3, 8, 4, 9];
        let seed_cost = m.cost(&seed);

        for s in 0..5 {
            let mut rng = StdRng::seed_from_u64(s);
            let (best, cost) = anneal(&seed, &m, &AnnealingOptions::default(), &mut rng, None);
            assert!(is_permutation(&best, 10));
            assert!(cost <= seed_cost);
            assert_eq!(cost, m.cost(&best));
            assert_eq!(best[0], seed[0]);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let locations = ring(8);
        let anchor = Anchor::new(43.65, -79.38);
        let m = CostModel::new(&locations, Some(anchor), Topology::round_trip_from_anchor(), &Haversine).unwrap();
        let seed = vec![7, 1, 3, 5, 0, 2, 4, 6];

        let a = anneal(&seed, &m, &AnnealingOptions::default(), &mut StdRng::seed_from_u64(42), None);
        let b = anneal(&seed, &m, &AnnealingOptions::default(), &mut StdRng::seed_from_u64(42), None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_tours_returned_unchanged() {
        let locations = ring(3);
        let m = CostModel::new(&locations, None, Topology::open_path(), &Haversine).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let (best, cost) = anneal(&[2, 0, 1], &m, &AnnealingOptions::default(), &mut rng, None);
        assert_eq!(best, vec![2, 0, 1]);
        assert_eq!(cost, m.cost(&[2, 0, 1]));
    }

    #[test]
    fn test_zero_iterations_returns_seed() {
        let locations = ring(6);
        let m = CostModel::new(&locations, None, Topology::closed_loop(), &Haversine).unwrap();
        let options = AnnealingOptions {
            iterations: 0,
            ..AnnealingOptions::default()
        };
        let seed = vec![0, 3, 1, 4, 2, 5];
        let (best, _) = anneal(&seed, &m, &options, &mut StdRng::seed_from_u64(3), None);
        assert_eq!(best, seed);
    }

    #[test]
    fn test_cancelled_before_start_returns_seed() {
        let locations = ring(6);
        let m = CostModel::new(&locations, None, Topology::closed_loop(), &Haversine).unwrap();
        let cancel = CancelFlag::new();
        cancel.cancel();
        let seed = vec![0, 3, 1, 4, 2, 5];
        let (best, cost) = anneal(&seed, &m, &AnnealingOptions::default(), &mut StdRng::seed_from_u64(3), Some(&cancel));
        assert_eq!(best, seed);
        assert_eq!(cost, m.cost(&seed));
    }

    /// Replays a fixed list of 64-bit words.
    ///
    /// `gen_range` over a two-value range maps 0 to the low end and 2^63 to
    /// the high end; `gen::<f64>()` maps 0 to 0.0 and `u64::MAX` to just
    /// under 1.0.
    struct ScriptedRng {
        words: Vec<u64>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(words: &[u64]) -> Self {
            Self {
                words: words.to_vec(),
                next: 0,
            }
        }
    }

    impl rand::RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let word = self.words[self.next];
            self.next += 1;
            word
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    const HIGH: u64 = 1 << 63;
    // Reverse positions 2..=3, then 1..=3.
    const SWAP_TAIL: [u64; 2] = [HIGH, 0];
    const REVERSE_MIDDLE: [u64; 2] = [0, HIGH];
    const ACCEPT: u64 = 0;
    const REJECT: u64 = u64::MAX;

    /// Identity order costs 13.06 km. Swapping the tail gives 15.92 km,
    /// reversing the middle gives 16.20 km, and doing both in that order
    /// gives [0, 2, 3, 1, 4] at 10.45 km.
    fn uphill_model() -> CostModel {
        let locations = vec![
            (43.69, -79.34),
            (43.67, -79.38),
            (43.69, -79.35),
            (43.65, -79.38),
            (43.65, -79.37),
        ];
        CostModel::new(&locations, None, Topology::open_path(), &Haversine).unwrap()
    }

    fn script(steps: &[&[u64]]) -> ScriptedRng {
        ScriptedRng::new(&steps.concat())
    }

    #[test]
    fn test_low_draw_accepts_worsening_move() {
        let m = uphill_model();
        let seed = vec![0, 1, 2, 3, 4];
        let options = AnnealingOptions {
            iterations: 2,
            ..AnnealingOptions::default()
        };

        // The second move only improves on the worse tour the first produced.
        let mut rng = script(&[&SWAP_TAIL, &[ACCEPT], &REVERSE_MIDDLE]);
        let (best, cost) = anneal(&seed, &m, &options, &mut rng, None);
        assert_eq!(best, vec![0, 2, 3, 1, 4]);
        assert_eq!(cost, m.cost(&best));
        assert!(cost < m.cost(&seed));
    }

    #[test]
    fn test_worsening_move_alone_keeps_best() {
        let m = uphill_model();
        let seed = vec![0, 1, 2, 3, 4];
        let options = AnnealingOptions {
            iterations: 1,
            ..AnnealingOptions::default()
        };

        let mut rng = script(&[&SWAP_TAIL, &[ACCEPT]]);
        let (best, cost) = anneal(&seed, &m, &options, &mut rng, None);
        assert_eq!(best, seed);
        assert_eq!(cost, m.cost(&seed));
    }

    #[test]
    fn test_high_draw_at_low_temperature_rejects() {
        let m = uphill_model();
        let seed = vec![0, 1, 2, 3, 4];
        let options = AnnealingOptions {
            iterations: 2,
            initial_temperature: 1e-12,
            ..AnnealingOptions::default()
        };

        let mut rng = script(&[&SWAP_TAIL, &[REJECT], &REVERSE_MIDDLE, &[REJECT]]);
        let (best, _) = anneal(&seed, &m, &options, &mut rng, None);
        assert_eq!(best, seed);
    }

    #[test]
    fn test_cooling_closes_the_acceptance_window() {
        let m = uphill_model();
        let seed = vec![0, 1, 2, 3, 4];
        let steps: [&[u64]; 6] = [
            &SWAP_TAIL,
            &[REJECT],
            &SWAP_TAIL,
            &[ACCEPT],
            &REVERSE_MIDDLE,
            &[ACCEPT],
        ];

        let hot = AnnealingOptions {
            iterations: 3,
            initial_temperature: 1e6,
            cooling: 1.0,
            ..AnnealingOptions::default()
        };
        let (best, _) = anneal(&seed, &m, &hot, &mut script(&steps), None);
        assert_eq!(best, vec![0, 2, 3, 1, 4]);

        // After one iteration the temperature sits at the floor and the
        // same draws no longer let the tour climb.
        let frozen = AnnealingOptions { cooling: 0.0, ..hot };
        let (best, _) = anneal(&seed, &m, &frozen, &mut script(&steps), None);
        assert_eq!(best, seed);
    }
}
