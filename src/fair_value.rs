//! Scalar Brownian random-walk fair-value process.

use rand_distr::{Distribution, StandardNormal};

/// `value ← value + sigma · Z`, `Z ~ N(0, 1)`, stepped once per
/// `FairValueUpdateEvent`.
///
/// Not tied to simulation time itself — it only tracks how many times
/// [`FairValue::step`] has been called, via whatever cadence the engine
/// schedules those events at.
#[derive(Debug, Clone, PartialEq)]
pub struct FairValue {
    value: f64,
    sigma: f64,
}

impl FairValue {
    /// A process starting at `initial` with the given step volatility.
    pub fn new(initial: f64, sigma: f64) -> Self {
        Self {
            value: initial,
            sigma,
        }
    }

    /// The current value.
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Draws one `N(0, 1)` increment and advances the walk.
    pub fn step(&mut self, rng: &mut impl rand::Rng) {
        let z: f64 = StandardNormal.sample(rng);
        self.value += self.sigma * z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_sigma_never_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut fv = FairValue::new(100.0, 0.0);
        for _ in 0..10 {
            fv.step(&mut rng);
        }
        assert_eq!(fv.get(), 100.0);
    }

    #[test]
    fn same_seed_produces_same_path() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        let mut a = FairValue::new(50.0, 2.0);
        let mut b = FairValue::new(50.0, 2.0);
        for _ in 0..20 {
            a.step(&mut rng_a);
            b.step(&mut rng_b);
        }
        assert_eq!(a.get(), b.get());
    }
}
