use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randoms in `[0, 1)`, injected so loop phases can be
/// pinned in tests.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`. Collapsed ranges return `min`.
    fn in_range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.next_f64() * (max - min)
    }
}

/// Default source for the page.
pub struct SeededRandom(SmallRng);

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::from_seed(42);
        let mut b = SeededRandom::from_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn in_range_stays_inside() {
        let mut rng = SeededRandom::from_seed(7);
        for _ in 0..1000 {
            let v = rng.in_range(2.0, 5.0);
            assert!((2.0..5.0).contains(&v));
        }
        assert_eq!(rng.in_range(3.0, 3.0), 3.0);
    }
}
