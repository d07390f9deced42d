//! The single source of nondeterminism in the engine.
//!
//! Random picks only happen as a last resort, when a search yields no candidate. Callers pass a
//! [`RandomSource`] in explicitly so tests can seed or script it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Picks a uniformly random element, `None` for an empty slice.
pub fn pick<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        None
    } else {
        items.get(rng.next_index(items.len()))
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        RngSource(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Always picks the first element.
    pub struct First;

    impl RandomSource for First {
        fn next_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    /// Fails the test when a fallback is taken.
    pub struct Forbidden;

    impl RandomSource for Forbidden {
        fn next_index(&mut self, len: usize) -> usize {
            panic!("unexpected random fallback over {} items", len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_from_empty_slice() {
        let empty: [u8; 0] = [];
        assert_eq!(pick(&mut RngSource::seeded(1), &empty), None);
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let items: Vec<u32> = (0..100).collect();
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);

        for _ in 0..20 {
            assert_eq!(pick(&mut a, &items), pick(&mut b, &items));
        }
    }

    #[test]
    fn picks_stay_in_bounds() {
        let items = [1, 2, 3];
        let mut rng = RngSource::seeded(7);

        for _ in 0..100 {
            assert!(pick(&mut rng, &items).is_some());
        }
    }
}
