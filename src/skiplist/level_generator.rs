// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::{
    rngs::SmallRng,
    Rng,
    RngCore,
    SeedableRng,
};

/// Upon the insertion of a new value in the list, its tower is grown one level
/// at a time for as long as the `LevelGenerator` says so.
///
/// The list asks at most `max_level - 1` times per insertion and stops at the
/// first `false`, so a tower of height `h` costs `h` calls (or `h - 1` when it
/// hits the cap).
pub trait LevelGenerator {
    /// Flip the coin for one more level.
    fn promote(&mut self) -> bool;
}

/// Any closure works as a generator, which is handy for scripting exact tower
/// heights in tests.
impl<F> LevelGenerator for F
where
    F: FnMut() -> bool,
{
    fn promote(&mut self) -> bool {
        self()
    }
}

/// A biased coin backed by an injected random number generator.
///
/// With `p = 0.5` the chance that a tower reaches height greater than `k` is
/// `(1/2)^k`, truncated at the list's maximum level.
#[derive(Debug, Clone)]
pub struct CoinFlip<R = SmallRng> {
    p: f64,
    rng: R,
}

impl CoinFlip<SmallRng> {
    /// Create a coin with probability `p` of landing on "promote", seeded from
    /// system entropy.
    ///
    /// # Panics
    ///
    /// `p` must be between 0 and 1 (exclusive) and will panic otherwise.
    pub fn new(p: f64) -> Self {
        Self::with_rng(p, SmallRng::from_entropy())
    }

    /// A reproducible coin: the same `seed` always yields the same flips.
    ///
    /// # Panics
    ///
    /// See [`CoinFlip::new`].
    pub fn seeded(p: f64, seed: u64) -> Self {
        Self::with_rng(p, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> CoinFlip<R> {
    /// # Panics
    ///
    /// See [`CoinFlip::new`].
    pub fn with_rng(p: f64, rng: R) -> Self {
        if !(p > 0.0 && p < 1.0) {
            panic!("p must be in (0, 1).");
        }
        CoinFlip { p, rng }
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl<R: RngCore> LevelGenerator for CoinFlip<R> {
    #[inline]
    fn promote(&mut self) -> bool {
        self.rng.gen_bool(self.p)
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::mock::StepRng,
        rngs::SmallRng,
        SeedableRng,
    };

    use super::{
        CoinFlip,
        LevelGenerator,
    };

    #[test]
    #[should_panic]
    fn invalid_p_0() {
        CoinFlip::new(0.0);
    }

    #[test]
    #[should_panic]
    fn invalid_p_1() {
        CoinFlip::new(1.0);
    }

    #[test]
    fn new() {
        let coin = CoinFlip::new(0.5);
        assert_eq!(coin.probability(), 0.5);
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = CoinFlip::seeded(0.5, 42);
        let mut b = CoinFlip::seeded(0.5, 42);
        let left: Vec<bool> = (0..256).map(|_| a.promote()).collect();
        let right: Vec<bool> = (0..256).map(|_| b.promote()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn with_rng_accepts_any_rng() {
        let mut coin = CoinFlip::with_rng(0.5, SmallRng::seed_from_u64(7));
        let heads = (0..10_000).filter(|_| coin.promote()).count();
        // fair coin, wide tolerance
        assert!((4_500..5_500).contains(&heads), "got {} heads", heads);

        // a constant zero stream always lands below p
        let mut stuck = CoinFlip::with_rng(0.5, StepRng::new(0, 0));
        assert!((0..32).all(|_| stuck.promote()));
    }

    #[test]
    fn closures_are_generators() {
        let mut script = vec![true, false].into_iter();
        let mut generator = move || script.next().unwrap_or(false);
        assert!(generator.promote());
        assert!(!generator.promote());
        assert!(!generator.promote());
    }
}
