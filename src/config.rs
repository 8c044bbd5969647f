// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::SListError;

/// The default number of levels. Four levels keep the sentinel spines short
/// while still giving a visible speedup over a plain linked list for a few
/// thousand elements.
pub const DEFAULT_MAX_LEVEL: usize = 4;

/// A fair coin.
pub const DEFAULT_PROMOTION_PROBABILITY: f64 = 0.5;

/// Construction-time settings for an [`SList`].
///
/// [`SList`]: crate::SList
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// Number of levels in the grid, fixed for the lifetime of the list.
    max_level: usize,
    /// Chance that a tower grows by one more level on insertion.
    promotion_probability: f64,
}

impl Config {
    pub fn new(max_level: usize) -> Self {
        Config {
            max_level,
            ..Default::default()
        }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_promotion_probability(mut self, p: f64) -> Self {
        self.promotion_probability = p;
        self
    }

    pub fn validate(&self) -> Result<(), SListError> {
        if self.max_level == 0 {
            return Err(SListError::InvalidMaxLevel(self.max_level));
        }
        // also rejects NaN
        if !(self.promotion_probability > 0.0 && self.promotion_probability < 1.0) {
            return Err(SListError::InvalidProbability(self.promotion_probability));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            promotion_probability: DEFAULT_PROMOTION_PROBABILITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{
            Config,
            DEFAULT_MAX_LEVEL,
        },
        errs::SListError,
    };

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert_eq!(config.max_level(), DEFAULT_MAX_LEVEL);
        assert_eq!(config.promotion_probability(), 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_levels_rejected() {
        assert_eq!(
            Config::new(0).validate(),
            Err(SListError::InvalidMaxLevel(0))
        );
    }

    #[test]
    fn test_probability_bounds() {
        for p in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let config = Config::default().with_promotion_probability(p);
            assert!(
                matches!(config.validate(), Err(SListError::InvalidProbability(_))),
                "p = {} must be rejected",
                p
            );
        }
        assert!(Config::new(1)
            .with_promotion_probability(0.25)
            .validate()
            .is_ok());
    }
}
