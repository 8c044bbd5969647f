// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SListError {
    #[error("max level must be at least 1, got {0}")]
    InvalidMaxLevel(usize),
    #[error("promotion probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("level {level} is not strictly increasing")]
    UnsortedLevel { level: usize },
    #[error("tower is not contiguous at level {level}")]
    BrokenTower { level: usize },
    #[error("horizontal or spine link is not reciprocal at level {level}")]
    BrokenLink { level: usize },
    #[error("node store holds {live} live nodes but the grid links {linked}")]
    LeakedNodes { live: usize, linked: usize },
}
