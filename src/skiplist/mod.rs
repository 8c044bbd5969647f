//! A skip list which allows faster membership queries than a standard linked
//! list while keeping every level a plain doubly linked list.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the values, and each
//! level `n > 0` will contain a random subset of the values on level `n - 1`.
//! Here a value climbs one more level for every successful coin flip, so with a
//! fair coin a value reaches level `k` with probability `(1/2)^k`.
//!
//! Nodes live in an arena and refer to each other through handles, which keeps
//! the four-way linked grid free of shared ownership and unsafe code.
//!
//! The coin can be replaced through [`LevelGenerator`]: pass a seeded
//! [`CoinFlip`] or a closure for reproducible tower heights.

mod level_generator;
pub mod slist;
mod skipnode;

pub use level_generator::{
    CoinFlip,
    LevelGenerator,
};
