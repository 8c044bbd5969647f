//! An in-memory probabilistic ordered set which counts how many hops its
//! searches make, so the amortized cost of a workload can be measured.
//!
//! ```rust
//! use slist::{
//!     Config,
//!     SList,
//! };
//!
//! let mut list: SList<u32> = SList::seeded(Config::default(), 7).unwrap();
//! for v in [5, 3, 8, 1] {
//!     list.insert(v);
//! }
//! assert!(list.find(&3));
//! assert!(!list.find(&9));
//! assert_eq!(list.len(), 4);
//!
//! let before = list.cost();
//! list.remove(&3);
//! assert!(list.cost() > before);
//! ```

/// Construction-time settings.
pub mod config;
/// The crate error type.
pub mod errs;
/// A [`skip list`] laid out as a grid of sentinel-bounded levels.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
pub mod skiplist;

pub use config::{
    Config,
    DEFAULT_MAX_LEVEL,
};
pub use errs::SListError;
pub use skiplist::{
    slist::SList,
    CoinFlip,
    LevelGenerator,
};
