// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    collections::HashSet,
    fmt,
    fmt::Write as _,
};

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::Config,
    errs::SListError,
    skiplist::{
        level_generator::{
            CoinFlip,
            LevelGenerator,
        },
        skipnode::{
            NodeId,
            NodeStore,
            SkipNode,
        },
    },
};

/// A probabilistic ordered set laid out as a grid of `max_level` sorted,
/// doubly linked levels.
///
/// ```text
/// level 2:  -inf ─────────────────────► 5 ─────────► +inf
///             │                         │              │
/// level 1:  -inf ────────► 3 ─────────► 5 ─────────► +inf
///             │            │            │              │
/// level 0:  -inf ──► 1 ──► 3 ──► 4 ──► 5 ──► 8 ────► +inf
/// ```
///
/// Every level is bounded by a left and a right sentinel, and the sentinels
/// of adjacent levels are linked vertically into two spines. Each value owns a
/// tower of nodes from level 0 up to its height, one node per level.
///
/// Every lookup goes through a single search routine which counts the hops it
/// makes. The count accumulates over the list's lifetime in [`SList::cost`].
pub struct SList<T, G = CoinFlip> {
    store: NodeStore<T>,
    /// left sentinel of every level, bottom first
    heads: Vec<NodeId>,
    /// right sentinel of every level, bottom first
    tails: Vec<NodeId>,
    max_level: usize,
    cost: u64,
    generator: G,
}

impl<T: Ord + Clone> SList<T, CoinFlip> {
    /// An empty list with the default configuration and an entropy-seeded
    /// fair coin.
    pub fn new() -> Self {
        let config = Config::default();
        Self::from_parts(
            config.max_level(),
            CoinFlip::new(config.promotion_probability()),
        )
    }

    pub fn with_max_level(max_level: usize) -> Result<Self, SListError> {
        Self::with_config(Config::new(max_level))
    }

    pub fn with_config(config: Config) -> Result<Self, SListError> {
        config.validate()?;
        Ok(Self::from_parts(
            config.max_level(),
            CoinFlip::new(config.promotion_probability()),
        ))
    }

    /// Same as [`SList::with_config`], but tower heights are reproducible for a
    /// given `seed`.
    pub fn seeded(config: Config, seed: u64) -> Result<Self, SListError> {
        config.validate()?;
        Ok(Self::from_parts(
            config.max_level(),
            CoinFlip::seeded(config.promotion_probability(), seed),
        ))
    }
}

impl<T: Ord + Clone, G: LevelGenerator> SList<T, G> {
    /// An empty list which asks `generator` for every promotion decision.
    pub fn with_generator(max_level: usize, generator: G) -> Result<Self, SListError> {
        if max_level == 0 {
            return Err(SListError::InvalidMaxLevel(max_level));
        }
        Ok(Self::from_parts(max_level, generator))
    }

    fn from_parts(max_level: usize, generator: G) -> Self {
        let mut store = NodeStore::with_capacity(2 * max_level);
        let heads: Vec<NodeId> = (0..max_level)
            .map(|_| store.alloc(SkipNode::sentinel()))
            .collect();
        let tails: Vec<NodeId> = (0..max_level)
            .map(|_| store.alloc(SkipNode::sentinel()))
            .collect();

        let mut list = SList {
            store,
            heads,
            tails,
            max_level,
            cost: 0,
            generator,
        };
        list.link_spines();
        list
    }

    /// Connect the sentinels of every level directly to each other and stack
    /// same-role sentinels into the -inf and +inf spines.
    fn link_spines(&mut self) {
        for level in 0..self.max_level {
            let (head, tail) = (self.heads[level], self.tails[level]);
            let below = level.checked_sub(1);
            let above = (level + 1 < self.max_level).then_some(level + 1);

            let (head_down, head_up) = (below.map(|l| self.heads[l]), above.map(|l| self.heads[l]));
            let (tail_down, tail_up) = (below.map(|l| self.tails[l]), above.map(|l| self.tails[l]));

            let left = &mut self.store[head];
            left.prev = None;
            left.next = Some(tail);
            left.down = head_down;
            left.up = head_up;

            let right = &mut self.store[tail];
            right.next = None;
            right.prev = Some(head);
            right.down = tail_down;
            right.up = tail_up;
        }
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Cumulative number of hops made by every search since construction (or
    /// since the last [`SList::reset_cost`]).
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// The only way the counter ever goes down.
    pub fn reset_cost(&mut self) {
        self.cost = 0;
    }

    /// Counts level 0 on every call, the length is not cached.
    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut cursor = self.store[self.heads[0]].next;
        while let Some(id) = cursor {
            if self.store[id].is_right_sentinel() {
                break;
            }
            len += 1;
            cursor = self.store[id].next;
        }
        len
    }

    pub fn is_empty(&self) -> bool {
        self.store[self.heads[0]].next == Some(self.tails[0])
    }

    /// Return the first level 0 node whose value is `>= target`, or the level
    /// 0 right sentinel.
    ///
    /// Starting at the top left sentinel, move right while the next value is
    /// `<= target`, then drop a level, until level 0 is done. Finally step
    /// once more to the right unless already sitting on `target`. Every move
    /// adds one to the cost.
    fn search(&mut self, target: &T) -> NodeId {
        let mut current = self.heads[self.max_level - 1];
        loop {
            while let Some(next) = self.store[current].next {
                match &self.store[next].value {
                    | Some(value) if value <= target => {
                        current = next;
                        self.cost += 1;
                    },
                    | _ => break,
                }
            }
            match self.store[current].down {
                | Some(below) => {
                    current = below;
                    self.cost += 1;
                },
                | None => break,
            }
        }

        let node = &self.store[current];
        if node.is_left_sentinel() || node.value.as_ref().map_or(true, |v| v < target) {
            if let Some(next) = node.next {
                current = next;
                self.cost += 1;
            }
        }
        current
    }

    fn holds(&self, id: NodeId, value: &T) -> bool {
        self.store[id].value.as_ref() == Some(value)
    }

    /// `true` if `value` is in the list. Only the cost counter changes.
    #[instrument(level = "trace", skip_all)]
    pub fn find(&mut self, value: &T) -> bool {
        let anchor = self.search(value);
        self.holds(anchor, value)
    }

    /// Add `value`. Inserting a value which is already present does nothing.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: T) {
        let anchor = self.search(&value);
        if self.holds(anchor, &value) {
            trace!("duplicate insert ignored");
            return;
        }

        let mut below = self.store.alloc(SkipNode::new(value.clone()));
        let prev = self.store[anchor].prev.unwrap_or(self.heads[0]);
        self.splice_between(below, prev, anchor);

        let mut height = 1;
        while height < self.max_level && self.generator.promote() {
            let prev = self.predecessor_above(below, height);
            let next = self.store[prev].next.unwrap_or(self.tails[height]);

            let node = self.store.alloc(SkipNode::new(value.clone()));
            self.splice_between(node, prev, next);
            self.store[node].down = Some(below);
            self.store[below].up = Some(node);

            below = node;
            height += 1;
        }
        trace!(height, "tower built");
    }

    /// Walk left from `node` until a node that continues one level up is
    /// found and return that upper node. The left sentinel always continues
    /// upward below the top level, so the walk never leaves the row.
    fn predecessor_above(&self, node: NodeId, level: usize) -> NodeId {
        let mut cursor = self.store[node].prev;
        while let Some(id) = cursor {
            if let Some(up) = self.store[id].up {
                return up;
            }
            cursor = self.store[id].prev;
        }
        self.heads[level]
    }

    fn splice_between(&mut self, node: NodeId, prev: NodeId, next: NodeId) {
        self.store[node].prev = Some(prev);
        self.store[node].next = Some(next);
        self.store[prev].next = Some(node);
        self.store[next].prev = Some(node);
    }

    fn unlink(&mut self, node: NodeId) {
        let (prev, next) = (self.store[node].prev, self.store[node].next);
        if let Some(prev) = prev {
            self.store[prev].next = next;
        }
        if let Some(next) = next {
            self.store[next].prev = prev;
        }
    }

    /// Take `value` out of every level. Removing a missing value does nothing.
    #[instrument(level = "trace", skip_all)]
    pub fn remove(&mut self, value: &T) {
        let anchor = self.search(value);
        if !self.holds(anchor, value) {
            trace!("remove of absent value ignored");
            return;
        }

        let mut current = Some(anchor);
        while let Some(id) = current {
            self.unlink(id);
            current = self.store[id].up;
            self.store.free(id);
        }
    }

    /// Drop every value, leaving only the sentinels. The cost counter is kept.
    #[instrument(level = "trace", skip_all)]
    pub fn clear(&mut self) {
        let mut freed = 0;
        for level in 0..self.max_level {
            let mut cursor = self.store[self.heads[level]].next;
            while let Some(id) = cursor {
                if id == self.tails[level] {
                    break;
                }
                cursor = self.store[id].next;
                self.store.free(id);
                freed += 1;
            }
        }
        self.link_spines();
        debug!(freed, "cleared");
    }

    /// Replace the contents of `self` with the values of `source`.
    ///
    /// This is a value-wise rebuild: the values are inserted in ascending
    /// order, so tower heights are drawn again from `self`'s generator and
    /// need not match the source. The cost counter is then copied from
    /// `source`, discarding whatever the rebuild itself spent.
    #[instrument(level = "trace", skip_all)]
    pub fn assign<H: LevelGenerator>(&mut self, source: &SList<T, H>) {
        self.clear();
        for value in source.level_values(0) {
            self.insert(value.clone());
        }
        self.cost = source.cost;
        debug!(len = self.len(), cost = self.cost, "assigned");
    }

    /// The values stored at `level`, in order. Empty for a level that does not
    /// exist.
    pub fn level_values(&self, level: usize) -> Vec<&T> {
        let mut values = Vec::new();
        let Some(&head) = self.heads.get(level) else {
            return values;
        };
        let mut cursor = self.store[head].next;
        while let Some(id) = cursor {
            match &self.store[id].value {
                | Some(value) => values.push(value),
                | None => break,
            }
            cursor = self.store[id].next;
        }
        values
    }

    /// The number of levels `value` spans, or `None` if absent. This is a
    /// diagnostic and is not charged to the cost counter.
    pub fn height_of(&self, value: &T) -> Option<usize> {
        let mut cursor = self.store[self.heads[0]].next;
        while let Some(id) = cursor {
            match &self.store[id].value {
                | Some(v) if v < value => cursor = self.store[id].next,
                | Some(v) if v == value => {
                    let mut height = 1;
                    let mut node = id;
                    while let Some(up) = self.store[node].up {
                        height += 1;
                        node = up;
                    }
                    return Some(height);
                },
                | _ => return None,
            }
        }
        None
    }

    /// Check the structure of the whole grid.
    ///
    /// Every level must be strictly increasing and doubly linked, every tower
    /// contiguous from level 0, the sentinel spines intact, and the node store
    /// must hold nothing beyond what the grid links.
    pub fn validate(&self) -> Result<(), SListError> {
        let mut rows: Vec<HashSet<NodeId>> = Vec::with_capacity(self.max_level);

        for level in 0..self.max_level {
            let (head, tail) = (self.heads[level], self.tails[level]);
            let broken = SListError::BrokenLink { level };

            for (id, spine) in [(head, &self.heads), (tail, &self.tails)] {
                let node = &self.store[id];
                if !node.is_sentinel()
                    || node.down != level.checked_sub(1).map(|l| spine[l])
                    || node.up != spine.get(level + 1).copied()
                {
                    return Err(broken);
                }
            }
            if self.store[head].prev.is_some() {
                return Err(broken);
            }

            let mut row = HashSet::new();
            let mut last: Option<&T> = None;
            let mut current = head;
            loop {
                let Some(next) = self.store[current].next else {
                    return Err(broken);
                };
                if !self.store.contains(next) || self.store[next].prev != Some(current) {
                    return Err(broken);
                }
                if next == tail {
                    break;
                }
                let Some(value) = self.store[next].value.as_ref() else {
                    return Err(broken);
                };
                if last.is_some_and(|l| l >= value) {
                    return Err(SListError::UnsortedLevel { level });
                }
                last = Some(value);
                row.insert(next);
                current = next;
            }
            if self.store[tail].next.is_some() {
                return Err(broken);
            }
            rows.push(row);
        }

        for (level, row) in rows.iter().enumerate() {
            let tower = SListError::BrokenTower { level };
            for &id in row {
                let node = &self.store[id];
                match (level, node.down) {
                    | (0, None) => {},
                    | (0, Some(_)) | (_, None) => return Err(tower),
                    | (_, Some(down)) => {
                        if !self.store.contains(down)
                            || !rows[level - 1].contains(&down)
                            || self.store[down].up != Some(id)
                            || self.store[down].value != node.value
                        {
                            return Err(tower);
                        }
                    },
                }
                if let Some(up) = node.up {
                    if !rows.get(level + 1).is_some_and(|r| r.contains(&up)) {
                        return Err(tower);
                    }
                }
            }
        }

        let linked = 2 * self.max_level + rows.iter().map(HashSet::len).sum::<usize>();
        if linked != self.store.len() {
            return Err(SListError::LeakedNodes {
                live: self.store.len(),
                linked,
            });
        }
        Ok(())
    }
}

impl<T: Ord + Clone + fmt::Display, G: LevelGenerator> SList<T, G> {
    /// Render the grid column by column: one line per tower (plus the two
    /// spines), entries from level 0 upward. For debugging only, the format is
    /// not stable.
    pub fn debug_dump(&self) -> String {
        let mut out = String::from("contents:\n");
        let mut column = Some(self.heads[0]);
        while let Some(bottom) = column {
            let mut cell = Some(bottom);
            while let Some(id) = cell {
                let node = &self.store[id];
                let _ = match &node.value {
                    | Some(value) => write!(out, "{}\t", value),
                    | None if node.is_left_sentinel() => write!(out, "-inf\t"),
                    | None => write!(out, "+inf\t"),
                };
                cell = node.up;
            }
            out.push('\n');
            column = self.store[bottom].next;
        }
        out
    }
}

impl<T: Ord + Clone + fmt::Display, G: LevelGenerator> fmt::Display for SList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug_dump())
    }
}

impl<T: Ord + Clone + fmt::Debug, G: LevelGenerator> fmt::Debug for SList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SList")
            .field("max_level", &self.max_level)
            .field("cost", &self.cost)
            .field("values", &self.level_values(0))
            .finish()
    }
}

impl<T: Ord + Clone> Default for SList<T, CoinFlip> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy construction: an independent list with the same values and cost, but
/// freshly drawn tower heights.
impl<T: Ord + Clone, G: LevelGenerator + Clone> Clone for SList<T, G> {
    fn clone(&self) -> Self {
        let mut copy = Self::from_parts(self.max_level, self.generator.clone());
        copy.assign(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T: Ord + Clone, G: LevelGenerator> Extend<T> for SList<T, G> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for SList<T, CoinFlip> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SList::new();
        list.extend(iter);
        list
    }
}
