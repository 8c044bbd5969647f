// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::ops::{
    Index,
    IndexMut,
};

/// A stable handle to a node inside a [`NodeStore`]. Handles stay valid until
/// the node is freed; a freed slot may later be handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// One cell of the level grid.
///
/// Sentinels carry no value. The left sentinel of a level is the only node
/// without a `prev`, the right sentinel the only node without a `next`.
#[derive(Debug, Clone)]
pub(crate) struct SkipNode<T> {
    pub(crate) value: Option<T>,
    pub(crate) next: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) up: Option<NodeId>,
    pub(crate) down: Option<NodeId>,
}

impl<T> SkipNode<T> {
    pub(crate) fn sentinel() -> Self {
        SkipNode {
            value: None,
            next: None,
            prev: None,
            up: None,
            down: None,
        }
    }

    pub(crate) fn new(value: T) -> Self {
        SkipNode {
            value: Some(value),
            ..Self::sentinel()
        }
    }

    #[inline]
    pub(crate) fn is_sentinel(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    pub(crate) fn is_left_sentinel(&self) -> bool {
        self.prev.is_none()
    }

    #[inline]
    pub(crate) fn is_right_sentinel(&self) -> bool {
        self.next.is_none()
    }
}

/// Owns every node of one list. Freed slots go on a free list and are reused
/// before the slot vector grows.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore<T> {
    slots: Vec<Option<SkipNode<T>>>,
    free: Vec<NodeId>,
    live: usize,
}

impl<T> NodeStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        NodeStore {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn alloc(&mut self, node: SkipNode<T>) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            | Some(id) => {
                self.slots[id.0] = Some(node);
                id
            },
            | None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            },
        }
    }

    /// Release a node and hand back whatever it held. Freeing an already freed
    /// handle is a no-op.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<T> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        self.live -= 1;
        node.value
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Number of live nodes, sentinels included.
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}

impl<T> Index<NodeId> for NodeStore<T> {
    type Output = SkipNode<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id.0) {
            | Some(Some(node)) => node,
            | _ => panic!("dangling node handle {:?}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeStore<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id.0) {
            | Some(Some(node)) => node,
            | _ => panic!("dangling node handle {:?}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        NodeStore,
        SkipNode,
    };

    #[test]
    fn test_alloc_and_free() {
        let mut store = NodeStore::with_capacity(4);
        let left = store.alloc(SkipNode::<u32>::sentinel());
        let five = store.alloc(SkipNode::new(5));
        assert_eq!(store.len(), 2);
        assert!(store[left].is_sentinel());
        assert_eq!(store[five].value, Some(5));

        assert_eq!(store.free(five), Some(5));
        assert_eq!(store.len(), 1);
        assert!(!store.contains(five));

        // double free is ignored
        assert_eq!(store.free(five), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut store = NodeStore::with_capacity(0);
        let a = store.alloc(SkipNode::new(1));
        let _b = store.alloc(SkipNode::new(2));
        store.free(a);
        let c = store.alloc(SkipNode::new(3));
        assert_eq!(a, c, "freed slot must be handed out first");
        assert_eq!(store[c].value, Some(3));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sentinel_roles() {
        let mut store = NodeStore::with_capacity(2);
        let left = store.alloc(SkipNode::<u8>::sentinel());
        let right = store.alloc(SkipNode::sentinel());
        store[left].next = Some(right);
        store[right].prev = Some(left);
        assert!(store[left].is_left_sentinel());
        assert!(!store[left].is_right_sentinel());
        assert!(store[right].is_right_sentinel());
        assert!(!store[right].is_left_sentinel());
    }

    #[test]
    #[should_panic]
    fn test_dangling_handle_panics() {
        let mut store = NodeStore::with_capacity(1);
        let id = store.alloc(SkipNode::new(1u8));
        store.free(id);
        let _ = &store[id];
    }
}
