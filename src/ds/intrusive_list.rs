//! Doubly linked recency list stored in a [`SlotArena`].
//!
//! Nodes live in the arena and point at each other by [`SlotId`], so a caller
//! that keeps the id of a node can unlink or move it in O(1) without walking
//! the list.
//!
//! ```text
//!   head (most recent)                                tail (least recent)
//!     │                                                   │
//!     ▼                                                   ▼
//!   [id_4] ◄──► [id_1] ◄──► [id_7] ◄──► ... ◄──► [id_2]
//! ```
//!
//! Iteration runs in either direction: [`IntrusiveList::iter`] walks head to
//! tail, [`IntrusiveList::iter_rev`] walks tail to head.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list addressed by [`SlotId`].
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Walks the list from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            forward: true,
        }
    }

    /// Walks the list from tail to head.
    pub fn iter_rev(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.tail,
            forward: false,
        }
    }

    /// Inserts `value` at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(id);
        id
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks the node and frees its slot.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the head. Returns `false` for a stale id.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head != Some(id) {
            self.unlink(id);
            self.link_front(id);
        }
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the links and reports the first broken one.
    pub fn validate(&self) -> Result<(), String> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err(format!(
                    "list ends disagree: head={:?} tail={:?} len={}",
                    self.head,
                    self.tail,
                    self.len()
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| format!("linked node {:?} is vacant", id))?;
            if node.prev != prev {
                return Err(format!(
                    "node {:?} has prev {:?}, expected {:?}",
                    id, node.prev, prev
                ));
            }
            count += 1;
            if count > self.len() {
                return Err("list contains a cycle".to_string());
            }
            prev = Some(id);
            current = node.next;
        }

        if prev != self.tail {
            return Err(format!("walk ended at {:?}, tail is {:?}", prev, self.tail));
        }
        if count != self.len() {
            return Err(format!("walked {} nodes, arena holds {}", count, self.len()));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(msg) = self.validate() {
            panic!("intrusive list invariant violated: {}", msg);
        }
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values in either direction.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
    forward: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.current?)?;
        self.current = if self.forward { node.next } else { node.prev };
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_to_back<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(front_to_back(&list), vec![3, 2, 1]);
        assert_eq!(list.iter_rev().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.iter().next(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_from_middle_and_tail() {
        let mut list = IntrusiveList::with_capacity(4);
        let a = list.push_front("a");
        let b = list.push_front("b");
        let _c = list.push_front("c");

        assert!(list.move_to_front(b));
        assert_eq!(front_to_back(&list), vec!["b", "c", "a"]);
        assert!(list.move_to_front(a));
        assert_eq!(front_to_back(&list), vec!["a", "b", "c"]);
        assert!(list.move_to_front(a));
        assert_eq!(front_to_back(&list), vec!["a", "b", "c"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_relinks_neighbours() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(front_to_back(&list), vec![3, 1]);
        assert_eq!(list.remove(b), None);
        assert!(!list.move_to_front(b));

        assert_eq!(list.remove(c), Some(3));
        assert_eq!(list.head, Some(a));
        assert_eq!(list.tail, Some(a));
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_drains_oldest_first() {
        let mut list = IntrusiveList::new();
        for i in 0..4 {
            list.push_front(i);
        }
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_ends() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.head.is_none());
        assert!(list.back().is_none());
        assert_eq!(list.iter().count(), 0);
        assert!(list.validate().is_ok());
    }

    #[test]
    fn get_mut_edits_value() {
        let mut list = IntrusiveList::new();
        let id = list.push_front(10);
        *list.get_mut(id).unwrap() += 5;
        assert_eq!(list.get(id), Some(&15));
    }
}
