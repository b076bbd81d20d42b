//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a slab of doubly linked nodes where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// Every key gets a stable slot on insertion, so touching or removing a
/// key by slot is O(1). Freed slots are reused.
#[derive(Debug)]
pub struct LruList<K> {
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<K> LruList<K> {
    // == Constructor ==
    /// Creates a new empty LRU list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Adds a key as most recently used and returns its slot.
    pub fn push_back(&mut self, key: K) -> usize {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_back(slot);
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the key in `slot` as most recently used.
    pub fn touch(&mut self, slot: usize) {
        if slot == self.tail || !self.is_occupied(slot) {
            return;
        }
        self.unlink(slot);
        self.link_back(slot);
    }

    // == Remove ==
    /// Removes the key in `slot`, returning it if the slot was occupied.
    pub fn remove(&mut self, slot: usize) -> Option<K> {
        let key = self.nodes.get_mut(slot)?.key.take()?;
        self.unlink(slot);
        self.free.push(slot);
        self.len -= 1;
        Some(key)
    }

    // == Pop Front ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<K> {
        if self.head == NIL {
            return None;
        }
        self.remove(self.head)
    }

    // == Clear ==
    /// Drops every key and releases all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates keys from least to most recently used.
    ///
    /// Call `.rev()` for most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    fn is_occupied(&self, slot: usize) -> bool {
        self.nodes.get(slot).is_some_and(|node| node.key.is_some())
    }

    fn link_back(&mut self, slot: usize) {
        self.nodes[slot].prev = self.tail;
        self.nodes[slot].next = NIL;
        if self.tail == NIL {
            self.head = slot;
        } else {
            self.nodes[self.tail].next = slot;
        }
        self.tail = slot;
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
    }
}

// == Iterator ==
/// Access-order iterator over an [`LruList`].
pub struct Iter<'a, K> {
    nodes: &'a [Node<K>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.key.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.key.as_ref()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &LruList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_lru_new() {
        let lru: LruList<String> = LruList::new();
        assert_eq!(lru.len(), 0);
        assert!(lru.iter().next().is_none());
    }

    #[test]
    fn test_lru_push_back_orders_oldest_first() {
        let mut lru = LruList::new();

        lru.push_back("key1");
        lru.push_back("key2");
        lru.push_back("key3");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.iter().next(), Some(&"key1"));
        assert_eq!(keys(&lru), vec!["key1", "key2", "key3"]);
    }

    #[test]
    fn test_lru_touch_moves_to_back() {
        let mut lru = LruList::new();

        let a = lru.push_back("a");
        lru.push_back("b");
        lru.push_back("c");

        lru.touch(a);

        assert_eq!(lru.iter().next(), Some(&"b"));
        assert_eq!(keys(&lru), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_lru_touch_tail_is_noop() {
        let mut lru = LruList::new();

        lru.push_back("a");
        let b = lru.push_back("b");
        lru.touch(b);

        assert_eq!(keys(&lru), vec!["a", "b"]);
    }

    #[test]
    fn test_lru_pop_front() {
        let mut lru = LruList::new();

        lru.push_back("key1");
        lru.push_back("key2");
        lru.push_back("key3");

        assert_eq!(lru.pop_front(), Some("key1"));
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.pop_front(), Some("key2"));
        assert_eq!(lru.pop_front(), Some("key3"));
        assert_eq!(lru.pop_front(), None);
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_remove_middle() {
        let mut lru = LruList::new();

        lru.push_back("key1");
        let key2 = lru.push_back("key2");
        lru.push_back("key3");

        assert_eq!(lru.remove(key2), Some("key2"));
        assert_eq!(lru.remove(key2), None);

        assert_eq!(lru.len(), 2);
        assert_eq!(keys(&lru), vec!["key1", "key3"]);
    }

    #[test]
    fn test_lru_slots_are_reused() {
        let mut lru = LruList::new();

        let a = lru.push_back("a");
        lru.push_back("b");
        lru.remove(a);
        let c = lru.push_back("c");

        assert_eq!(c, a);
        assert_eq!(keys(&lru), vec!["b", "c"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruList::new();

        let a = lru.push_back("a");
        let b = lru.push_back("b");
        let c = lru.push_back("c");

        lru.touch(a);
        lru.touch(c);
        lru.touch(b);

        assert_eq!(keys(&lru), vec!["a", "c", "b"]);
        assert_eq!(lru.pop_front(), Some("a"));
        assert_eq!(lru.pop_front(), Some("c"));
        assert_eq!(lru.pop_front(), Some("b"));
    }

    #[test]
    fn test_lru_reverse_iteration() {
        let mut lru = LruList::new();

        lru.push_back("a");
        lru.push_back("b");
        lru.push_back("c");

        let newest_first: Vec<_> = lru.iter().rev().copied().collect();
        assert_eq!(newest_first, vec!["c", "b", "a"]);
        assert_eq!(lru.iter().len(), 3);
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruList::new();

        lru.push_back("a");
        lru.push_back("b");
        lru.clear();

        assert_eq!(lru.len(), 0);
        assert_eq!(lru.iter().count(), 0);

        lru.push_back("c");
        assert_eq!(keys(&lru), vec!["c"]);
    }
}
