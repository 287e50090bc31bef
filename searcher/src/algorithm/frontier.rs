//! Priority queue of node keys with lazy deletion.

use std::cmp::{Ord, Ordering, PartialOrd};
use std::collections::BinaryHeap;

use crate::algorithm::node::{Key, NodeId};

#[derive(Debug, Clone)]
pub(crate) struct Entry<C> {
    key: Key<C>,
    id: NodeId,
}

impl<C> Entry<C> {
    pub(crate) fn key(&self) -> &Key<C> {
        &self.key
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }
}

impl<C> PartialEq for Entry<C>
where
    C: PartialOrd,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C> Eq for Entry<C> where C: PartialOrd {}

impl<C> Ord for Entry<C>
where
    C: PartialOrd,
{
    // Reversed, so the smallest key sits on top of the max-heap. Keys
    // which do not compare (NaN costs) count as equal.
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .partial_cmp(&other.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.id.cmp(&other.id))
            .reverse()
    }
}

impl<C> PartialOrd for Entry<C>
where
    C: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-first heap of `(key, node)` entries.
///
/// Entries are never updated in place. A node whose key changes is pushed
/// again, and the owner discards entries which went stale when they reach
/// the top.
#[derive(Debug)]
pub(crate) struct Frontier<C> {
    heap: BinaryHeap<Entry<C>>,
    high_water: usize,
}

impl<C> Frontier<C>
where
    C: PartialOrd,
{
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    pub(crate) fn push(&mut self, key: Key<C>, id: NodeId) {
        self.heap.push(Entry { key, id });
        self.high_water = self.high_water.max(self.heap.len());
    }

    pub(crate) fn peek(&self) -> Option<&Entry<C>> {
        self.heap.peek()
    }

    pub(crate) fn pop(&mut self) -> Option<Entry<C>> {
        self.heap.pop()
    }

    /// Replace every entry, e.g. after all keys were recomputed.
    pub(crate) fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Key<C>, NodeId)>,
    {
        self.heap = entries
            .into_iter()
            .map(|(key, id)| Entry { key, id })
            .collect();
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Number of entries, stale ones included.
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest size the heap ever reached.
    pub(crate) fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<C> Default for Frontier<C>
where
    C: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::node::Visited;

    fn ids(n: usize) -> Vec<NodeId> {
        // NodeId is only minted by an arena.
        let mut visited: Visited<usize, (), u32> = Visited::new();
        (0..n)
            .map(|i| {
                visited.get_or_insert_with(&i, |id| crate::algorithm::node::Node {
                    id,
                    state: i,
                    action: None,
                    g: 0,
                    v: 0,
                    previous: None,
                    key: Key::new(0, 0),
                })
            })
            .collect()
    }

    #[test]
    fn smallest_key_first() {
        let id = ids(3);
        let mut frontier = Frontier::new();
        frontier.push(Key::new(5, 0), id[0]);
        frontier.push(Key::new(2, 9), id[1]);
        frontier.push(Key::new(2, 1), id[2]);

        let order: Vec<NodeId> = std::iter::from_fn(|| frontier.pop().map(|e| e.id())).collect();
        assert_eq!(order, vec![id[2], id[1], id[0]]);
    }

    #[test]
    fn ties_go_to_older_nodes() {
        let id = ids(3);
        let mut frontier = Frontier::new();
        frontier.push(Key::new(1.0, 1.0), id[2]);
        frontier.push(Key::new(1.0, 1.0), id[0]);
        frontier.push(Key::new(1.0, 1.0), id[1]);

        assert_eq!(frontier.pop().map(|e| e.id()), Some(id[0]));
        assert_eq!(frontier.pop().map(|e| e.id()), Some(id[1]));
        assert_eq!(frontier.pop().map(|e| e.id()), Some(id[2]));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn rebuild_keeps_high_water() {
        let id = ids(3);
        let mut frontier = Frontier::new();
        for (i, n) in id.iter().enumerate() {
            frontier.push(Key::new(i as u32, 0), *n);
        }
        frontier.push(Key::new(0, 0), id[2]);
        assert_eq!(frontier.len(), 4);

        frontier.rebuild(vec![(Key::new(7, 7), id[1])]);
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.high_water(), 4);
        assert_eq!(frontier.peek().map(|e| e.key()), Some(&Key::new(7, 7)));
    }
}
