//! Search nodes and the arena which memoizes them by state.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Index, IndexMut};

/// Stable handle to a node in a [Visited] arena.
///
/// Handles are handed out in creation order, which also makes them a
/// deterministic tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordering key of a node, compared lexicographically.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Key<C> {
    first: C,
    second: C,
}

impl<C> Key<C> {
    pub fn new(first: C, second: C) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &C {
        &self.first
    }

    pub fn second(&self) -> &C {
        &self.second
    }
}

/// A node of the AD* search.
///
/// `g` is the one-step-lookahead cost-to-come and `v` the cost the node
/// had when it was last expanded. A node is over-consistent when `v > g`
/// and consistent when they are equal.
#[derive(Debug, Clone)]
pub struct Node<S, A, C> {
    pub(crate) id: NodeId,
    pub(crate) state: S,
    pub(crate) action: Option<A>,
    pub(crate) g: C,
    pub(crate) v: C,
    pub(crate) previous: Option<NodeId>,
    pub(crate) key: Key<C>,
}

impl<S, A, C> Node<S, A, C>
where
    C: PartialOrd,
{
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Action of the transition which currently leads to this node.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn g(&self) -> &C {
        &self.g
    }

    pub fn v(&self) -> &C {
        &self.v
    }

    pub fn key(&self) -> &Key<C> {
        &self.key
    }

    /// Backpointer towards the start node.
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// `v > g`: a cheaper path was found since the last expansion.
    pub fn is_over_consistent(&self) -> bool {
        self.v > self.g
    }

    /// `v < g`: the settled value is no longer backed by a path.
    pub fn is_under_consistent(&self) -> bool {
        self.v < self.g
    }

    /// `v == g`
    pub fn is_consistent(&self) -> bool {
        self.v == self.g
    }
}

/// Every node ever created by a search, keyed by state.
///
/// OPEN, CLOSED and INCONS are sets of [NodeId] into this arena.
#[derive(Debug)]
pub struct Visited<S, A, C>
where
    S: Hash + Eq,
{
    nodes: Vec<Node<S, A, C>>,
    index: HashMap<S, NodeId>,
}

impl<S, A, C> Visited<S, A, C>
where
    S: Debug + Clone + Hash + Eq,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    /// Look up the node for `state`, building it with `make` the first
    /// time the state is seen.
    pub fn get_or_insert_with<F>(&mut self, state: &S, make: F) -> NodeId
    where
        F: FnOnce(NodeId) -> Node<S, A, C>,
    {
        if let Some(id) = self.get(state) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(make(id));
        self.index.insert(state.clone(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node<S, A, C>> {
        self.nodes.iter()
    }
}

impl<S, A, C> Default for Visited<S, A, C>
where
    S: Debug + Clone + Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A, C> Index<NodeId> for Visited<S, A, C>
where
    S: Hash + Eq,
{
    type Output = Node<S, A, C>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl<S, A, C> IndexMut<NodeId> for Visited<S, A, C>
where
    S: Hash + Eq,
{
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, state: char, g: u32, v: u32) -> Node<char, (), u32> {
        Node {
            id,
            state,
            action: None,
            g,
            v,
            previous: None,
            key: Key::new(g, g),
        }
    }

    #[test]
    fn keys_compare_lexicographically() {
        assert!(Key::new(1, 9) < Key::new(2, 0));
        assert!(Key::new(2, 1) < Key::new(2, 3));
        assert_eq!(Key::new(2.0, 1.0), Key::new(2.0, 1.0));
        assert!(Key::new(f64::INFINITY, 0.0) > Key::new(1e300, 1e300));
    }

    #[test]
    fn consistency() {
        let id = NodeId(0);
        assert!(node(id, 'a', 1, 3).is_over_consistent());
        assert!(!node(id, 'a', 3, 1).is_over_consistent());
        assert!(node(id, 'a', 2, 2).is_consistent());
        assert!(!node(id, 'a', 2, 2).is_over_consistent());
        assert!(node(id, 'a', 3, 1).is_under_consistent());
        assert!(!node(id, 'a', 2, 2).is_under_consistent());
    }

    #[test]
    fn memoized_by_state() {
        let mut visited = Visited::new();
        let a = visited.get_or_insert_with(&'a', |id| node(id, 'a', 0, 0));
        let b = visited.get_or_insert_with(&'b', |id| node(id, 'b', 5, 5));
        let again = visited.get_or_insert_with(&'a', |_| panic!("node for 'a' rebuilt"));

        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(visited.len(), 2);
        assert_eq!(visited[b].state(), &'b');
        assert_eq!(visited[b].id(), b);

        visited[b].g = 1;
        assert_eq!(visited[b].g(), &1);
        assert_eq!(visited.get(&'c'), None);
    }
}
