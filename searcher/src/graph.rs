//! In-memory weighted directed graphs.
//!
//! A [Graph] is the simplest problem for a search: it provides
//! transitions in both directions, prices them from the stored edge
//! weights and answers heuristic queries from a table of estimates.
//! Every edge mutation returns the transitions whose cost changed,
//! ready to be reported to a running search.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::algebra::CostAlgebra;
use crate::traits::{CostFunction, HeuristicFunction, TransitionFunction, Transitions};
use crate::transition::Transition;

type Edges<N, W> = HashMap<N, HashMap<N, W>>;

#[derive(Debug, Clone)]
pub struct Graph<N, W>
where
    N: Hash + Eq,
{
    forward: Edges<N, W>,
    reverse: Edges<N, W>,
    estimates: HashMap<N, W>,
    zero: W,
    unreachable: W,
}

impl<N, W> Graph<N, W>
where
    N: Debug + Clone + Hash + Eq,
    W: Debug + Clone,
{
    /// Create an empty graph. Edges which are not present cost `unreachable`
    /// and nodes without an estimate are estimated at `zero`.
    pub fn new(zero: W, unreachable: W) -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
            estimates: HashMap::new(),
            zero,
            unreachable,
        }
    }

    /// Create an empty graph priced with the identity and maximum of `algebra`.
    pub fn for_algebra<G>(algebra: &G) -> Self
    where
        G: CostAlgebra<Cost = W>,
    {
        Self::new(algebra.identity(), algebra.max())
    }

    /// Set the heuristic estimate of the remaining cost from `node`.
    pub fn set_estimate(&mut self, node: N, estimate: W) {
        self.estimates.insert(node, estimate);
    }

    /// Insert or re-weight the edge `from -> to`.
    pub fn insert(&mut self, from: N, to: N, weight: W) -> Transition<N, ()> {
        self.forward
            .entry(from.clone())
            .or_insert_with(HashMap::new)
            .insert(to.clone(), weight.clone());
        self.reverse
            .entry(to.clone())
            .or_insert_with(HashMap::new)
            .insert(from.clone(), weight);

        // Make sure both endpoints are known nodes.
        self.forward.entry(to.clone()).or_insert_with(HashMap::new);
        self.reverse.entry(from.clone()).or_insert_with(HashMap::new);

        Transition::new(from, to)
    }

    /// Insert the edge in both directions with the same weight.
    pub fn insert_undirected(&mut self, a: N, b: N, weight: W) -> Vec<Transition<N, ()>> {
        vec![
            self.insert(a.clone(), b.clone(), weight.clone()),
            self.insert(b, a, weight),
        ]
    }

    /// Change the weight of an existing edge.
    ///
    /// Returns `None` when there is no such edge.
    pub fn set_weight(&mut self, from: &N, to: &N, weight: W) -> Option<Transition<N, ()>> {
        if !self.contains_edge(from, to) {
            return None;
        }
        Some(self.insert(from.clone(), to.clone(), weight))
    }

    /// Remove the edge `from -> to`, which then costs the unreachable value.
    pub fn remove(&mut self, from: &N, to: &N) -> Option<Transition<N, ()>> {
        let removed = self
            .forward
            .get_mut(from)
            .and_then(|edges| edges.remove(to));
        if let Some(edges) = self.reverse.get_mut(to) {
            edges.remove(from);
        }
        removed.map(|_| Transition::new(from.clone(), to.clone()))
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.forward.contains_key(node)
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.forward
            .get(from)
            .map(|edges| edges.contains_key(to))
            .unwrap_or(false)
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: &N, to: &N) -> Option<&W> {
        self.forward.get(from).and_then(|edges| edges.get(to))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.forward.keys()
    }
}

impl<N, W> TransitionFunction<N, ()> for Graph<N, W>
where
    N: Debug + Clone + Hash + Eq,
    W: Debug + Clone,
{
    fn successors<'a>(&'a self, state: &N) -> Transitions<'a, N, ()> {
        let origin = state.clone();
        match self.forward.get(state) {
            Some(edges) => Box::new(
                edges
                    .keys()
                    .map(move |to| Transition::new(origin.clone(), to.clone())),
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    fn predecessors<'a>(&'a self, state: &N) -> Transitions<'a, N, ()> {
        let destination = state.clone();
        match self.reverse.get(state) {
            Some(edges) => Box::new(
                edges
                    .keys()
                    .map(move |from| Transition::new(from.clone(), destination.clone())),
            ),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<N, W> CostFunction<N, (), W> for Graph<N, W>
where
    N: Debug + Clone + Hash + Eq,
    W: Debug + Clone,
{
    fn cost(&self, transition: &Transition<N, ()>) -> W {
        transition
            .from()
            .and_then(|from| self.weight(from, transition.to()))
            .cloned()
            .unwrap_or_else(|| self.unreachable.clone())
    }
}

impl<N, W> HeuristicFunction<N, W> for Graph<N, W>
where
    N: Debug + Clone + Hash + Eq,
    W: Debug + Clone,
{
    fn estimate(&self, state: &N) -> W {
        self.estimates
            .get(state)
            .cloned()
            .unwrap_or_else(|| self.zero.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Additive;

    fn sorted(transitions: Transitions<char, ()>) -> Vec<(char, char)> {
        let mut edges: Vec<(char, char)> = transitions
            .map(|t| (*t.from().unwrap(), *t.to()))
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn directions() {
        let mut graph = Graph::for_algebra(&Additive::<f64>::new());
        graph.insert('a', 'b', 1.0);
        graph.insert('a', 'c', 4.0);
        graph.insert('b', 'c', 1.0);

        assert_eq!(graph.len(), 3);
        assert_eq!(sorted(graph.successors(&'a')), vec![('a', 'b'), ('a', 'c')]);
        assert_eq!(sorted(graph.predecessors(&'c')), vec![('a', 'c'), ('b', 'c')]);
        assert!(sorted(graph.successors(&'c')).is_empty());
        assert!(sorted(graph.successors(&'z')).is_empty());
    }

    #[test]
    fn changes() {
        let mut graph = Graph::for_algebra(&Additive::<f64>::new());
        graph.insert_undirected('a', 'b', 2.0);

        let changed = graph.set_weight(&'a', &'b', 10.0).unwrap();
        assert_eq!(changed, Transition::new('a', 'b'));
        assert_eq!(graph.cost(&changed), 10.0);
        assert_eq!(graph.cost(&Transition::new('b', 'a')), 2.0);

        assert!(graph.set_weight(&'a', &'z', 1.0).is_none());

        let removed = graph.remove(&'b', &'a').unwrap();
        assert_eq!(graph.cost(&removed), f64::INFINITY);
        assert!(sorted(graph.predecessors(&'a')).is_empty());
        assert!(graph.remove(&'b', &'a').is_none());
    }

    #[test]
    fn estimates() {
        let mut graph = Graph::for_algebra(&Additive::<f64>::new());
        graph.insert('a', 'b', 1.0);
        graph.set_estimate('a', 3.5);

        assert_eq!(graph.estimate(&'a'), 3.5);
        assert_eq!(graph.estimate(&'b'), 0.0);
    }
}
