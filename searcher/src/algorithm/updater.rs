//! Cost repair rules for AD* nodes.

use std::fmt::Debug;
use std::hash::Hash;

use crate::algebra::CostAlgebra;
use crate::algorithm::factory::NodeFactory;
use crate::algorithm::node::{Key, NodeId, Visited};
use crate::traits::{CostFunction, HeuristicFunction, TransitionFunction};
use crate::transition::Transition;

/// Updates `g`, `v`, backpointers and keys of nodes in a [Visited] arena.
///
/// The updater owns the cost algebra and the current inflation factor,
/// since both enter every key it computes.
#[derive(Debug, Clone)]
pub struct NodeUpdater<G> {
    algebra: G,
    epsilon: f64,
}

impl<G> NodeUpdater<G>
where
    G: CostAlgebra,
{
    pub fn new(algebra: G, epsilon: f64) -> Self {
        Self { algebra, epsilon }
    }

    pub fn algebra(&self) -> &G {
        &self.algebra
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Keys computed after this call use the new factor. Keys already
    /// stored are only refreshed by [NodeUpdater::refresh_key].
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn factory(&self) -> NodeFactory<'_, G> {
        NodeFactory::new(self)
    }

    /// Key for a node with costs `g` and `v` and heuristic estimate `h`.
    pub fn key(&self, g: &G::Cost, v: &G::Cost, h: &G::Cost) -> Key<G::Cost> {
        if v > g {
            let inflated = self.algebra.scale(h, self.epsilon);
            Key::new(self.algebra.combine(g, &inflated), g.clone())
        } else {
            Key::new(self.algebra.combine(v, h), v.clone())
        }
    }

    /// Recompute the stored key of a node, e.g. after the inflation
    /// factor changed.
    pub fn refresh_key<S, A, H>(
        &self,
        heuristic: &H,
        visited: &mut Visited<S, A, G::Cost>,
        node: NodeId,
    ) where
        S: Debug + Clone + Hash + Eq,
        H: HeuristicFunction<S, G::Cost>,
    {
        let h = heuristic.estimate(visited[node].state());
        let n = &mut visited[node];
        n.key = self.key(&n.g, &n.v, &h);
    }

    /// Expansion of an over-consistent node: `v := g`.
    pub fn settle<S, A, H>(&self, heuristic: &H, visited: &mut Visited<S, A, G::Cost>, node: NodeId)
    where
        S: Debug + Clone + Hash + Eq,
        H: HeuristicFunction<S, G::Cost>,
    {
        let n = &mut visited[node];
        n.v = n.g.clone();
        self.refresh_key(heuristic, visited, node);
    }

    /// Expansion of an under-consistent node: `v := max`.
    pub fn reset_v<S, A, H>(&self, heuristic: &H, visited: &mut Visited<S, A, G::Cost>, node: NodeId)
    where
        S: Debug + Clone + Hash + Eq,
        H: HeuristicFunction<S, G::Cost>,
    {
        visited[node].v = self.algebra.max();
        self.refresh_key(heuristic, visited, node);
    }

    /// Improve `node` through `parent`, whose `g` is final for this pass.
    ///
    /// Returns true when the path through `transition` is cheaper than
    /// the best known one, in which case the node is re-parented and its
    /// key changes.
    pub fn tighten_from_parent<S, A, P>(
        &self,
        problem: &P,
        visited: &mut Visited<S, A, G::Cost>,
        node: NodeId,
        parent: NodeId,
        transition: &Transition<S, A>,
    ) -> bool
    where
        S: Debug + Clone + Hash + Eq,
        A: Clone,
        P: CostFunction<S, A, G::Cost> + HeuristicFunction<S, G::Cost>,
    {
        let candidate = self
            .algebra
            .combine(visited[parent].g(), &problem.cost(transition));
        if !(candidate < visited[node].g) {
            return false;
        }

        let h = problem.estimate(transition.to());
        let n = &mut visited[node];
        n.g = candidate;
        n.previous = Some(parent);
        n.action = transition.action().cloned();
        n.key = self.key(&n.g, &n.v, &h);
        true
    }

    /// Recompute `g` of `node` from scratch, as the cheapest `v + cost`
    /// over its predecessors which have been visited.
    ///
    /// Without any such predecessor the node becomes unreachable. The key
    /// is always recomputed, so this always reports a change.
    pub fn rederive_from_best_predecessor<S, A, P>(
        &self,
        problem: &P,
        visited: &mut Visited<S, A, G::Cost>,
        node: NodeId,
    ) -> bool
    where
        S: Debug + Clone + Hash + Eq,
        A: Clone,
        P: TransitionFunction<S, A> + CostFunction<S, A, G::Cost> + HeuristicFunction<S, G::Cost>,
    {
        let state = visited[node].state().clone();

        let mut best = self.algebra.max();
        let mut parent = None;
        let mut action = None;
        for transition in problem.predecessors(&state) {
            let predecessor = match transition.from().and_then(|from| visited.get(from)) {
                Some(p) => p,
                None => continue,
            };
            let value = self
                .algebra
                .combine(visited[predecessor].v(), &problem.cost(&transition));
            if value < best {
                best = value;
                parent = Some(predecessor);
                action = transition.action().cloned();
            }
        }

        let h = problem.estimate(&state);
        let n = &mut visited[node];
        n.g = best;
        n.previous = parent;
        n.action = action;
        n.key = self.key(&n.g, &n.v, &h);
        true
    }
}
