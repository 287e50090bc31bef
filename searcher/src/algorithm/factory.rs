//! Construction of new search nodes.

use crate::algebra::CostAlgebra;
use crate::algorithm::node::{Key, Node, NodeId};
use crate::algorithm::updater::NodeUpdater;
use crate::traits::HeuristicFunction;
use crate::transition::Transition;

/// Builds nodes with the initial costs AD* expects.
///
/// The start node is reachable at the identity cost and has never been
/// expanded, so it enters the search over-consistent. Every other node
/// starts out unreachable until an update finds a path to it.
#[derive(Debug)]
pub struct NodeFactory<'u, G> {
    updater: &'u NodeUpdater<G>,
}

impl<'u, G> NodeFactory<'u, G>
where
    G: CostAlgebra,
{
    pub fn new(updater: &'u NodeUpdater<G>) -> Self {
        Self { updater }
    }

    /// Make the node reached through `transition`.
    ///
    /// `parent` is `None` only for the start node. The parent is not
    /// recorded as a backpointer: costs and backpointers of other nodes
    /// are only ever set by the updater.
    pub fn make_node<S, A, H>(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        transition: Transition<S, A>,
        heuristic: &H,
    ) -> Node<S, A, G::Cost>
    where
        H: HeuristicFunction<S, G::Cost>,
    {
        let algebra = self.updater.algebra();
        let (action, _, state) = transition.into_parts();

        match parent {
            None => {
                let g = algebra.identity();
                let v = algebra.max();
                let key = self.updater.key(&g, &v, &heuristic.estimate(&state));
                Node {
                    id,
                    state,
                    action,
                    g,
                    v,
                    previous: None,
                    key,
                }
            }
            Some(_) => Node {
                id,
                state,
                action,
                g: algebra.max(),
                v: algebra.max(),
                previous: None,
                key: Key::new(algebra.max(), algebra.max()),
            },
        }
    }
}
