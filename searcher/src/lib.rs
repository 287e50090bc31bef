//! Incremental, anytime heuristic search.
//!
//! The centerpiece is [AdStarForward], an Anytime Dynamic A* search over a
//! state space described by a [SearchProblem]: a [TransitionFunction], a
//! [CostFunction] and a [HeuristicFunction]. Costs are combined through a
//! [CostAlgebra], so the search does not care whether costs are floats,
//! probabilities or saturating integers.
//!
//! A search is pulled step by step as an iterator, or driven by a
//! [anytime::Planner] which returns a quick plan first and then improves it.

pub mod algebra;
pub mod algorithm;
mod errors;
pub mod graph;
mod traits;
mod transition;

pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use traits::{
    Components, CostFunction, HeuristicFunction, SearchProblem, TransitionFunction, Transitions,
    ZeroHeuristic,
};
pub use transition::Transition;

pub use algebra::{Additive, CostAlgebra, Multiplicative, Saturating};
pub use algorithm::adstar::{self, AdStarForward, Phase, Plan};
pub use algorithm::anytime::{self, Planner};
pub use algorithm::node::{Key, Node, NodeId};
pub use algorithm::SearchOptions;
pub use graph::Graph;
