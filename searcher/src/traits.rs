use crate::algebra::CostAlgebra;
use crate::transition::Transition;

/// Lazily evaluated sequence of transitions.
pub type Transitions<'a, S, A> = Box<dyn Iterator<Item = Transition<S, A>> + 'a>;

/// Provides the edges of the search space in both directions.
///
/// Both methods must be deterministic for a given state. Predecessors
/// are reported in forward orientation: the `from` state of each
/// transition is the predecessor and `to` is the queried state.
pub trait TransitionFunction<S, A> {
    /// Transitions leaving `state`.
    fn successors<'a>(&'a self, state: &S) -> Transitions<'a, S, A>;

    /// Transitions entering `state`.
    fn predecessors<'a>(&'a self, state: &S) -> Transitions<'a, S, A>;
}

/// Prices a transition.
///
/// Costs must not be below the algebra identity. Nothing checks this,
/// and a negative cost leaves the search order undefined instead of
/// raising an error.
pub trait CostFunction<S, A, C> {
    fn cost(&self, transition: &Transition<S, A>) -> C;
}

impl<S, A, C, F> CostFunction<S, A, C> for F
where
    F: Fn(&Transition<S, A>) -> C,
{
    fn cost(&self, transition: &Transition<S, A>) -> C {
        self(transition)
    }
}

/// An interface for searching when a heuristic can be provided.
///
/// The estimate is the best guess of the remaining cost to the
/// closest goal. It should never overestimate, otherwise the
/// sub-optimality bound of an inflated search does not hold.
pub trait HeuristicFunction<S, C> {
    fn estimate(&self, state: &S) -> C;
}

impl<S, C, F> HeuristicFunction<S, C> for F
where
    F: Fn(&S) -> C,
{
    fn estimate(&self, state: &S) -> C {
        self(state)
    }
}

/// Heuristic which knows nothing, turning a search into uniform-cost
/// search.
#[derive(Debug, Clone)]
pub struct ZeroHeuristic<G> {
    algebra: G,
}

impl<G> ZeroHeuristic<G>
where
    G: CostAlgebra,
{
    pub fn new(algebra: G) -> Self {
        Self { algebra }
    }
}

impl<S, G> HeuristicFunction<S, G::Cost> for ZeroHeuristic<G>
where
    G: CostAlgebra,
{
    fn estimate(&self, _state: &S) -> G::Cost {
        self.algebra.identity()
    }
}

/// Everything a search needs to know about a state space.
///
/// Implemented for every type which provides transitions, costs and
/// heuristic estimates.
pub trait SearchProblem<S, A, C>:
    TransitionFunction<S, A> + CostFunction<S, A, C> + HeuristicFunction<S, C>
{
}

impl<S, A, C, P> SearchProblem<S, A, C> for P where
    P: TransitionFunction<S, A> + CostFunction<S, A, C> + HeuristicFunction<S, C>
{
}

/// Bundles three separately supplied collaborators into the single
/// problem value owned by a search.
#[derive(Debug, Clone)]
pub struct Components<T, F, H> {
    pub transitions: T,
    pub costs: F,
    pub heuristic: H,
}

impl<T, F, H> Components<T, F, H> {
    pub fn new(transitions: T, costs: F, heuristic: H) -> Self {
        Self {
            transitions,
            costs,
            heuristic,
        }
    }
}

impl<S, A, T, F, H> TransitionFunction<S, A> for Components<T, F, H>
where
    T: TransitionFunction<S, A>,
{
    fn successors<'a>(&'a self, state: &S) -> Transitions<'a, S, A> {
        self.transitions.successors(state)
    }

    fn predecessors<'a>(&'a self, state: &S) -> Transitions<'a, S, A> {
        self.transitions.predecessors(state)
    }
}

impl<S, A, C, T, F, H> CostFunction<S, A, C> for Components<T, F, H>
where
    F: CostFunction<S, A, C>,
{
    fn cost(&self, transition: &Transition<S, A>) -> C {
        self.costs.cost(transition)
    }
}

impl<S, C, T, F, H> HeuristicFunction<S, C> for Components<T, F, H>
where
    H: HeuristicFunction<S, C>,
{
    fn estimate(&self, state: &S) -> C {
        self.heuristic.estimate(state)
    }
}
