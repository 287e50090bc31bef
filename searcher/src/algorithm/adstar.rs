//! Anytime Dynamic A* (AD*), searching forward from a start state.
//!
//! The search is a pull-based iterator. Each call to `next` either
//! expands the most promising node, or performs one full repair pass which
//! propagates reported edge cost changes and a new inflation factor. The
//! iterator yields a snapshot of the node it processed.
//!
//! An unreachable goal is not an error here: the search simply runs out of
//! nodes to expand, and the goal keeps the algebra maximum as its cost.
//!
//! Edge costs must never be below the algebra identity. Negative costs
//! are not detected, and leave the search order undefined.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::algebra::CostAlgebra;
use crate::algorithm::frontier::Frontier;
use crate::algorithm::node::{Node, NodeId, Visited};
use crate::algorithm::updater::NodeUpdater;
use crate::errors::{Result, SearchError};
use crate::traits::SearchProblem;
use crate::transition::Transition;

/// What the last step of the search did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Expand,
    Repair,
}

/// A path from the start to a goal, with its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<S, A, C> {
    /// Visited states, start first.
    pub states: Vec<S>,

    /// `actions[i]` leads from `states[i]` to `states[i + 1]`.
    pub actions: Vec<Option<A>>,

    pub cost: C,

    /// Inflation factor the plan was found with.
    pub epsilon: f64,

    /// Search steps taken so far.
    pub steps: usize,
}

impl<S, A, C> Plan<S, A, C> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }
}

fn validate_epsilon(epsilon: f64) -> Result<f64> {
    if epsilon.is_finite() && epsilon >= 1.0 {
        Ok(epsilon)
    } else {
        Err(SearchError::InvalidEpsilon(epsilon))
    }
}

/// AD* search state for one start state and a set of goals.
///
/// `P` provides transitions, costs and heuristic estimates, `G` is the
/// cost algebra. Edge costs are read from `P` on demand, so a caller who
/// changes them (through [AdStarForward::problem_mut]) must report every
/// changed transition with [AdStarForward::report_change].
#[derive(Debug)]
pub struct AdStarForward<S, A, P, G>
where
    S: Hash + Eq,
    G: CostAlgebra,
{
    problem: P,
    updater: NodeUpdater<G>,
    visited: Visited<S, A, G::Cost>,
    start: NodeId,
    goals: Vec<NodeId>,

    open: HashSet<NodeId>,
    closed: HashSet<NodeId>,
    incons: HashSet<NodeId>,
    frontier: Frontier<G::Cost>,

    changed: Vec<Transition<S, A>>,
    epsilon_changed: bool,

    phase: Option<Phase>,
    steps: usize,
}

impl<S, A, P, G> AdStarForward<S, A, P, G>
where
    S: Debug + Clone + Hash + Eq,
    A: Debug + Clone,
    G: CostAlgebra,
    P: SearchProblem<S, A, G::Cost>,
{
    /// Set up a search from `start` towards any of `goals`.
    ///
    /// Fails when the algebra breaks a law the search depends on, when
    /// `epsilon` is not a finite number of at least 1, or without goals.
    pub fn new<I>(start: S, goals: I, problem: P, algebra: G, epsilon: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        algebra.check_laws()?;
        let epsilon = validate_epsilon(epsilon)?;
        let goals: Vec<S> = goals.into_iter().collect();
        if goals.is_empty() {
            return Err(SearchError::NoGoals);
        }

        let updater = NodeUpdater::new(algebra, epsilon);
        let mut visited = Visited::new();

        let (start_id, goal_ids) = {
            let factory = updater.factory();
            let start_id = visited.get_or_insert_with(&start, |id| {
                factory.make_node(id, None, Transition::start(start.clone()), &problem)
            });

            let goal_ids: Vec<NodeId> = goals
                .into_iter()
                .map(|goal| {
                    visited.get_or_insert_with(&goal, |id| {
                        factory.make_node(id, Some(start_id), Transition::start(goal.clone()), &problem)
                    })
                })
                .collect();
            (start_id, goal_ids)
        };

        let mut search = Self {
            problem,
            updater,
            visited,
            start: start_id,
            goals: goal_ids,
            open: HashSet::new(),
            closed: HashSet::new(),
            incons: HashSet::new(),
            frontier: Frontier::new(),
            changed: Vec::new(),
            epsilon_changed: false,
            phase: None,
            steps: 0,
        };
        search.update_membership(start_id);
        Ok(search)
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Mutable access to the problem, e.g. to change edge costs.
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    pub fn algebra(&self) -> &G {
        self.updater.algebra()
    }

    pub fn epsilon(&self) -> f64 {
        self.updater.epsilon()
    }

    /// Change the inflation factor. Keys are recomputed by the next
    /// repair pass.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        let epsilon = validate_epsilon(epsilon)?;
        if epsilon != self.updater.epsilon() {
            self.updater.set_epsilon(epsilon);
            self.epsilon_changed = true;
        }
        Ok(())
    }

    /// Report a transition whose cost changed since it was last read.
    pub fn report_change(&mut self, transition: Transition<S, A>) {
        self.changed.push(transition);
    }

    pub fn report_changes<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = Transition<S, A>>,
    {
        self.changed.extend(transitions);
    }

    /// Have changes been reported which no repair pass has seen yet?
    pub fn changes_pending(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Is there work only a repair pass can do?
    pub fn repair_pending(&self) -> bool {
        self.epsilon_changed || !self.changed.is_empty() || !self.incons.is_empty()
    }

    pub fn start(&self) -> &Node<S, A, G::Cost> {
        &self.visited[self.start]
    }

    pub fn goals(&self) -> impl Iterator<Item = &Node<S, A, G::Cost>> {
        self.goals.iter().map(move |id| &self.visited[*id])
    }

    pub fn node(&self, id: NodeId) -> &Node<S, A, G::Cost> {
        &self.visited[id]
    }

    pub fn node_for(&self, state: &S) -> Option<&Node<S, A, G::Cost>> {
        self.visited.get(state).map(|id| &self.visited[id])
    }

    /// Nodes waiting for expansion.
    pub fn open(&self) -> &HashSet<NodeId> {
        &self.open
    }

    /// Nodes settled since the last repair pass.
    pub fn closed(&self) -> &HashSet<NodeId> {
        &self.closed
    }

    /// Settled nodes which became inconsistent again since the last
    /// repair pass.
    pub fn incons(&self) -> &HashSet<NodeId> {
        &self.incons
    }

    /// Number of nodes created so far.
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Entries in the frontier, including stale ones.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Largest number of entries the frontier held.
    pub fn frontier_high_water(&self) -> usize {
        self.frontier.high_water()
    }

    pub fn last_phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Number of expansions and repair passes performed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The goal node with the smallest key.
    pub fn best_goal(&self) -> &Node<S, A, G::Cost> {
        &self.visited[self.best_goal_id()]
    }

    fn best_goal_id(&self) -> NodeId {
        let mut best = self.goals[0];
        for id in &self.goals[1..] {
            if self.visited[*id].key() < self.visited[best].key() {
                best = *id;
            }
        }
        best
    }

    /// True when the best goal's cost can not be improved by further
    /// expansions at the current inflation factor.
    ///
    /// Reported changes which have not been repaired yet are not taken
    /// into account.
    ///
    /// Needs `&mut self` because finding the best open node discards the
    /// stale frontier entries on top of the heap. Node values and set
    /// memberships are left untouched.
    pub fn solution_ready(&mut self) -> bool {
        match self.peek_promising() {
            Some(id) => !self.should_expand(id),
            None => !self.best_goal().is_under_consistent(),
        }
    }

    /// Node ids from the start to the best goal, following backpointers.
    ///
    /// `None` when the goal is unreachable or the backpointers do not lead
    /// back to the start.
    pub fn path(&self) -> Option<Vec<NodeId>> {
        self.path_to(self.best_goal_id())
    }

    pub fn path_to(&self, goal: NodeId) -> Option<Vec<NodeId>> {
        if self.visited[goal].g() == &self.algebra().max() {
            return None;
        }

        let mut path = vec![goal];
        let mut current = goal;
        while current != self.start {
            // Every node appears at most once on a path.
            if path.len() > self.visited.len() {
                return None;
            }
            current = self.visited[current].previous()?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// The current path to the best goal, as a [Plan].
    pub fn plan(&self) -> Option<Plan<S, A, G::Cost>> {
        let path = self.path()?;
        let goal = &self.visited[*path.last()?];

        Some(Plan {
            states: path.iter().map(|id| self.visited[*id].state().clone()).collect(),
            actions: path[1..]
                .iter()
                .map(|id| self.visited[*id].action().cloned())
                .collect(),
            cost: goal.g().clone(),
            epsilon: self.epsilon(),
            steps: self.steps,
        })
    }

    /// Propagate reported changes and the current inflation factor.
    ///
    /// Every reported transition's destination is re-derived from its
    /// predecessors. Afterwards all inconsistent nodes are open again,
    /// every open and goal key matches the current inflation factor, and
    /// nothing is closed.
    pub fn repair(&mut self) {
        let changed = std::mem::replace(&mut self.changed, Vec::new());
        for transition in changed {
            if transition.to() == self.visited[self.start].state() {
                continue;
            }
            let id = self.fetch_or_create(&transition);
            self.updater
                .rederive_from_best_predecessor(&self.problem, &mut self.visited, id);
            self.update_membership(id);
        }

        let incons: Vec<NodeId> = self.incons.drain().collect();
        self.open.extend(incons);

        let refresh: Vec<NodeId> = self.open.iter().chain(self.goals.iter()).copied().collect();
        for id in refresh {
            self.updater.refresh_key(&self.problem, &mut self.visited, id);
        }

        let entries: Vec<_> = self
            .open
            .iter()
            .map(|id| (self.visited[*id].key().clone(), *id))
            .collect();
        self.frontier.rebuild(entries);
        self.closed.clear();

        self.epsilon_changed = false;
        self.phase = Some(Phase::Repair);
        self.steps += 1;
    }

    /// Best open node, discarding frontier entries which went stale.
    fn peek_promising(&mut self) -> Option<NodeId> {
        loop {
            let (id, fresh) = match self.frontier.peek() {
                Some(entry) => {
                    let id = entry.id();
                    (
                        id,
                        self.open.contains(&id) && entry.key() == self.visited[id].key(),
                    )
                }
                None => return None,
            };
            if fresh {
                return Some(id);
            }
            self.frontier.pop();
        }
    }

    /// Expand `candidate`, the best open node, unless the best goal is
    /// already better and consistent.
    fn should_expand(&self, candidate: NodeId) -> bool {
        let goal = self.best_goal();
        goal.key() >= self.visited[candidate].key() || goal.is_under_consistent()
    }

    fn expand(&mut self, id: NodeId) {
        self.open.remove(&id);

        let over_consistent = self.visited[id].is_over_consistent();
        if over_consistent {
            self.updater.settle(&self.problem, &mut self.visited, id);
            self.closed.insert(id);
        } else {
            self.updater.reset_v(&self.problem, &mut self.visited, id);
            self.update_membership(id);
        }

        let state = self.visited[id].state().clone();
        let successors: Vec<Transition<S, A>> = self.problem.successors(&state).collect();
        for transition in successors {
            let successor = self.fetch_or_create(&transition);
            if over_consistent {
                if self.updater.tighten_from_parent(
                    &self.problem,
                    &mut self.visited,
                    successor,
                    id,
                    &transition,
                ) {
                    self.update_membership(successor);
                }
            } else if successor != self.start {
                self.updater
                    .rederive_from_best_predecessor(&self.problem, &mut self.visited, successor);
                self.update_membership(successor);
            }
        }

        self.phase = Some(Phase::Expand);
        self.steps += 1;
    }

    /// Node for the destination of `transition`, created unreachable the
    /// first time the state is seen.
    fn fetch_or_create(&mut self, transition: &Transition<S, A>) -> NodeId {
        let start = self.start;
        let factory = self.updater.factory();
        let problem = &self.problem;
        self.visited.get_or_insert_with(transition.to(), |id| {
            factory.make_node(id, Some(start), transition.clone(), problem)
        })
    }

    /// Inconsistent nodes belong in OPEN, or in INCONS once closed.
    /// Consistent nodes belong in neither.
    fn update_membership(&mut self, id: NodeId) {
        let node = &self.visited[id];
        if node.is_consistent() {
            self.open.remove(&id);
            self.incons.remove(&id);
        } else if self.closed.contains(&id) {
            self.incons.insert(id);
        } else {
            self.open.insert(id);
            self.frontier.push(node.key().clone(), id);
        }
    }
}

impl<S, A, P, G> Iterator for AdStarForward<S, A, P, G>
where
    S: Debug + Clone + Hash + Eq,
    A: Debug + Clone,
    G: CostAlgebra,
    P: SearchProblem<S, A, G::Cost>,
{
    type Item = Node<S, A, G::Cost>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.peek_promising() {
            Some(id) if self.should_expand(id) => {
                self.frontier.pop();
                self.expand(id);
                Some(self.visited[id].clone())
            }
            Some(_) => {
                self.repair();
                Some(self.best_goal().clone())
            }
            None if self.repair_pending() => {
                self.repair();
                Some(self.best_goal().clone())
            }
            None => None,
        }
    }
}
