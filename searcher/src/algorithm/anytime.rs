//! Anytime planning on top of an AD* search.
//!
//! A [Planner] first finds a plan quickly with an inflated heuristic, then
//! tightens the inflation factor step by step, reusing the search effort,
//! until the plan is optimal or a budget runs out.

use std::fmt::Debug;
use std::hash::Hash;

use super::adstar::{AdStarForward, Plan};
use super::{SearchOptions, StepLimit, TimeLimit};
use crate::algebra::CostAlgebra;
use crate::errors::{Result, SearchError};
use crate::traits::SearchProblem;

/// Start planning with an existing search.
pub fn build<S, A, P, G>(search: AdStarForward<S, A, P, G>) -> Planner<S, A, P, G>
where
    S: Debug + Clone + Hash + Eq,
    A: Debug + Clone,
    G: CostAlgebra,
    P: SearchProblem<S, A, G::Cost>,
{
    Planner::new(search)
}

#[derive(Debug)]
pub struct Planner<S, A, P, G>
where
    S: Hash + Eq,
    G: CostAlgebra,
{
    search: AdStarForward<S, A, P, G>,
    options: SearchOptions,
    counter: Option<StepLimit>,
    deadline: Option<TimeLimit>,
    best: Option<Plan<S, A, G::Cost>>,
}

impl<S, A, P, G> Planner<S, A, P, G>
where
    S: Debug + Clone + Hash + Eq,
    A: Debug + Clone,
    G: CostAlgebra,
    P: SearchProblem<S, A, G::Cost>,
{
    pub fn new(search: AdStarForward<S, A, P, G>) -> Self {
        Self {
            search,
            options: SearchOptions::default(),
            counter: None,
            deadline: None,
            best: None,
        }
    }

    /// Replace the options. Budgets start counting from here.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.counter = options.limit.map(StepLimit::new);
        self.deadline = options.time_limit.map(TimeLimit::new);
        self.options = options;
        self
    }

    pub fn search(&self) -> &AdStarForward<S, A, P, G> {
        &self.search
    }

    /// Access to the search, e.g. to change the problem and report the
    /// changes before the next call to [Planner::improve].
    pub fn search_mut(&mut self) -> &mut AdStarForward<S, A, P, G> {
        &mut self.search
    }

    pub fn into_search(self) -> AdStarForward<S, A, P, G> {
        self.search
    }

    /// The most recent plan found.
    pub fn best(&self) -> Option<&Plan<S, A, G::Cost>> {
        self.best.as_ref()
    }

    fn budget(&mut self) -> Result<()> {
        self.counter
            .as_mut()
            .map(|c| c.increment())
            .unwrap_or(Ok(()))?;
        self.deadline
            .as_ref()
            .map(|d| d.check())
            .unwrap_or(Ok(()))
    }

    fn report(&self) {
        let n = self.search.steps();
        if let Some(every) = self.options.verbose {
            if every > 0 && n % every == 0 {
                eprintln!(
                    "S{} O{} C{} I{} V{} F{}/{} e{:.2} G{:?}",
                    n,
                    self.search.open().len(),
                    self.search.closed().len(),
                    self.search.incons().len(),
                    self.search.visited(),
                    self.search.frontier_len(),
                    self.search.frontier_high_water(),
                    self.search.epsilon(),
                    self.search.best_goal().g(),
                );
            }
        }
    }

    // Returns false when the search had nothing left to do.
    fn step(&mut self) -> Result<bool> {
        self.budget()?;
        let progressed = self.search.next().is_some();
        self.report();
        Ok(progressed)
    }

    /// Search until the plan for the current inflation factor is final.
    ///
    /// Pending changes and a changed inflation factor are repaired first.
    /// Reported changes discard the best plan, which may use a transition
    /// that changed.
    pub fn improve(&mut self) -> Result<Plan<S, A, G::Cost>> {
        if self.search.changes_pending() {
            self.best = None;
        }
        if self.search.repair_pending() {
            self.budget()?;
            self.search.repair();
            self.report();
        }

        while !self.search.solution_ready() {
            if !self.step()? {
                break;
            }
        }

        let plan = self.search.plan().ok_or(SearchError::NoResultFound)?;
        if self.options.verbose.is_some() {
            eprintln!(
                "Plan e{:.2} cost {:?} length {} after {} steps",
                plan.epsilon,
                plan.cost,
                plan.len(),
                plan.steps
            );
        }
        self.best = Some(plan.clone());
        Ok(plan)
    }

    /// Improve the plan, lowering the inflation factor step by step, until
    /// it is optimal.
    ///
    /// When a budget runs out, the best plan found since the last reported
    /// changes is returned instead of the error, if there is one.
    pub fn refine(&mut self) -> Result<Plan<S, A, G::Cost>> {
        self.refine_with(|_| {})
    }

    /// Like [Planner::refine], calling `found` with every plan on the way.
    pub fn refine_with<F>(&mut self, mut found: F) -> Result<Plan<S, A, G::Cost>>
    where
        F: FnMut(&Plan<S, A, G::Cost>),
    {
        loop {
            match self.improve() {
                Ok(plan) => found(&plan),
                Err(e @ SearchError::StepLimitExhausted(_))
                | Err(e @ SearchError::TimeLimitExhausted(_)) => {
                    return self.best.clone().ok_or(e);
                }
                Err(e) => return Err(e),
            }

            let epsilon = self.search.epsilon();
            if epsilon <= 1.0 {
                break;
            }
            let next = if self.options.epsilon_step > 0.0 {
                (epsilon - self.options.epsilon_step).max(1.0)
            } else {
                1.0
            };
            self.search.set_epsilon(next)?;
        }

        self.best.clone().ok_or(SearchError::NoResultFound)
    }

    /// Run the search to completion, see [Planner::refine].
    pub fn run(mut self) -> Result<Plan<S, A, G::Cost>> {
        self.refine()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::algebra::Additive;
    use crate::graph::Graph;

    type Romania = Graph<&'static str, f64>;

    const ROADS: &[(&str, &str, f64)] = &[
        ("Arad", "Zerind", 75.0),
        ("Arad", "Sibiu", 140.0),
        ("Arad", "Timisoara", 118.0),
        ("Zerind", "Oradea", 71.0),
        ("Oradea", "Sibiu", 151.0),
        ("Timisoara", "Lugoj", 111.0),
        ("Lugoj", "Mehadia", 70.0),
        ("Mehadia", "Drobeta", 75.0),
        ("Drobeta", "Craiova", 120.0),
        ("Craiova", "Rimnicu Vilcea", 146.0),
        ("Craiova", "Pitesti", 138.0),
        ("Sibiu", "Fagaras", 99.0),
        ("Sibiu", "Rimnicu Vilcea", 80.0),
        ("Rimnicu Vilcea", "Pitesti", 97.0),
        ("Fagaras", "Bucharest", 211.0),
        ("Pitesti", "Bucharest", 101.0),
        ("Bucharest", "Giurgiu", 90.0),
        ("Bucharest", "Urziceni", 85.0),
        ("Urziceni", "Hirsova", 98.0),
        ("Hirsova", "Eforie", 86.0),
        ("Urziceni", "Vaslui", 142.0),
        ("Vaslui", "Iasi", 92.0),
        ("Iasi", "Neamt", 87.0),
    ];

    // Straight line distance to Bucharest.
    const DISTANCES: &[(&str, f64)] = &[
        ("Arad", 366.0),
        ("Bucharest", 0.0),
        ("Craiova", 160.0),
        ("Drobeta", 242.0),
        ("Eforie", 161.0),
        ("Fagaras", 176.0),
        ("Giurgiu", 77.0),
        ("Hirsova", 151.0),
        ("Iasi", 226.0),
        ("Lugoj", 244.0),
        ("Mehadia", 241.0),
        ("Neamt", 234.0),
        ("Oradea", 380.0),
        ("Pitesti", 100.0),
        ("Rimnicu Vilcea", 193.0),
        ("Sibiu", 253.0),
        ("Timisoara", 329.0),
        ("Urziceni", 80.0),
        ("Vaslui", 199.0),
        ("Zerind", 374.0),
    ];

    fn romania() -> Romania {
        let mut graph = Graph::for_algebra(&Additive::new());
        for (a, b, distance) in ROADS {
            graph.insert_undirected(*a, *b, *distance);
        }
        for (city, distance) in DISTANCES {
            graph.set_estimate(*city, *distance);
        }
        graph
    }

    fn planner(graph: Romania, epsilon: f64) -> Planner<&'static str, (), Romania, Additive<f64>> {
        let search =
            AdStarForward::new("Arad", vec!["Bucharest"], graph, Additive::new(), epsilon).unwrap();
        build(search)
    }

    #[test]
    fn optimal_route() {
        let plan = planner(romania(), 1.0).run().unwrap();
        assert_eq!(plan.cost, 418.0);
        assert_eq!(
            plan.states,
            vec!["Arad", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"]
        );
        assert_eq!(plan.epsilon, 1.0);
    }

    #[test]
    fn anytime_bound() {
        let mut planner = planner(romania(), 2.5);
        let first = planner.improve().unwrap();
        assert_eq!(first.epsilon, 2.5);
        assert!(first.cost <= 2.5 * 418.0);
        assert!(first.cost >= 418.0);

        let last = planner.run().unwrap();
        assert_eq!(last.epsilon, 1.0);
        assert_eq!(last.cost, 418.0);
    }

    #[test]
    fn replan_after_road_closure() {
        let mut planner = planner(romania(), 1.0);
        assert_eq!(planner.improve().unwrap().cost, 418.0);

        let search = planner.search_mut();
        let closed = search
            .problem_mut()
            .remove(&"Rimnicu Vilcea", &"Pitesti")
            .unwrap();
        search.report_change(closed);

        let plan = planner.improve().unwrap();
        assert_eq!(plan.cost, 450.0);
        assert_eq!(plan.states, vec!["Arad", "Sibiu", "Fagaras", "Bucharest"]);
    }

    #[test]
    fn every_plan_is_reported() {
        let mut epsilons = Vec::new();
        let options = {
            let mut o = SearchOptions::default();
            o.epsilon_step = 0.75;
            o
        };
        let plan = planner(romania(), 2.5)
            .with_options(options)
            .refine_with(|p| epsilons.push(p.epsilon))
            .unwrap();

        assert_eq!(epsilons, vec![2.5, 1.75, 1.0]);
        assert_eq!(plan.cost, 418.0);
    }

    #[test]
    fn step_limit_without_plan() {
        let options = {
            let mut o = SearchOptions::default();
            o.limit = Some(2);
            o
        };
        match planner(romania(), 1.0).with_options(options).run() {
            Err(SearchError::StepLimitExhausted(2)) => {}
            other => panic!("Expected an exhausted step limit, got {:?}", other),
        }
    }

    #[test]
    fn time_limit_without_plan() {
        let options = {
            let mut o = SearchOptions::default();
            o.time_limit = Some(Duration::from_secs(0));
            o
        };
        match planner(romania(), 1.0).with_options(options).run() {
            Err(SearchError::TimeLimitExhausted(_)) => {}
            other => panic!("Expected an exhausted time limit, got {:?}", other),
        }
    }

    #[test]
    fn step_limit_returns_best_plan() {
        let graph = romania();
        let steps = planner(graph.clone(), 2.5).improve().unwrap().steps;

        let options = {
            let mut o = SearchOptions::default();
            o.limit = Some(steps + 1);
            o
        };
        let plan = planner(graph, 2.5).with_options(options).run().unwrap();
        assert!(plan.epsilon > 1.0);
        assert!(plan.cost <= plan.epsilon * 418.0);
    }

    #[test]
    fn step_limit_after_changes() {
        let mut graph = Graph::for_algebra(&Additive::new());
        graph.insert('A', 'B', 1.0);
        graph.insert('B', 'D', 1.0);
        graph.insert('A', 'C', 5.0);
        graph.insert('C', 'D', 5.0);
        let search = AdStarForward::new('A', vec!['D'], graph, Additive::new(), 1.0).unwrap();

        let options = {
            let mut o = SearchOptions::default();
            o.limit = Some(5);
            o
        };
        let mut planner: Planner<char, (), Graph<char, f64>, Additive<f64>> =
            build(search).with_options(options);
        let plan = planner.refine().unwrap();
        assert_eq!(plan.states, vec!['A', 'B', 'D']);

        let search = planner.search_mut();
        let removed = search.problem_mut().remove(&'B', &'D').unwrap();
        search.report_change(removed);

        match planner.refine() {
            Err(SearchError::StepLimitExhausted(_)) => {}
            other => panic!("Expected an exhausted step limit, got {:?}", other),
        }
        assert!(planner.best().is_none());
    }

    #[test]
    fn unreachable_destination() {
        let mut graph = romania();
        graph.insert("Chisinau", "Iasi", 150.0);
        let search =
            AdStarForward::new("Arad", vec!["Chisinau"], graph, Additive::new(), 1.0).unwrap();

        match build(search).run() {
            Err(SearchError::NoResultFound) => {}
            other => panic!("Expected no result, got {:?}", other),
        }
    }
}
