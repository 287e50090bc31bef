//! Any [Map] as a search problem: 4-connected, one step costs one.
use std::convert::TryFrom;

use searcher::{
    CostAlgebra, CostFunction, HeuristicFunction, Saturating, Transition, TransitionFunction,
    Transitions,
};

use super::map::Map;
use super::{Direction, Point};

/// Moves are labelled with the direction they go in.
pub type Move = Transition<Point, Direction>;

/// Integer step costs, saturating at `usize::MAX` for walls.
pub type GridAlgebra = Saturating<usize>;

/// Search problem of walking on a map towards one of several goals.
///
/// Successors only lead onto traversable cells, while predecessors list
/// every neighbour. A move touching a wall costs the algebra maximum, so
/// walls can come and go while a search is running.
#[derive(Debug, Clone)]
pub struct GridProblem<M> {
    map: M,
    goals: Vec<Point>,
    algebra: GridAlgebra,
}

impl<M> GridProblem<M>
where
    M: Map,
{
    pub fn new(map: M, goals: Vec<Point>) -> Self {
        Self {
            map,
            goals,
            algebra: GridAlgebra::new(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Changing traversability requires reporting [moves_around]
    /// to any search using this problem.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn goals(&self) -> &[Point] {
        &self.goals
    }
}

/// Every move into or out of `location`, e.g. after it was blocked.
pub fn moves_around(location: Point) -> Vec<Move> {
    Direction::all()
        .flat_map(|d| {
            let neighbour = location.step(d);
            vec![
                Transition::with_action(d, location, neighbour),
                Transition::with_action(d.reverse(), neighbour, location),
            ]
        })
        .collect()
}

impl<M> TransitionFunction<Point, Direction> for GridProblem<M>
where
    M: Map,
{
    fn successors<'a>(&'a self, state: &Point) -> Transitions<'a, Point, Direction> {
        let origin = *state;
        Box::new(
            Direction::all()
                .map(move |d| Transition::with_action(d, origin, origin.step(d)))
                .filter(move |t| self.map.is_traversable(*t.to())),
        )
    }

    fn predecessors<'a>(&'a self, state: &Point) -> Transitions<'a, Point, Direction> {
        let destination = *state;
        Box::new(
            Direction::all()
                .map(move |d| Transition::with_action(d.reverse(), destination.step(d), destination)),
        )
    }
}

impl<M> CostFunction<Point, Direction, usize> for GridProblem<M>
where
    M: Map,
{
    fn cost(&self, transition: &Move) -> usize {
        let open = transition
            .from()
            .map(|from| self.map.is_traversable(*from))
            .unwrap_or(false)
            && self.map.is_traversable(*transition.to());
        if open {
            1
        } else {
            self.algebra.max()
        }
    }
}

impl<M> HeuristicFunction<Point, usize> for GridProblem<M>
where
    M: Map,
{
    /// Manhattan distance to the nearest goal.
    fn estimate(&self, state: &Point) -> usize {
        self.goals
            .iter()
            .map(|goal| state.manhattan_distance(*goal))
            .min()
            .and_then(|d| usize::try_from(d).ok())
            .unwrap_or(0)
    }
}
