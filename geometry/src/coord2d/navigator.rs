//! Incremental replanning while the map changes.
//!
//! A [Navigator] keeps one AD* search alive for the lifetime of a map.
//! When cells are blocked or opened up, only the affected part of the
//! search is repaired, instead of searching again from scratch.
use searcher::{anytime::Planner, AdStarForward, SearchOptions, SearchResult};

use super::grid::{moves_around, GridAlgebra, GridProblem};
use super::map::Obstacles;
use super::path::Path;
use super::{Direction, Point};

type GridPlanner<M> = Planner<Point, Direction, GridProblem<M>, GridAlgebra>;

#[derive(Debug)]
pub struct Navigator<M>
where
    M: Obstacles,
{
    planner: GridPlanner<M>,
    epsilon: f64,
}

impl<M> Navigator<M>
where
    M: Obstacles,
{
    /// Plan on `map` from `start` to the closest of `goals`.
    ///
    /// Every plan starts out inflated by `epsilon` and is then refined.
    pub fn new(map: M, start: Point, goals: Vec<Point>, epsilon: f64) -> SearchResult<Self> {
        let problem = GridProblem::new(map, goals.clone());
        let search = AdStarForward::new(start, goals, problem, GridAlgebra::new(), epsilon)?;
        Ok(Self {
            planner: Planner::new(search),
            epsilon,
        })
    }

    pub fn with_options(self, options: SearchOptions) -> Self {
        Self {
            planner: self.planner.with_options(options),
            epsilon: self.epsilon,
        }
    }

    pub fn map(&self) -> &M {
        self.planner.search().problem().map()
    }

    pub fn start(&self) -> Point {
        *self.planner.search().start().state()
    }

    /// Current shortest path, repairing the search after map changes.
    pub fn plan(&mut self) -> SearchResult<Path> {
        let plan = self.planner.refine()?;
        Ok(plan.states.into())
    }

    /// Wall off `location`. Returns false if it was not open.
    pub fn block(&mut self, location: Point) -> SearchResult<bool> {
        let changed = self.planner.search_mut().problem_mut().map_mut().block(location);
        if changed {
            self.changed(location)?;
        }
        Ok(changed)
    }

    /// Open up `location`. Returns false if it was not blocked.
    pub fn unblock(&mut self, location: Point) -> SearchResult<bool> {
        let changed = self.planner.search_mut().problem_mut().map_mut().unblock(location);
        if changed {
            self.changed(location)?;
        }
        Ok(changed)
    }

    // Every change restarts the anytime refinement at the initial epsilon.
    fn changed(&mut self, location: Point) -> SearchResult<()> {
        let search = self.planner.search_mut();
        search.report_changes(moves_around(location));
        search.set_epsilon(self.epsilon)
    }
}

#[cfg(test)]
mod tests {
    use searcher::SearchError;

    use super::super::map::Map;
    use super::super::maze::Maze;
    use super::*;

    fn navigator(maze: &str, epsilon: f64) -> Navigator<Maze> {
        let maze: Maze = maze.parse().unwrap();
        let start = maze.start();
        let goals = maze.goals().to_vec();
        Navigator::new(maze, start, goals, epsilon).unwrap()
    }

    fn fresh_distance(navigator: &Navigator<Maze>) -> Option<usize> {
        let maze = navigator.map();
        maze.path(maze.start(), maze.goals()[0]).map(|p| p.distance())
    }

    #[test]
    fn detour() {
        let mut navigator = navigator(include_str!("../../mazes/corridor.txt"), 1.0);
        assert_eq!(navigator.plan().unwrap().distance(), 4);

        assert!(navigator.block(Point::new(3, 1)).unwrap());
        let path = navigator.plan().unwrap();
        assert_eq!(path.distance(), 8);
        assert!(path.contains(&Point::new(3, 3)));

        assert!(navigator.unblock(Point::new(3, 1)).unwrap());
        assert_eq!(navigator.plan().unwrap().distance(), 4);
    }

    #[test]
    fn cut_off() {
        let mut navigator = navigator(include_str!("../../mazes/spiral.txt"), 2.0);
        assert_eq!(navigator.plan().unwrap().distance(), 16);

        assert!(navigator.block(Point::new(9, 2)).unwrap());
        assert!(!navigator.block(Point::new(9, 2)).unwrap());
        match navigator.plan() {
            Err(SearchError::NoResultFound) => {}
            other => panic!("Expected no path, got {:?}", other),
        }

        assert!(navigator.unblock(Point::new(9, 2)).unwrap());
        let path = navigator.plan().unwrap();
        assert_eq!(path.distance(), 16);
        assert_eq!(path.origin(), &navigator.start());
    }

    #[test]
    fn step_limit_after_a_wall_appears() {
        let corridor = include_str!("../../mazes/corridor.txt");
        let mut unlimited = navigator(corridor, 1.0);
        unlimited.plan().unwrap();
        let steps = unlimited.planner.search().steps();

        // Enough for the first plan and the repair pass, not for replanning.
        let options = {
            let mut o = SearchOptions::default();
            o.limit = Some(steps + 1);
            o
        };
        let mut navigator = navigator(corridor, 1.0).with_options(options);
        assert_eq!(navigator.plan().unwrap().distance(), 4);

        assert!(navigator.block(Point::new(3, 1)).unwrap());
        match navigator.plan() {
            Err(SearchError::StepLimitExhausted(_)) => {}
            other => panic!("Expected an exhausted step limit, got {:?}", other),
        }
    }

    #[test]
    fn agrees_with_fresh_searches() {
        let mut navigator = navigator(include_str!("../../mazes/spiral.txt"), 3.0);
        let changes = [
            (Point::new(5, 2), true),
            (Point::new(4, 1), false),
            (Point::new(5, 2), false),
            (Point::new(2, 1), true),
            (Point::new(8, 1), true),
            (Point::new(8, 1), false),
        ];

        for (cell, block) in changes.iter() {
            if *block {
                navigator.block(*cell).unwrap();
            } else {
                navigator.unblock(*cell).unwrap();
            }
            let replanned = navigator.plan().ok().map(|p| p.distance());
            assert_eq!(replanned, fresh_distance(&navigator), "after changing {}", cell);
        }
    }
}
