//! Shortest paths on a map, found with AD* at inflation 1.
use searcher::{anytime, AdStarForward, SearchResult};

use super::grid::{GridAlgebra, GridProblem};
pub use super::map::Map;
pub use super::path::Path;
use super::Point;

/// Implements pathfinding for a map.
#[derive(Debug, Clone)]
pub struct Pathfinder<'m, M> {
    map: &'m M,
}

impl<'m, M> Pathfinder<'m, M>
where
    M: Map,
{
    /// Construct a new pathfinder.
    pub(crate) fn new(map: &'m M) -> Self {
        Self { map }
    }

    /// Find a shortest path between the origin and destination given.
    ///
    /// When no path exists and the search is exhausted, return None.
    pub fn find_path(&self, origin: Point, destination: Point) -> Option<Path> {
        if !self.map.is_traversable(origin) {
            return None;
        }
        self.search(origin, vec![destination]).ok()
    }

    /// Find a shortest path to whichever of `destinations` is closest.
    pub fn search(&self, origin: Point, destinations: Vec<Point>) -> SearchResult<Path> {
        let problem = GridProblem::new(self.map, destinations.clone());
        let search =
            AdStarForward::new(origin, destinations, problem, GridAlgebra::new(), 1.0)?;
        let plan = anytime::build(search).run()?;
        Ok(plan.states.into())
    }
}
