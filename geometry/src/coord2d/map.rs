//! Trait to define a map suitable for pathfinding
//! on a 2D coordinate grid.
use std::fmt;

use super::path::Path;
use super::pathfinder::Pathfinder;
use super::Point;

/// Defines a map of locations on a coordinate grid.
///
/// The storage of the map is left to the implementing
/// structure, this trait simply requires a map to
/// return whether a given location is traversable.
///
/// Maps assume that traversal happens one square at
/// a time in 2-D space.
pub trait Map: Sized + fmt::Debug {
    /// Can the sprite step on this location on the path?
    fn is_traversable(&self, location: Point) -> bool;

    /// Build a re-usable pathfinder for this map
    fn pathfinder(&self) -> Pathfinder<Self> {
        Pathfinder::new(self)
    }

    /// Build a shortest path on this map
    fn path(&self, origin: Point, destination: Point) -> Option<Path> {
        self.pathfinder().find_path(origin, destination)
    }
}

impl<'m, M> Map for &'m M
where
    M: Map,
{
    fn is_traversable(&self, location: Point) -> bool {
        M::is_traversable(*self, location)
    }
}

/// Maps whose cells can be walled off and opened up again.
pub trait Obstacles: Map {
    /// Wall off `location`. Returns false when it already was.
    fn block(&mut self, location: Point) -> bool;

    /// Open up `location`. Returns false when it already was open.
    fn unblock(&mut self, location: Point) -> bool;
}
