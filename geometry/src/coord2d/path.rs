//! Path data structures
//!
//! A path is a sequence of adjacent points on the grid.

use std::fmt;
use std::ops::Deref;

use super::{Direction, Point};

/// A sequence of steps in a 2D geometry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Path {
    steps: Vec<Point>,
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        assert_ne!(points.len(), 0);
        Self { steps: points }
    }
}

impl Path {
    /// Construct a new path which starts from this point.
    pub fn new(origin: Point) -> Self {
        Path {
            steps: vec![origin],
        }
    }

    /// Iterate over the points in this path.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.steps.iter()
    }

    /// Where this path started
    pub fn origin(&self) -> &Point {
        &self.steps[0]
    }

    /// Where this path ends
    pub fn destination(&self) -> &Point {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of steps taken.
    pub fn distance(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.steps.len() < 2
    }

    /// The direction of each step. Jumps between points which are not
    /// adjacent are skipped.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.windows(2).filter_map(|w| w[0].direction(w[1]))
    }
}

impl Deref for Path {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.steps
    }
}

impl fmt::Display for Path {
    /// Writes the origin followed by the step directions, e.g. `0,0 >>v`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.origin())?;
        for direction in self.directions() {
            write!(f, "{}", direction)?;
        }
        Ok(())
    }
}
