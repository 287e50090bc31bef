//! Mazes drawn in ASCII, with walls which can change.
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::map::{Map, Obstacles};
use super::path::Path;
use super::{BoundingBox, Point};

/// Error when parsing a maze.
#[derive(Debug, Error)]
pub enum ParseMazeError {
    #[error("Unexpected maze character {0:?} at {1}")]
    UnexpectedCharacter(char, Point),

    #[error("Maze has no start (S)")]
    NoStart,

    #[error("Maze has two starts, at {0} and {1}")]
    MultipleStarts(Point, Point),

    #[error("Maze has no goal (G)")]
    NoGoal,
}

/// A rectangular maze.
///
/// Parsed from text where `#` is a wall, `.` or a space is open floor,
/// `S` is the start and `G` a goal. There is exactly one start and at
/// least one goal. Everything outside the drawn rectangle is a wall.
#[derive(Debug, Clone)]
pub struct Maze {
    walls: HashSet<Point>,
    bounds: BoundingBox,
    start: Point,
    goals: Vec<Point>,
}

impl Maze {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goals(&self) -> &[Point] {
        &self.goals
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn is_wall(&self, location: Point) -> bool {
        self.walls.contains(&location)
    }

    /// Draw the maze with `path` marked by `o`.
    pub fn overlay<'m>(&'m self, path: &'m Path) -> Overlay<'m> {
        Overlay { maze: self, path }
    }

    fn glyph(&self, point: Point) -> char {
        if point == self.start {
            'S'
        } else if self.goals.contains(&point) {
            'G'
        } else if self.walls.contains(&point) {
            '#'
        } else {
            '.'
        }
    }
}

impl FromStr for Maze {
    type Err = ParseMazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut walls = HashSet::new();
        let mut bounds = BoundingBox::empty();
        let mut start: Option<Point> = None;
        let mut goals = Vec::new();

        for (y, line) in s.lines().enumerate() {
            for (x, c) in line.trim_end_matches('\r').chars().enumerate() {
                let point: Point = (x, y).into();
                match c {
                    '#' => {
                        walls.insert(point);
                    }
                    '.' | ' ' => {}
                    'S' => {
                        if let Some(other) = start {
                            return Err(ParseMazeError::MultipleStarts(other, point));
                        }
                        start = Some(point);
                    }
                    'G' => goals.push(point),
                    _ => return Err(ParseMazeError::UnexpectedCharacter(c, point)),
                };
                bounds.include(point);
            }
        }

        let start = start.ok_or(ParseMazeError::NoStart)?;
        if goals.is_empty() {
            return Err(ParseMazeError::NoGoal);
        }

        Ok(Self {
            walls,
            bounds,
            start,
            goals,
        })
    }
}

impl Map for Maze {
    fn is_traversable(&self, location: Point) -> bool {
        self.bounds.contains(location) && !self.walls.contains(&location)
    }
}

impl Obstacles for Maze {
    fn block(&mut self, location: Point) -> bool {
        self.bounds.contains(location) && self.walls.insert(location)
    }

    fn unblock(&mut self, location: Point) -> bool {
        self.walls.remove(&location)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.bounds
            .printer(f, |f, point| write!(f, "{}", self.glyph(*point)))
    }
}

/// A maze drawn together with a path through it.
#[derive(Debug)]
pub struct Overlay<'m> {
    maze: &'m Maze,
    path: &'m Path,
}

impl<'m> fmt::Display for Overlay<'m> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.maze.bounds.printer(f, |f, point| {
            let glyph = match self.maze.glyph(*point) {
                '.' if self.path.contains(point) => 'o',
                glyph => glyph,
            };
            write!(f, "{}", glyph)
        })
    }
}
