//! Coordinate work in two dimensions.

use std::cmp;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use itertools::iproduct;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::Position;

pub mod grid;
pub mod map;
pub mod maze;
pub mod navigator;
pub mod path;
pub mod pathfinder;

/// A movement direction on the grid.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// All four directions, in "reading order" of the points they lead to.
    pub fn all() -> impl Iterator<Item = Self> {
        DIRECTIONS.iter().cloned()
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arrow = match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        };
        write!(f, "{}", arrow)
    }
}

/// A cell on the grid. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Position,
    pub y: Position,
}

impl Point {
    pub fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    /// The neighbouring point in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
        }
    }

    /// Iterate over the four neighbours.
    pub fn adjacent(self) -> impl Iterator<Item = Self> {
        Direction::all().map(move |d| self.step(d))
    }

    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Distance when moving along the grid axes only.
    pub fn manhattan_distance(self, other: Point) -> Position {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Direction of the step from `self` to `other`, if they are adjacent.
    pub fn direction(self, other: Point) -> Option<Direction> {
        Direction::all().find(|d| self.step(*d) == other)
    }
}

impl cmp::Ord for Point {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl cmp::PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(Position, Position)> for Point {
    fn from(coordinates: (Position, Position)) -> Self {
        Self::new(coordinates.0, coordinates.1)
    }
}

impl From<(usize, usize)> for Point {
    fn from(coordinates: (usize, usize)) -> Self {
        Self::new(coordinates.0 as Position, coordinates.1 as Position)
    }
}

/// Error when parsing a point from string.
#[derive(Debug, Error)]
pub enum ParsePointError {
    #[error("Invalid Point: {}", _0)]
    InvalidLiteral(String),

    #[error("Invalid Number Literal")]
    InvalidNumber,
}

impl From<::std::num::ParseIntError> for ParsePointError {
    fn from(_: ::std::num::ParseIntError) -> Self {
        ParsePointError::InvalidNumber
    }
}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parses `x,y`, with optional whitespace after the comma.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^\s*(?P<x>-?\d+),\s*(?P<y>-?\d+)\s*$").unwrap();
        };

        let cap = match RE.captures(s) {
            None => return Err(ParsePointError::InvalidLiteral(s.to_string())),
            Some(c) => c,
        };

        Ok(Self::new(cap["x"].parse()?, cap["y"].parse()?))
    }
}

/// A rectangle which encloses points and is aligned
/// with the coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    left: Position,
    right: Position,
    top: Position,
    bottom: Position,
}

impl BoundingBox {
    /// Create a bounding box which covers no points.
    pub fn empty() -> Self {
        Self {
            left: Position::max_value(),
            right: Position::min_value(),
            top: Position::max_value(),
            bottom: Position::min_value(),
        }
    }

    /// Grow the box to include `point`. Returns whether it grew.
    pub fn include(&mut self, point: Point) -> bool {
        let before = *self;
        self.left = cmp::min(self.left, point.x);
        self.right = cmp::max(self.right, point.x);
        self.top = cmp::min(self.top, point.y);
        self.bottom = cmp::max(self.bottom, point.y);
        before != *self
    }

    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.include(*point);
        }
        bbox
    }

    /// Range of vertical positions
    pub fn vertical(&self) -> RangeInclusive<Position> {
        self.top..=self.bottom
    }

    /// Range of horizontal positions
    pub fn horizontal(&self) -> RangeInclusive<Position> {
        self.left..=self.right
    }

    /// Check if a point is contained within this bounding
    /// box, including the edges.
    pub fn contains(&self, point: Point) -> bool {
        self.horizontal().contains(&point.x) && self.vertical().contains(&point.y)
    }

    pub fn width(&self) -> Position {
        if self.right < self.left {
            return 0;
        }
        self.right - self.left + 1
    }

    pub fn height(&self) -> Position {
        if self.bottom < self.top {
            return 0;
        }
        self.bottom - self.top + 1
    }

    /// Iterate through all the points contained in this
    /// bounding box, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(self.vertical(), self.horizontal()).map(|(y, x)| Point::new(x, y))
    }

    /// Call a function which should write a single character at every position
    /// in this bounding box.
    ///
    /// This function will handle newlines. The callback should print
    /// a single character for each point.
    pub fn printer<F>(&self, f: &mut fmt::Formatter, cb: F) -> fmt::Result
    where
        F: Fn(&mut fmt::Formatter, &Point) -> fmt::Result,
    {
        for y in self.vertical() {
            for x in self.horizontal() {
                cb(f, &Point::new(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point() {
        let point = Point::new(1, 1);

        assert_eq!(point.step(Direction::Up), Point::new(1, 0));
        assert_eq!(point.step(Direction::Down), Point::new(1, 2));
        assert_eq!(point.step(Direction::Left), Point::new(0, 1));
        assert_eq!(point.step(Direction::Right), Point::new(2, 1));

        assert_eq!(&point.to_string(), "1,1");
        assert_eq!(
            point.adjacent().collect::<Vec<_>>(),
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );

        assert_eq!(point.direction(Point::new(1, 0)), Some(Direction::Up));
        assert_eq!(point.direction(Point::new(3, 3)), None);
        assert!(point.is_adjacent(Point::new(2, 1)));
        assert_eq!(point.manhattan_distance(Point::new(-2, 5)), 7);
    }

    #[test]
    fn parse_point() {
        assert_eq!("3,4".parse::<Point>().unwrap(), Point::new(3, 4));
        assert_eq!(" -1, 7 ".parse::<Point>().unwrap(), Point::new(-1, 7));
        assert!(matches!(
            "3;4".parse::<Point>(),
            Err(ParsePointError::InvalidLiteral(_))
        ));
        assert!(matches!(
            "99999999999,1".parse::<Point>(),
            Err(ParsePointError::InvalidNumber)
        ));
    }

    #[test]
    fn direction() {
        for direction in Direction::all() {
            let there = Point::new(0, 0).step(direction);
            assert_eq!(there.step(direction.reverse()), Point::new(0, 0));
        }
        assert_eq!(Direction::Left.to_string(), "<");
    }

    #[test]
    fn bbox() {
        let mut bbox = BoundingBox::empty();
        assert_eq!(bbox.width(), 0);
        assert_eq!(bbox.points().count(), 0);

        assert!(bbox.include(Point::new(1, 2)));
        assert!(!bbox.include(Point::new(1, 2)));
        assert_eq!(bbox.width(), 1);
        assert_eq!(bbox.height(), 1);

        bbox.include(Point::new(2, 3));
        assert_eq!(bbox.horizontal(), 1..=2);
        assert_eq!(bbox.vertical(), 2..=3);
        assert!(bbox.contains(Point::new(2, 2)));
        assert!(!bbox.contains(Point::new(0, 2)));

        assert_eq!(
            bbox.points().collect::<Vec<_>>(),
            vec![
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(1, 3),
                Point::new(2, 3)
            ]
        );
    }
}
