use std::io::{self, Read, Write};

use anyhow::Error;
use clap::{value_t, values_t, ArgMatches};
use geometry::coord2d::maze::Maze;
use geometry::coord2d::navigator::Navigator;
use geometry::coord2d::Point;
use searcher::{SearchError, SearchOptions};

use crate::{get_input_reader, get_options};

fn points(matches: &ArgMatches, name: &str) -> Result<Vec<Point>, Error> {
    if matches.is_present(name) {
        Ok(values_t!(matches, name, Point)?)
    } else {
        Ok(Vec::new())
    }
}

pub fn main(matches: &ArgMatches) -> Result<(), Error> {
    let mut text = String::new();
    get_input_reader(matches.value_of("input"))?.read_to_string(&mut text)?;
    let maze: Maze = text.parse()?;

    let epsilon = value_t!(matches, "epsilon", f64)?;
    let blocks = points(matches, "block")?;
    let unblocks = points(matches, "unblock")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    replan(
        &mut out,
        maze,
        epsilon,
        get_options(matches)?,
        &blocks,
        &unblocks,
    )
}

/// Plan through `maze`, then change its walls and plan again.
pub fn replan<W: Write>(
    out: &mut W,
    maze: Maze,
    epsilon: f64,
    options: SearchOptions,
    blocks: &[Point],
    unblocks: &[Point],
) -> Result<(), Error> {
    let start = maze.start();
    let goals = maze.goals().to_vec();
    let mut navigator = Navigator::new(maze, start, goals, epsilon)?.with_options(options);
    show(out, &mut navigator)?;

    if blocks.is_empty() && unblocks.is_empty() {
        return Ok(());
    }

    for cell in blocks {
        if !navigator.block(*cell)? {
            writeln!(out, "{} is not an open cell", cell)?;
        }
    }
    for cell in unblocks {
        if !navigator.unblock(*cell)? {
            writeln!(out, "{} is not a wall", cell)?;
        }
    }

    writeln!(out, "Replanning")?;
    show(out, &mut navigator)
}

fn show<W: Write>(out: &mut W, navigator: &mut Navigator<Maze>) -> Result<(), Error> {
    match navigator.plan() {
        Ok(path) => {
            writeln!(out, "{} steps: {}", path.distance(), path)?;
            write!(out, "{}", navigator.map().overlay(&path))?;
        }
        Err(SearchError::NoResultFound) => writeln!(out, "No path")?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(epsilon: f64, blocks: &[Point], unblocks: &[Point]) -> String {
        let maze: Maze = include_str!("../../geometry/mazes/corridor.txt")
            .parse()
            .unwrap();
        let mut out = Vec::new();
        replan(
            &mut out,
            maze,
            epsilon,
            SearchOptions::default(),
            blocks,
            unblocks,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn straight_through() {
        assert_eq!(
            run(2.0, &[], &[]),
            "4 steps: 1,1 >>>>\n\
             #######\n\
             #SoooG#\n\
             #.###.#\n\
             #.....#\n\
             #######\n"
        );
    }

    #[test]
    fn blocked_corridor() {
        let output = run(1.0, &[Point::new(3, 1)], &[]);
        assert!(output.ends_with(
            "Replanning\n\
             8 steps: 1,1 vv>>>>^^\n\
             #######\n\
             #S.#.G#\n\
             #o###o#\n\
             #ooooo#\n\
             #######\n"
        ));
    }

    #[test]
    fn walled_in() {
        let walls = [Point::new(3, 1), Point::new(3, 3), Point::new(0, 0)];
        let output = run(1.0, &walls, &[]);
        assert!(output.contains("0,0 is not an open cell\n"));
        assert!(output.ends_with("Replanning\nNo path\n"));
    }

    #[test]
    fn knocked_through() {
        let openings = [
            Point::new(2, 2),
            Point::new(3, 2),
            Point::new(4, 2),
            Point::new(3, 3),
        ];
        let output = run(1.0, &[Point::new(3, 1)], &openings);
        assert!(output.contains("3,3 is not a wall\n"));
        assert!(output.contains("Replanning\n6 steps: "));
    }
}
