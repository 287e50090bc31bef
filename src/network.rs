//! Weighted graphs written as edge lists.
//!
//! One statement per line:
//!
//! ```text
//! # a comment
//! A -> B 3     directed edge
//! A -- B 3     edge in both directions
//! h A 5        heuristic estimate of the cost from A to the goal
//! ```
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use searcher::{Additive, Graph, Transition};

use crate::ReplanError;

pub type Network = Graph<String, f64>;

lazy_static! {
    static ref EDGE: Regex =
        Regex::new(r"^(?P<from>[\w.']+)\s*(?P<kind>->|--)\s*(?P<to>[\w.']+)\s+(?P<weight>\S+)$")
            .unwrap();
    static ref ESTIMATE: Regex = Regex::new(r"^h\s+(?P<node>[\w.']+)\s+(?P<weight>\S+)$").unwrap();
    static ref CHANGE: Regex =
        Regex::new(r"^\s*(?P<from>[\w.']+)\s*->\s*(?P<to>[\w.']+)\s*=\s*(?P<weight>\S+)\s*$")
            .unwrap();
}

fn weight(literal: &str) -> Result<f64, ReplanError> {
    match literal.parse::<f64>() {
        Ok(w) if w >= 0.0 => Ok(w),
        _ => Err(ReplanError::InvalidWeight(literal.to_string())),
    }
}

/// Read an edge list into a graph priced with [Additive] costs.
pub fn parse<R: Read>(input: R) -> Result<Network, ReplanError> {
    let mut graph = Graph::for_algebra(&Additive::new());

    for (n, line) in BufReader::new(input).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(cap) = EDGE.captures(line) {
            let (from, to) = (cap["from"].to_string(), cap["to"].to_string());
            let w = weight(&cap["weight"])?;
            if &cap["kind"] == "--" {
                graph.insert_undirected(from, to, w);
            } else {
                graph.insert(from, to, w);
            }
        } else if let Some(cap) = ESTIMATE.captures(line) {
            graph.set_estimate(cap["node"].to_string(), weight(&cap["weight"])?);
        } else {
            return Err(ReplanError::InvalidLine(n + 1, line.to_string()));
        }
    }

    Ok(graph)
}

/// A new weight for one directed edge, written `A->B=W`.
///
/// An infinite weight removes the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl Change {
    /// Apply the change, returning the transition whose cost changed.
    pub fn apply(&self, graph: &mut Network) -> Option<Transition<String, ()>> {
        if self.weight.is_infinite() {
            graph.remove(&self.from, &self.to)
        } else {
            Some(graph.insert(self.from.clone(), self.to.clone(), self.weight))
        }
    }
}

impl FromStr for Change {
    type Err = ReplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = CHANGE
            .captures(s)
            .ok_or_else(|| ReplanError::InvalidChange(s.to_string()))?;
        Ok(Change {
            from: cap["from"].to_string(),
            to: cap["to"].to_string(),
            weight: weight(&cap["weight"])?,
        })
    }
}
