use std::io::{self, Write};

use anyhow::Error;
use clap::{value_t, values_t, ArgMatches};
use searcher::{anytime::Planner, AdStarForward, Additive, Plan, SearchError, SearchOptions};

use crate::network::{self, Change, Network};
use crate::{get_input_reader, get_options, ReplanError};

type GraphPlanner = Planner<String, (), Network, Additive<f64>>;

pub fn main(matches: &ArgMatches) -> Result<(), Error> {
    let network = network::parse(get_input_reader(matches.value_of("input"))?)?;
    let from = value_t!(matches, "from", String)?;
    let to = value_t!(matches, "to", String)?;
    let epsilon = value_t!(matches, "epsilon", f64)?;
    let changes = if matches.is_present("change") {
        values_t!(matches, "change", Change)?
    } else {
        Vec::new()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    replan(
        &mut out,
        network,
        &from,
        &to,
        epsilon,
        get_options(matches)?,
        &changes,
    )
}

fn describe(plan: &Plan<String, (), f64>) -> String {
    format!(
        "e={:.2} cost={} {}",
        plan.epsilon,
        plan.cost,
        plan.states.join(" -> ")
    )
}

/// Plan from `from` to `to`, then apply `changes` and plan again.
pub fn replan<W: Write>(
    out: &mut W,
    network: Network,
    from: &str,
    to: &str,
    epsilon: f64,
    options: SearchOptions,
    changes: &[Change],
) -> Result<(), Error> {
    for node in [from, to].iter() {
        if !network.contains_node(&node.to_string()) {
            return Err(ReplanError::UnknownNode(node.to_string()).into());
        }
    }

    let search = AdStarForward::new(
        from.to_string(),
        vec![to.to_string()],
        network,
        Additive::new(),
        epsilon,
    )?;
    let mut planner = Planner::new(search).with_options(options);
    refine(out, &mut planner)?;

    if changes.is_empty() {
        return Ok(());
    }

    let search = planner.search_mut();
    for change in changes {
        match change.apply(search.problem_mut()) {
            Some(transition) => search.report_change(transition),
            None => writeln!(out, "No edge {} -> {} to remove", change.from, change.to)?,
        }
    }
    search.set_epsilon(epsilon)?;

    writeln!(out, "Replanning after {} changes", changes.len())?;
    refine(out, &mut planner)
}

fn refine<W: Write>(out: &mut W, planner: &mut GraphPlanner) -> Result<(), Error> {
    let mut plans = Vec::new();
    let result = planner.refine_with(|plan| plans.push(describe(plan)));
    for plan in plans {
        writeln!(out, "{}", plan)?;
    }

    match result {
        Ok(_) => Ok(()),
        Err(SearchError::NoResultFound) => {
            writeln!(out, "No path")?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn romania() -> Network {
        network::parse(include_str!("../../data/romania.txt").as_bytes()).unwrap()
    }

    fn run(network: Network, epsilon: f64, changes: &[Change]) -> String {
        let mut out = Vec::new();
        replan(
            &mut out,
            network,
            "Arad",
            "Bucharest",
            epsilon,
            SearchOptions::default(),
            changes,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn anytime_plans() {
        let output = run(romania(), 2.0, &[]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("e=2.00 "));
        assert!(lines[1].starts_with("e=1.50 "));
        assert_eq!(
            lines[2],
            "e=1.00 cost=418 Arad -> Sibiu -> Rimnicu_Vilcea -> Pitesti -> Bucharest"
        );
    }

    #[test]
    fn road_closure() {
        let closed: Change = "Rimnicu_Vilcea->Pitesti=inf".parse().unwrap();
        let output = run(romania(), 1.0, &[closed]);

        assert_eq!(
            output,
            "e=1.00 cost=418 Arad -> Sibiu -> Rimnicu_Vilcea -> Pitesti -> Bucharest\n\
             Replanning after 1 changes\n\
             e=1.00 cost=450 Arad -> Sibiu -> Fagaras -> Bucharest\n"
        );
    }

    #[test]
    fn detour_gets_cheaper() {
        let bypass: Change = "Arad->Bucharest=400".parse().unwrap();
        let output = run(romania(), 1.0, &[bypass]);
        assert!(output.ends_with("e=1.00 cost=400 Arad -> Bucharest\n"));
    }

    #[test]
    fn no_path() {
        let network = network::parse("Arad -> Sibiu 1\nBucharest -> Arad 1\n".as_bytes()).unwrap();
        let output = run(network, 1.0, &[]);
        assert_eq!(output, "No path\n");
    }

    #[test]
    fn unknown_node() {
        let mut out = Vec::new();
        let result = replan(
            &mut out,
            romania(),
            "Arad",
            "Chisinau",
            1.0,
            SearchOptions::default(),
            &[],
        );
        assert!(result.is_err());
    }
}
