#![deny(clippy::all)]

use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};

use thiserror::Error;

use std::fs::File;
use std::io;
use std::time::Duration;

use searcher::SearchOptions;

pub mod commands;
pub mod network;

type Error = anyhow::Error;
type BoxedRead = Box<dyn ::std::io::Read + 'static>;

/// Arguments shared by every subcommand.
fn search_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("input")
            .value_name("INPUT")
            .required(true)
            .help("Input file, or - for stdin"),
        Arg::with_name("epsilon")
            .long("epsilon")
            .short("e")
            .value_name("EPSILON")
            .default_value("1.0")
            .help("Initial heuristic inflation factor, at least 1"),
        Arg::with_name("step")
            .long("step")
            .value_name("STEP")
            .default_value("0.5")
            .help("Amount to lower epsilon by between plans"),
        Arg::with_name("limit")
            .long("limit")
            .value_name("STEPS")
            .help("Maximum number of search steps"),
        Arg::with_name("time")
            .long("time")
            .value_name("MILLIS")
            .help("Maximum search time"),
        Arg::with_name("verbose")
            .long("verbose")
            .short("v")
            .value_name("EVERY")
            .help("Report search progress every EVERY steps"),
    ]
}

pub fn driver() -> Result<(), Error> {
    let matches = App::new("replan")
        .version("1.0")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Anytime replanning with AD*")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("graph")
                .about("Plan on a graph written as an edge list")
                .args(&search_args())
                .arg(
                    Arg::with_name("from")
                        .long("from")
                        .value_name("NODE")
                        .required(true),
                )
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .value_name("NODE")
                        .required(true),
                )
                .arg(
                    Arg::with_name("change")
                        .long("change")
                        .value_name("A->B=W")
                        .multiple(true)
                        .number_of_values(1)
                        .help("Change an edge weight after planning, inf removes the edge"),
                ),
        )
        .subcommand(
            SubCommand::with_name("maze")
                .about("Plan through an ASCII maze")
                .args(&search_args())
                .arg(
                    Arg::with_name("block")
                        .long("block")
                        .value_name("X,Y")
                        .multiple(true)
                        .number_of_values(1)
                        .help("Wall off a cell after planning"),
                )
                .arg(
                    Arg::with_name("unblock")
                        .long("unblock")
                        .value_name("X,Y")
                        .multiple(true)
                        .number_of_values(1)
                        .help("Open up a cell after planning"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("graph", Some(m)) => commands::graph::main(m),
        ("maze", Some(m)) => commands::maze::main(m),
        (name, _) => Err(ReplanError::UnknownCommand(name.to_string()).into()),
    }
}

/// Search options from the command line flags.
pub fn get_options(matches: &ArgMatches) -> Result<SearchOptions, Error> {
    let mut options = SearchOptions {
        epsilon_step: value_t!(matches, "step", f64)?,
        ..SearchOptions::default()
    };
    if matches.is_present("limit") {
        options.limit = Some(value_t!(matches, "limit", usize)?);
    }
    if matches.is_present("time") {
        options.time_limit = Some(Duration::from_millis(value_t!(matches, "time", u64)?));
    }
    if matches.is_present("verbose") {
        options.verbose = Some(value_t!(matches, "verbose", usize)?);
    }
    Ok(options)
}

pub fn get_input_reader(filename: Option<&str>) -> Result<BoxedRead, Error> {
    let reader: BoxedRead = match filename {
        Some("-") | None => Box::new(::std::io::stdin()),
        Some(path) => {
            let f: File =
                File::open(path).map_err(|e| ReplanError::InputNotFound(path.to_string(), e))?;
            Box::new(f)
        }
    };
    Ok(reader)
}

#[derive(Debug, Error)]
pub enum ReplanError {
    #[error("No command named {0}")]
    UnknownCommand(String),

    #[error("Input not found: {0}")]
    InputNotFound(String, #[source] io::Error),

    #[error("Unable to read input")]
    Unreadable(#[from] io::Error),

    #[error("Invalid line {0}: {1:?}")]
    InvalidLine(usize, String),

    #[error("Invalid weight {0:?}, weights are non-negative numbers")]
    InvalidWeight(String),

    #[error("Invalid change {0:?}, expected A->B=W")]
    InvalidChange(String),

    #[error("Node {0} is not in the graph")]
    UnknownNode(String),
}
