//! Subcommands of the `replan` binary.
//!
//! Each one reads its input, plans, applies the requested changes and
//! plans again, writing the results to an output stream.
pub mod graph;
pub mod maze;
