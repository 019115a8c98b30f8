//! Command-line interface orchestration for `rhg`.
//!
//! `generate` samples one static hyperbolic random graph; `evolve` runs the
//! dynamic generator for a number of rounds and replays its event stream.

mod commands;

pub use commands::{
    Cli, CliError, Command, EvolveCommand, EvolveSummary, ExecutionSummary, GenerateCommand,
    RoundSummary, render_summary, run_cli,
};
