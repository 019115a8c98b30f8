//! Command implementations and argument parsing for `rhg`.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use rhg_core::{
    AdjacencyGraph, DynamicGraphSource, DynamicHyperbolicGenerator, DynamicParams,
    GeneratedGraph, GeneratorError, GraphEvent, GraphEventKind, GraphGenerator, GraphUpdater,
    HyperbolicGenerator, HyperbolicParams, ReplayError,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_EXPONENT: f64 = 3.0;
const DEFAULT_SEED: u64 = 0x0DD_C0FFEE;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "rhg", about = "Generate random hyperbolic graphs.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate one static hyperbolic random graph.
    Generate(GenerateCommand),
    /// Evolve a dynamic hyperbolic random graph over several rounds.
    Evolve(EvolveCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes.
    #[arg(long)]
    pub nodes: usize,

    /// Target average degree.
    #[arg(long = "average-degree")]
    pub average_degree: f64,

    /// Power-law exponent of the degree distribution (above 2).
    #[arg(long, default_value_t = DEFAULT_EXPONENT)]
    pub exponent: f64,

    /// Seed of the point sampler.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Print the edge list after the summary.
    #[arg(long)]
    pub edges: bool,
}

/// Options accepted by the `evolve` command.
#[derive(Debug, Args, Clone)]
pub struct EvolveCommand {
    /// Number of nodes.
    #[arg(long)]
    pub nodes: usize,

    /// Disk radius as a multiple of the radius that holds `nodes` points.
    #[arg(long, default_value_t = 1.0)]
    pub stretch: f64,

    /// Radial dispersion of the sampled points.
    #[arg(long, default_value_t = 1.0)]
    pub dispersion: f64,

    /// Threshold as a fraction of the disk radius before the first round.
    #[arg(long = "initial-factor", default_value_t = 1.0)]
    pub initial_factor: f64,

    /// Amount added to the threshold factor every round.
    #[arg(long = "factor-growth", default_value_t = 0.0, allow_negative_numbers = true)]
    pub factor_growth: f64,

    /// Probability that a node moves in a round.
    #[arg(long = "moved-share", default_value_t = 0.0)]
    pub moved_share: f64,

    /// Largest step of a moving node.
    #[arg(long = "move-distance", default_value_t = 0.0)]
    pub move_distance: f64,

    /// Number of rounds to generate.
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,

    /// Seed of the sampler and of every round.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Print every event after the summary.
    #[arg(long)]
    pub events: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The generator rejected its inputs.
    #[error(transparent)]
    Core(#[from] GeneratorError),
    /// The generated event stream did not replay cleanly.
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

impl CliError {
    /// Stable code of the underlying core error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(err) => err.code().as_str(),
            Self::Replay(err) => err.code().as_str(),
        }
    }
}

/// Addition and removal counts of one dynamic round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoundSummary {
    /// Edges added.
    pub additions: usize,
    /// Edges removed.
    pub removals: usize,
}

/// Outcome of the `evolve` command.
#[derive(Clone, Debug)]
pub struct EvolveSummary {
    /// Number of nodes.
    pub nodes: usize,
    /// Edge count before the first round.
    pub initial_edges: usize,
    /// Per-round counts.
    pub rounds: Vec<RoundSummary>,
    /// Edge count of the replayed graph after the last round.
    pub final_edges: usize,
    /// Threshold after the last round.
    pub threshold: f64,
    /// Round events, when requested.
    pub events: Option<Vec<GraphEvent>>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Clone, Debug)]
pub enum ExecutionSummary {
    /// A static graph, optionally with its edge list.
    Generated {
        /// The generated graph.
        graph: GeneratedGraph,
        /// Whether to print the edges.
        list_edges: bool,
    },
    /// A dynamic run.
    Evolved(EvolveSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the generator rejects its inputs or its event
/// stream fails to replay.
///
/// # Examples
/// ```
/// use rhg_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         nodes: 500,
///         average_degree: 6.0,
///         exponent: 3.0,
///         seed: 1,
///         edges: false,
///     }),
/// };
/// let ExecutionSummary::Generated { graph, .. } = run_cli(cli)? else {
///     unreachable!("generate yields a static graph");
/// };
/// assert_eq!(graph.node_count(), 500);
/// # Ok::<(), rhg_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", "generate");
            run_generate(&command)
        }
        Command::Evolve(command) => {
            span.record("command", "evolve");
            run_evolve(&command).map(ExecutionSummary::Evolved)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = command.nodes, average_degree = command.average_degree, seed = command.seed),
)]
pub(super) fn run_generate(command: &GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let params = HyperbolicParams::new(command.nodes, command.average_degree, command.exponent)?
        .with_seed(command.seed);
    let graph = HyperbolicGenerator::new(params).generate()?;
    info!(
        edges = graph.edge_count(),
        average_degree = graph.average_degree(),
        "generate completed"
    );
    Ok(ExecutionSummary::Generated {
        graph,
        list_edges: command.edges,
    })
}

#[instrument(
    name = "cli.evolve",
    err,
    skip(command),
    fields(nodes = command.nodes, rounds = command.rounds, seed = command.seed),
)]
pub(super) fn run_evolve(command: &EvolveCommand) -> Result<EvolveSummary, CliError> {
    let params = DynamicParams::for_nodes(command.nodes, command.stretch)?
        .with_dispersion(command.dispersion)
        .with_initial_factor(command.initial_factor)
        .with_factor_growth(command.factor_growth)
        .with_moved_share(command.moved_share)
        .with_move_distance(command.move_distance);
    let mut generator = DynamicHyperbolicGenerator::random(command.nodes, params, command.seed)?;

    let mut store = AdjacencyGraph::default();
    let mut updater = GraphUpdater::new(&mut store);
    updater.update(&generator.initial_events())?;

    let mut rounds = Vec::with_capacity(command.rounds);
    let mut events = command.events.then(Vec::new);
    for _ in 0..command.rounds {
        let round = generator.generate(1)?;
        updater.update(&round)?;
        rounds.push(RoundSummary {
            additions: count(&round, GraphEventKind::EdgeAddition),
            removals: count(&round, GraphEventKind::EdgeRemoval),
        });
        if let Some(events) = events.as_mut() {
            events.extend(round);
        }
    }

    let summary = EvolveSummary {
        nodes: generator.len(),
        initial_edges: generator.initial_graph().edge_count(),
        rounds,
        final_edges: store.number_of_edges(),
        threshold: generator.threshold(),
        events,
    };
    info!(
        initial_edges = summary.initial_edges,
        final_edges = summary.final_edges,
        "evolve completed"
    );
    Ok(summary)
}

fn count(events: &[GraphEvent], kind: GraphEventKind) -> usize {
    events.iter().filter(|event| event.kind() == kind).count()
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use rhg_cli::cli::{ExecutionSummary, render_summary};
/// # use rhg_core::{Edge, GeneratedGraph};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Generated {
///     graph: GeneratedGraph::new(3, vec![Edge::new(0, 2)], 1.5),
///     list_edges: true,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("0\t2\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Generated { graph, list_edges } => {
            writeln!(writer, "nodes: {}", graph.node_count())?;
            writeln!(writer, "edges: {}", graph.edge_count())?;
            writeln!(writer, "average degree: {:.3}", graph.average_degree())?;
            writeln!(writer, "threshold: {:.6}", graph.threshold())?;
            if *list_edges {
                for edge in graph.edges() {
                    writeln!(writer, "{}\t{}", edge.u(), edge.v())?;
                }
            }
        }
        ExecutionSummary::Evolved(evolved) => {
            writeln!(writer, "nodes: {}", evolved.nodes)?;
            writeln!(writer, "initial edges: {}", evolved.initial_edges)?;
            for (index, round) in evolved.rounds.iter().enumerate() {
                writeln!(
                    writer,
                    "round {}\t+{}\t-{}",
                    index + 1,
                    round.additions,
                    round.removals
                )?;
            }
            writeln!(writer, "final edges: {}", evolved.final_edges)?;
            writeln!(writer, "threshold: {:.6}", evolved.threshold)?;
            for event in evolved.events.iter().flatten() {
                writeln!(writer, "{event}")?;
            }
        }
    }
    Ok(())
}
