//! Argument definitions and execution for the `run` command.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};
use tsugite_core::{
    DEFAULT_NOISE_AMPLITUDE, GreedyJoiningBuilder, Instance, JoiningError, JoiningSolution,
    MergeEvent, MergeObserver, Orientation, Variant,
};
use tsugite_providers_text::{InstanceFormat, TextProviderError, read_instance};

/// Merges between two progress events.
pub(super) const PROGRESS_INTERVAL: usize = 10_000;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "tsugite",
    about = "Greedy joining for weighted correlation clustering."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Solve one instance file and print its clustering.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to a CPLIB or MULTICUT instance.
    pub path: PathBuf,

    /// Instance file layout.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Priority function used to rank merges.
    #[arg(long, value_enum, default_value_t = VariantArg::Lookahead)]
    pub variant: VariantArg,

    /// Endpoint kept on each merge (defaults to the variant's rule).
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Seed for the tie-breaking jitter (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Half-width of the tie-breaking jitter; 0 disables it.
    #[arg(long, default_value_t = DEFAULT_NOISE_AMPLITUDE)]
    pub noise: f64,

    /// Stop after this many merges.
    #[arg(long = "max-merges")]
    pub max_merges: Option<usize>,

    /// Solve the instance this many times. With `--seed S`, run `i` (from 0)
    /// uses seed `S + i`; otherwise each run draws its own seed.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Override name for the instance (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Detect the layout from the header line.
    Auto,
    /// Vertex count followed by the upper-triangle matrix.
    Cplib,
    /// `MULTICUT` header followed by `i j w` lines.
    Multicut,
}

impl From<FormatArg> for InstanceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Auto => Self::Auto,
            FormatArg::Cplib => Self::Cplib,
            FormatArg::Multicut => Self::Multicut,
        }
    }
}

/// `--variant` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Rank merges by weight.
    Plain,
    /// Rank merges by weight over regret.
    Lookahead,
}

impl From<VariantArg> for Variant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Plain => Self::Plain,
            VariantArg::Lookahead => Self::Lookahead,
        }
    }
}

/// `--orientation` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    /// Keep the endpoint with more neighbours.
    LargerDegree,
    /// Keep the smaller vertex id.
    Fixed,
}

impl From<OrientationArg> for Orientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::LargerDegree => Self::LargerDegree,
            OrientationArg::Fixed => Self::Fixed,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The instance file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The instance file could not be parsed.
    #[error(transparent)]
    Text(#[from] TextProviderError),
    /// Configuration or solving failed.
    #[error(transparent)]
    Core(#[from] JoiningError),
    /// `runs` was zero, so there is no solution to report.
    #[error("at least one run is required")]
    NoRuns,
}

impl CliError {
    /// Returns the stable code of the underlying failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "TSUGITE_CLI_IO",
            Self::Text(error) => error.code(),
            Self::Core(error) => error.code().as_str(),
            Self::NoRuns => "TSUGITE_CLI_NO_RUNS",
        }
    }
}

/// Objective and seed of one repeated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunRecord {
    /// One-based run number.
    pub run: u32,
    /// Seed the run was solved with.
    pub seed: u64,
    /// Objective reached by the run.
    pub objective: f64,
    /// Number of final clusters.
    pub clusters: usize,
}

impl RunRecord {
    /// Records `solution` as run number `run`.
    #[must_use]
    pub fn new(run: u32, solution: &JoiningSolution) -> Self {
        Self {
            run,
            seed: solution.seed(),
            objective: solution.objective(),
            clusters: solution.cluster_count(),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the solved instance.
    pub instance: String,
    /// Solver output of the run with the highest objective (the first such
    /// run on ties).
    pub solution: JoiningSolution,
    /// Every run in execution order.
    pub runs: Vec<RunRecord>,
}

impl ExecutionSummary {
    /// Mean objective over all runs, or `None` when no run was recorded.
    #[must_use]
    pub fn mean_objective(&self) -> Option<f64> {
        let (sum, count) = self
            .runs
            .iter()
            .fold((0.0, 0_u32), |(sum, count), record| {
                (sum + record.objective, count.saturating_add(1))
            });
        (count > 0).then(|| sum / f64::from(count))
    }
}

/// Logs a `debug!` event every `interval` merges.
#[derive(Debug)]
pub(super) struct ProgressLogger {
    interval: usize,
}

impl ProgressLogger {
    pub(super) fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl MergeObserver for ProgressLogger {
    fn on_merge(&mut self, event: &MergeEvent) {
        if event.iteration % self.interval == 0 {
            debug!(
                merges = event.iteration,
                clusters = event.clusters,
                cost = event.cost,
                "joining progress"
            );
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or solving fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tsugite_cli::cli::{Cli, Command, FormatArg, RunCommand, VariantArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "3\n5 -10\n3\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         format: FormatArg::Auto,
///         variant: VariantArg::Lookahead,
///         orientation: None,
///         seed: Some(1),
///         noise: 0.0,
///         max_merges: None,
///         runs: 1,
///         name: Some("triangle".into()),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.solution.cluster_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run, &mut ProgressLogger::new(PROGRESS_INTERVAL))
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command, observer),
    fields(
        path = %command.path.display(),
        variant = field::Empty,
        instance = field::Empty,
        runs = command.runs,
    ),
)]
pub(super) fn run_command<O: MergeObserver + ?Sized>(
    command: RunCommand,
    observer: &mut O,
) -> Result<ExecutionSummary, CliError> {
    let variant = Variant::from(command.variant);
    Span::current().record("variant", variant.as_str());

    let mut builder = GreedyJoiningBuilder::new()
        .with_variant(variant)
        .with_noise_amplitude(command.noise)
        .with_max_merges(command.max_merges);
    if let Some(orientation) = command.orientation {
        builder = builder.with_orientation(orientation.into());
    }
    let unseeded = builder.clone().build()?;

    let name = derive_instance_name(&command.path, command.name.as_deref());
    let instance = load_instance(&command.path, name, command.format.into())?;
    Span::current().record("instance", instance.name());

    let mut best: Option<JoiningSolution> = None;
    let mut runs = Vec::new();
    for run in 1..=command.runs {
        let solution = match command.seed {
            Some(seed) => builder
                .clone()
                .with_seed(seed.wrapping_add(u64::from(run - 1)))
                .build()?
                .solve_with_observer(&instance, observer)?,
            None => unseeded.solve_with_observer(&instance, observer)?,
        };
        let record = RunRecord::new(run, &solution);
        debug!(
            run,
            seed = record.seed,
            objective = record.objective,
            clusters = record.clusters,
            "run finished"
        );
        runs.push(record);
        if best
            .as_ref()
            .is_none_or(|current| solution.objective() > current.objective())
        {
            best = Some(solution);
        }
    }
    let Some(solution) = best else {
        return Err(CliError::NoRuns);
    };

    let summary = ExecutionSummary {
        instance: instance.name().to_owned(),
        solution,
        runs,
    };
    info!(
        instance = instance.name(),
        objective = summary.solution.objective(),
        clusters = summary.solution.cluster_count(),
        merges = summary.solution.merges(),
        runs = summary.runs.len(),
        mean_objective = summary.mean_objective(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.load", err, skip_all, fields(format = format.as_str()))]
pub(super) fn load_instance(
    path: &Path,
    name: String,
    format: InstanceFormat,
) -> Result<Instance, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let instance = read_instance(name, BufReader::new(file), format)?;
    debug!(
        vertices = instance.vertex_count(),
        edges = instance.edge_count(),
        "instance loaded"
    );
    Ok(instance)
}

pub(super) fn derive_instance_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "instance".to_owned())
}

/// Renders `summary` to `writer`: a header block followed by one
/// `<vertex>\t<label>` line per vertex of the best run. Repeated runs add a
/// `runs` count, the mean objective and one line per run to the header.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tsugite_cli::cli::{ExecutionSummary, RunRecord, render_summary};
/// # use tsugite_core::GreedyJoiningBuilder;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let solution = GreedyJoiningBuilder::new()
///     .with_noise_amplitude(0.0)
///     .build()?
///     .solve(2, &[[0, 1]], &[1.5])?;
/// let runs = vec![RunRecord::new(1, &solution)];
/// let summary = ExecutionSummary { instance: "pair".into(), solution, runs };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "instance: pair\nobjective: 1.5\nclusters: 1\nmerges: 1\n0\t0\n1\t0\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let solution = &summary.solution;
    writeln!(writer, "instance: {}", summary.instance)?;
    writeln!(writer, "objective: {}", solution.objective())?;
    writeln!(writer, "clusters: {}", solution.cluster_count())?;
    writeln!(writer, "merges: {}", solution.merges())?;
    if summary.runs.len() > 1 {
        writeln!(writer, "runs: {}", summary.runs.len())?;
        if let Some(mean) = summary.mean_objective() {
            writeln!(writer, "mean objective: {mean}")?;
        }
        for record in &summary.runs {
            writeln!(
                writer,
                "run {}: seed {}, objective {}, clusters {}",
                record.run, record.seed, record.objective, record.clusters
            )?;
        }
    }
    for (vertex, label) in solution.labels().iter().enumerate() {
        writeln!(writer, "{vertex}\t{}", label.get())?;
    }
    Ok(())
}
