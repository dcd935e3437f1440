//! Unit tests for the `run` command and summary rendering.

use super::commands::{ProgressLogger, derive_instance_name, run_command};
use super::{
    Cli, CliError, Command, ExecutionSummary, FormatArg, OrientationArg, RunCommand, RunRecord,
    VariantArg, render_summary, run_cli,
};

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tsugite_core::{GreedyJoiningBuilder, JoiningError, Termination};
use tsugite_providers_text::TextProviderError;
use tsugite_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TRIANGLE_CPLIB: &str = "3\n5 -10\n3\n";
const CHAINS_MULTICUT: &str = "MULTICUT\n0 1 2\n1 2 2.5\n3 4 1\n4 5 1.5\n2 3 -4\n";

#[fixture]
fn workspace() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn write_instance(dir: &TempDir, name: &str, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// `run` arguments with jitter disabled and a pinned seed.
fn exact_run(path: PathBuf) -> RunCommand {
    RunCommand {
        path,
        format: FormatArg::Auto,
        variant: VariantArg::Lookahead,
        orientation: None,
        seed: Some(5),
        noise: 0.0,
        max_merges: None,
        runs: 1,
        name: None,
    }
}

fn run(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    run_cli(Cli {
        command: Command::Run(command),
    })
}

fn labels(summary: &ExecutionSummary) -> Vec<u64> {
    summary
        .solution
        .labels()
        .iter()
        .map(|id| id.get())
        .collect()
}

#[rstest]
#[case::override_name("/tmp/graph.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/graph.txt", None, "graph")]
#[case::stem_without_extension("/tmp/graph", None, "graph")]
#[case::missing_stem("", None, "instance")]
fn derive_instance_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    assert_eq!(derive_instance_name(Path::new(raw_path), override_name), expected);
}

#[rstest]
#[case::plain(VariantArg::Plain)]
#[case::lookahead(VariantArg::Lookahead)]
fn run_solves_cplib_instance(workspace: TempDir, #[case] variant: VariantArg) -> TestResult {
    let path = write_instance(&workspace, "triangle.txt", TRIANGLE_CPLIB)?;
    let summary = run(RunCommand {
        variant,
        ..exact_run(path)
    })?;
    assert_eq!(summary.instance, "triangle");
    assert_eq!(labels(&summary), vec![0, 0, 1]);
    assert_eq!(summary.solution.objective(), 5.0);
    assert_eq!(summary.solution.seed(), 5);
    Ok(())
}

#[rstest]
fn run_honours_name_format_and_merge_limit(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "chains.mc", CHAINS_MULTICUT)?;
    let summary = run(RunCommand {
        format: FormatArg::Multicut,
        variant: VariantArg::Plain,
        orientation: Some(OrientationArg::Fixed),
        max_merges: Some(2),
        name: Some("bridged".into()),
        ..exact_run(path)
    })?;
    assert_eq!(summary.instance, "bridged");
    assert_eq!(summary.solution.merges(), 2);
    assert_eq!(summary.solution.cluster_count(), 4);
    assert_eq!(summary.solution.termination(), Termination::MergeLimit);
    Ok(())
}

#[rstest]
#[case::consecutive(5, vec![5, 6, 7])]
#[case::wrapping(u64::MAX, vec![u64::MAX, 0, 1])]
fn repeated_runs_derive_one_seed_per_run(
    workspace: TempDir,
    #[case] seed: u64,
    #[case] expected: Vec<u64>,
) -> TestResult {
    let path = write_instance(&workspace, "triangle.txt", TRIANGLE_CPLIB)?;
    let summary = run(RunCommand {
        seed: Some(seed),
        runs: 3,
        ..exact_run(path)
    })?;
    let seeds: Vec<u64> = summary.runs.iter().map(|record| record.seed).collect();
    assert_eq!(seeds, expected);
    let numbers: Vec<u32> = summary.runs.iter().map(|record| record.run).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(summary.runs.iter().all(|record| record.objective == 5.0));
    assert_eq!(summary.mean_objective(), Some(5.0));
    assert_eq!(summary.solution.seed(), seed);
    Ok(())
}

#[rstest]
fn unseeded_runs_report_their_own_seeds(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "chains.mc", CHAINS_MULTICUT)?;
    let summary = run(RunCommand {
        seed: None,
        noise: tsugite_core::DEFAULT_NOISE_AMPLITUDE,
        runs: 4,
        ..exact_run(path)
    })?;
    assert_eq!(summary.runs.len(), 4);
    assert!(summary.runs.iter().all(|record| record.clusters == 2));
    assert!(
        summary
            .runs
            .iter()
            .any(|record| record.seed == summary.solution.seed())
    );
    Ok(())
}

#[rstest]
fn render_summary_lists_repeated_runs(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "triangle.txt", TRIANGLE_CPLIB)?;
    let summary = run(RunCommand {
        runs: 3,
        ..exact_run(path)
    })?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        concat!(
            "instance: triangle\nobjective: 5\nclusters: 2\nmerges: 1\n",
            "runs: 3\nmean objective: 5\n",
            "run 1: seed 5, objective 5, clusters 2\n",
            "run 2: seed 6, objective 5, clusters 2\n",
            "run 3: seed 7, objective 5, clusters 2\n",
            "0\t0\n1\t0\n2\t1\n",
        )
    );
    Ok(())
}

#[rstest]
fn mean_objective_averages_recorded_runs() -> TestResult {
    let solution = GreedyJoiningBuilder::new()
        .with_seed(1)
        .with_noise_amplitude(0.0)
        .build()?
        .solve(2, &[[0, 1]], &[3.0])?;
    let record = RunRecord::new(1, &solution);
    let mut summary = ExecutionSummary {
        instance: "pair".into(),
        solution,
        runs: vec![
            record,
            RunRecord {
                run: 2,
                objective: 1.0,
                ..record
            },
        ],
    };
    assert_eq!(summary.mean_objective(), Some(2.0));
    summary.runs.clear();
    assert_eq!(summary.mean_objective(), None);
    Ok(())
}

#[rstest]
fn zero_runs_report_no_solution(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "triangle.txt", TRIANGLE_CPLIB)?;
    let err = run(RunCommand {
        runs: 0,
        ..exact_run(path)
    })
    .expect_err("zero runs must fail");
    assert!(matches!(err, CliError::NoRuns));
    assert_eq!(err.code(), "TSUGITE_CLI_NO_RUNS");
    Ok(())
}

#[rstest]
fn run_reports_missing_file(workspace: TempDir) {
    let path = workspace.path().join("absent.txt");
    let err = run(exact_run(path.clone())).expect_err("missing file must fail");
    assert_eq!(err.code(), "TSUGITE_CLI_IO");
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn run_reports_parse_failures(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "short.txt", "4\n1 2\n")?;
    let err = run(exact_run(path)).expect_err("truncated matrix must fail");
    assert!(matches!(
        err,
        CliError::Text(TextProviderError::MissingWeights {
            expected: 6,
            found: 2
        })
    ));
    assert_eq!(err.code(), "TSUGITE_TEXT_MISSING_WEIGHTS");
    Ok(())
}

#[rstest]
fn run_reports_solver_validation(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "nan.mc", "MULTICUT\n0 1 nan\n")?;
    let err = run(exact_run(path)).expect_err("NaN weight must fail");
    assert!(matches!(
        err,
        CliError::Core(JoiningError::NonFiniteWeight { edge: 0, .. })
    ));
    assert_eq!(err.code(), "TSUGITE_NON_FINITE_WEIGHT");
    Ok(())
}

#[rstest]
fn run_rejects_negative_noise_before_loading(workspace: TempDir) {
    let path = workspace.path().join("never-read.txt");
    let err = run(RunCommand {
        noise: -1.0,
        ..exact_run(path)
    })
    .expect_err("negative noise must fail");
    assert!(matches!(
        err,
        CliError::Core(JoiningError::InvalidNoiseAmplitude { .. })
    ));
}

#[rstest]
fn clap_applies_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["tsugite", "run", "graph.txt"])?;
    let Command::Run(command) = cli.command;
    assert_eq!(command.path, PathBuf::from("graph.txt"));
    assert_eq!(command.format, FormatArg::Auto);
    assert_eq!(command.variant, VariantArg::Lookahead);
    assert_eq!(command.orientation, None);
    assert_eq!(command.seed, None);
    assert_eq!(command.noise, tsugite_core::DEFAULT_NOISE_AMPLITUDE);
    assert_eq!(command.max_merges, None);
    assert_eq!(command.runs, 1);
    Ok(())
}

#[rstest]
fn clap_parses_every_flag() -> TestResult {
    let cli = Cli::try_parse_from([
        "tsugite",
        "run",
        "graph.txt",
        "--format",
        "multicut",
        "--variant",
        "plain",
        "--orientation",
        "larger-degree",
        "--seed",
        "42",
        "--noise",
        "0",
        "--max-merges",
        "10",
        "--runs",
        "20",
        "--name",
        "demo",
    ])?;
    let Command::Run(command) = cli.command;
    assert_eq!(command.format, FormatArg::Multicut);
    assert_eq!(command.variant, VariantArg::Plain);
    assert_eq!(command.orientation, Some(OrientationArg::LargerDegree));
    assert_eq!(command.seed, Some(42));
    assert_eq!(command.noise, 0.0);
    assert_eq!(command.max_merges, Some(10));
    assert_eq!(command.runs, 20);
    assert_eq!(command.name.as_deref(), Some("demo"));
    Ok(())
}

#[rstest]
#[case::unknown_variant(&["tsugite", "run", "g.txt", "--variant", "greedy"])]
#[case::unknown_format(&["tsugite", "run", "g.txt", "--format", "json"])]
#[case::missing_path(&["tsugite", "run"])]
#[case::zero_runs(&["tsugite", "run", "g.txt", "--runs", "0"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn render_summary_writes_header_and_labels() -> TestResult {
    let solution = GreedyJoiningBuilder::new()
        .with_seed(1)
        .with_noise_amplitude(0.0)
        .build()?
        .solve(3, &[[0, 1], [1, 2], [0, 2]], &[5.0, 3.0, -10.0])?;
    let runs = vec![RunRecord::new(1, &solution)];
    let summary = ExecutionSummary {
        instance: "triangle".into(),
        solution,
        runs,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "instance: triangle\nobjective: 5\nclusters: 2\nmerges: 1\n0\t0\n1\t0\n2\t1\n"
    );
    Ok(())
}

#[rstest]
fn run_command_logs_progress_and_spans(workspace: TempDir) -> TestResult {
    let path = write_instance(&workspace, "chains.mc", CHAINS_MULTICUT)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let summary = tracing::subscriber::with_default(subscriber, || {
        run_command(
            RunCommand {
                variant: VariantArg::Plain,
                ..exact_run(path)
            },
            &mut ProgressLogger::new(2),
        )
    })?;
    assert_eq!(summary.solution.merges(), 4);

    let progress = layer.events_with_message("joining progress");
    let merges: Vec<&str> = progress
        .iter()
        .filter_map(|event| event.field("merges"))
        .collect();
    assert_eq!(merges, vec!["2", "4"]);
    assert!(progress.iter().all(|event| event.level == Level::DEBUG));

    let execute = layer
        .span_named("cli.execute")
        .ok_or("cli.execute span must exist")?;
    assert_eq!(execute.field("variant"), Some("plain"));
    assert_eq!(execute.field("instance"), Some("chains"));
    assert_eq!(execute.field("runs"), Some("1"));

    let load = layer.span_named("cli.load").ok_or("cli.load span must exist")?;
    assert_eq!(load.field("format"), Some("auto"));

    let completed = layer.events_with_message("command completed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].field("clusters"), Some("2"));
    Ok(())
}
