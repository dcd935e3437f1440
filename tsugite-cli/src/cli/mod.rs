//! Command-line interface for running greedy joining on instance files.
//!
//! The `run` command loads a CPLIB or MULTICUT instance, solves it with the
//! configured variant, optionally repeating the solve with derived seeds, and
//! prints the objective and per-vertex labels.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, FormatArg, OrientationArg, RunCommand, RunRecord,
    VariantArg, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
