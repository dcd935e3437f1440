//! Support library for the `tsugite` binary.
//!
//! Exposes the command pipeline and logging set-up so doctests and
//! integration tests can drive them without spawning a subprocess.

pub mod cli;
pub mod logging;
