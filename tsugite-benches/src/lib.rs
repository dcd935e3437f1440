//! Benchmark support crate for tsugite.
//!
//! Provides a seeded generator of signed graphs with a planted clustering and
//! the parameter types used by the Criterion benchmarks of both joining
//! variants.

pub mod error;
pub mod params;
pub mod source;
