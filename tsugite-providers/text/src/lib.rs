//! Text loaders for correlation-clustering instances.
//!
//! Two line-oriented formats are understood:
//!
//! - **CPLIB**: the first line holds the vertex count `n`; the remaining
//!   whitespace-separated numbers are the strict upper triangle of the weight
//!   matrix in row-major order. Zero entries produce no edge.
//! - **MULTICUT**: the first line is the literal `MULTICUT`; each further
//!   non-blank line is `i j w`. The vertex count is one more than the largest
//!   index seen.
//!
//! ```
//! use std::io::Cursor;
//!
//! use tsugite_providers_text::{InstanceFormat, read_instance};
//!
//! let instance = read_instance("tiny", Cursor::new("3\n1.5 0\n-2\n"), InstanceFormat::Auto)?;
//! assert_eq!(instance.vertex_count(), 3);
//! assert_eq!(instance.edges(), &[[0, 1], [1, 2]]);
//! assert_eq!(instance.weights(), &[1.5, -2.0]);
//! # Ok::<(), tsugite_providers_text::TextProviderError>(())
//! ```

use std::io::{self, BufRead};

use thiserror::Error;
use tsugite_core::Instance;

mod cplib;
mod multicut;

/// Header keyword introducing the MULTICUT edge-list format.
pub const MULTICUT_HEADER: &str = "MULTICUT";

/// Largest vertex count either format may declare or imply. The solver
/// allocates per-vertex state up front, so larger counts are refused while
/// parsing.
pub const MAX_VERTEX_COUNT: usize = 1 << 26;

/// Instance file layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstanceFormat {
    /// Decide from the header line.
    #[default]
    Auto,
    /// Vertex count followed by the upper-triangle weight matrix.
    Cplib,
    /// `MULTICUT` header followed by `i j w` lines.
    Multicut,
}

impl InstanceFormat {
    /// Returns a stable lowercase label for logs and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cplib => "cplib",
            Self::Multicut => "multicut",
        }
    }
}

/// Errors raised while reading an instance. Line numbers are 1-based.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TextProviderError {
    /// Reading from the underlying source failed.
    #[error("failed to read instance: {0}")]
    Io(#[from] io::Error),
    /// The input contained no non-blank line.
    #[error("instance input is empty")]
    EmptyInput,
    /// The header matched neither format.
    #[error("line {line}: unrecognised instance header `{header}`")]
    UnrecognisedFormat {
        /// Line holding the header.
        line: usize,
        /// The header text, trimmed.
        header: String,
    },
    /// A token could not be parsed as the expected number.
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber {
        /// Line holding the token.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A MULTICUT edge line did not have exactly three fields.
    #[error("line {line}: expected `i j w`, found {fields} field(s)")]
    MalformedEdge {
        /// Line holding the edge.
        line: usize,
        /// Number of whitespace-separated fields found.
        fields: usize,
    },
    /// The header or an edge index implies more than [`MAX_VERTEX_COUNT`]
    /// vertices.
    #[error("line {line}: instance needs {count} vertices, more than the limit of {limit}")]
    TooManyVertices {
        /// Line holding the vertex count or index.
        line: usize,
        /// Vertex count implied by that line.
        count: usize,
        /// The accepted maximum.
        limit: usize,
    },
    /// A CPLIB matrix ended before all `n(n-1)/2` entries were read.
    #[error("expected {expected} matrix entries, found {found}")]
    MissingWeights {
        /// Entries required by the vertex count.
        expected: usize,
        /// Entries present in the input.
        found: usize,
    },
    /// A CPLIB matrix carried more than `n(n-1)/2` entries.
    #[error("line {line}: matrix entries beyond the expected {expected}")]
    TrailingWeights {
        /// Line holding the first surplus entry.
        line: usize,
        /// Entries required by the vertex count.
        expected: usize,
    },
}

impl TextProviderError {
    /// Returns a stable machine-readable code for logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "TSUGITE_TEXT_IO",
            Self::EmptyInput => "TSUGITE_TEXT_EMPTY_INPUT",
            Self::UnrecognisedFormat { .. } => "TSUGITE_TEXT_UNRECOGNISED_FORMAT",
            Self::InvalidNumber { .. } => "TSUGITE_TEXT_INVALID_NUMBER",
            Self::MalformedEdge { .. } => "TSUGITE_TEXT_MALFORMED_EDGE",
            Self::TooManyVertices { .. } => "TSUGITE_TEXT_TOO_MANY_VERTICES",
            Self::MissingWeights { .. } => "TSUGITE_TEXT_MISSING_WEIGHTS",
            Self::TrailingWeights { .. } => "TSUGITE_TEXT_TRAILING_WEIGHTS",
        }
    }
}

/// A line of input paired with its 1-based number.
pub(crate) type NumberedLine = io::Result<(usize, String)>;

/// Edge lists parsed from either format, before naming.
pub(crate) struct ParsedGraph {
    pub(crate) vertex_count: usize,
    pub(crate) edges: Vec<[usize; 2]>,
    pub(crate) weights: Vec<f64>,
}

/// Reads an instance called `name` from `reader`.
///
/// The instance is not validated against the solver's preconditions; weights
/// such as `nan` parse successfully and are rejected when solving.
///
/// # Errors
/// Returns [`TextProviderError::EmptyInput`] for blank input,
/// [`TextProviderError::UnrecognisedFormat`] when the header does not match
/// `format`, and the parse errors of the selected format.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use tsugite_providers_text::{InstanceFormat, read_instance};
///
/// let raw = "MULTICUT\n0 1 2.5\n1 4 -1\n";
/// let instance = read_instance("edges", Cursor::new(raw), InstanceFormat::Multicut)?;
/// assert_eq!(instance.vertex_count(), 5);
/// assert_eq!(instance.edge_count(), 2);
/// # Ok::<(), tsugite_providers_text::TextProviderError>(())
/// ```
pub fn read_instance<R: BufRead>(
    name: impl Into<String>,
    reader: R,
    format: InstanceFormat,
) -> Result<Instance, TextProviderError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| line.map(|text| (index + 1, text)));

    let (header_line, header) = loop {
        match lines.next() {
            Some(line) => {
                let (number, text) = line?;
                if !text.trim().is_empty() {
                    break (number, text.trim().to_owned());
                }
            }
            None => return Err(TextProviderError::EmptyInput),
        }
    };

    let parsed = match resolve_format(format, header_line, &header)? {
        InstanceFormat::Cplib => cplib::parse(header_line, &header, lines)?,
        InstanceFormat::Multicut | InstanceFormat::Auto => multicut::parse(lines)?,
    };

    Ok(Instance::new(
        name,
        parsed.vertex_count,
        parsed.edges,
        parsed.weights,
    ))
}

fn resolve_format(
    requested: InstanceFormat,
    line: usize,
    header: &str,
) -> Result<InstanceFormat, TextProviderError> {
    let is_multicut = header.eq_ignore_ascii_case(MULTICUT_HEADER);
    let unrecognised = || TextProviderError::UnrecognisedFormat {
        line,
        header: header.to_owned(),
    };
    match requested {
        InstanceFormat::Cplib => Ok(InstanceFormat::Cplib),
        InstanceFormat::Multicut if is_multicut => Ok(InstanceFormat::Multicut),
        InstanceFormat::Multicut => Err(unrecognised()),
        InstanceFormat::Auto if is_multicut => Ok(InstanceFormat::Multicut),
        InstanceFormat::Auto if header.parse::<usize>().is_ok() => Ok(InstanceFormat::Cplib),
        InstanceFormat::Auto => Err(unrecognised()),
    }
}

/// Rejects vertex counts above [`MAX_VERTEX_COUNT`].
pub(crate) fn check_vertex_count(line: usize, count: usize) -> Result<usize, TextProviderError> {
    if count > MAX_VERTEX_COUNT {
        return Err(TextProviderError::TooManyVertices {
            line,
            count,
            limit: MAX_VERTEX_COUNT,
        });
    }
    Ok(count)
}

pub(crate) fn parse_token<T: std::str::FromStr>(
    line: usize,
    token: &str,
) -> Result<T, TextProviderError> {
    token
        .parse::<T>()
        .map_err(|_| TextProviderError::InvalidNumber {
            line,
            token: token.to_owned(),
        })
}
