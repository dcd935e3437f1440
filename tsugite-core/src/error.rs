//! Error types for the Tsugite core library.
//!
//! Contract violations on the solve boundary are reported as
//! [`JoiningError`] values before any solver state is built, so a failed call
//! never yields a partial partition.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running [`crate::GreedyJoining`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JoiningError {
    /// The edge list and the weight list have different lengths.
    #[error("{edges} edges were given with {weights} weights")]
    EdgeWeightLengthMismatch {
        /// Number of edges supplied by the caller.
        edges: usize,
        /// Number of weights supplied by the caller.
        weights: usize,
    },
    /// An edge referenced a vertex outside `0..vertex_count`.
    #[error("edge {edge} references vertex {vertex}, but the instance has {vertex_count} vertices")]
    VertexOutOfBounds {
        /// Position of the offending edge in the input.
        edge: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in the instance.
        vertex_count: usize,
    },
    /// An edge carried a NaN or infinite weight.
    #[error("edge {edge} has non-finite weight {weight}")]
    NonFiniteWeight {
        /// Position of the offending edge in the input.
        edge: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// The tie-breaking jitter amplitude was negative, NaN, or above
    /// [`crate::MAX_NOISE_AMPLITUDE`].
    #[error("noise amplitude must lie in [0, {max:e}] (got {got})", max = crate::MAX_NOISE_AMPLITUDE)]
    InvalidNoiseAmplitude {
        /// The amplitude supplied to the builder.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`JoiningError`] variants.
    enum JoiningErrorCode for JoiningError {
        /// The edge list and the weight list have different lengths.
        EdgeWeightLengthMismatch => EdgeWeightLengthMismatch { .. } => "TSUGITE_EDGE_WEIGHT_LENGTH_MISMATCH",
        /// An edge referenced a vertex outside the instance.
        VertexOutOfBounds => VertexOutOfBounds { .. } => "TSUGITE_VERTEX_OUT_OF_BOUNDS",
        /// An edge carried a NaN or infinite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "TSUGITE_NON_FINITE_WEIGHT",
        /// The tie-breaking jitter amplitude was invalid.
        InvalidNoiseAmplitude => InvalidNoiseAmplitude { .. } => "TSUGITE_INVALID_NOISE_AMPLITUDE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, JoiningError>;
