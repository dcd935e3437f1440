//! Logging initialisation for the `tsugite` binary.
//!
//! Installs a global `tracing` subscriber writing to stderr, so the clustering
//! printed on stdout stays machine-readable, and bridges the `log` facade.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FORMAT_ENV: &str = "TSUGITE_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output style of the stderr log stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the span stack.
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, LoggingError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }

    fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `TSUGITE_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
}

/// Installs global structured logging once per process.
///
/// `RUST_LOG` selects the level (default `info`) and
/// `TSUGITE_LOG_FORMAT=human|json` the output style. If another subscriber
/// already owns the global slot it is left in place.
///
/// # Errors
/// Returns [`LoggingError`] when `TSUGITE_LOG_FORMAT` is not valid Unicode or
/// names an unsupported format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let format = LogFormat::from_env()?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.compact().boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    let _ = LogTracer::init();
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
    let _ = INITIALISED.set(());
    Ok(())
}
