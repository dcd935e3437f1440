//! Property-test run profile read from the environment.
//!
//! Every property suite in the workspace builds its proptest configuration
//! from [`ProptestRunProfile`], so CI can raise case counts or enable forking
//! in one place.

use std::env;

use thiserror::Error;

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const TSUGITE_PBT_FORK_ENV_KEY: &str = "TSUGITE_PBT_FORK";

/// Reasons an override is ignored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    /// The value is not an unsigned integer.
    #[error("not an unsigned integer: {0}")]
    NotANumber(String),
    /// Zero cases would silently disable the property.
    #[error("case count must be positive")]
    ZeroCases,
    /// The value is not one of the accepted boolean spellings.
    #[error("expected true/false, 1/0, yes/no or on/off")]
    NotABool,
}

/// Case count and fork flag for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides, falling back to the given defaults for unset or
    /// malformed variables. Malformed values are reported with `warn!`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsugite_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(TSUGITE_PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Result<T, OverrideError>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|error| {
        tracing::warn!(env = key, raw = %raw, %error, "ignoring property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(_) => Err(OverrideError::NotANumber(raw.trim().to_owned())),
    }
}

fn parse_bool(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABool),
    }
}
