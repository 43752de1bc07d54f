//! Subscriber setup for hosts that do not install their own.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter directive '{directive}': {source}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("A global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Build the filter from `RUST_LOG`, falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(default_directive).map_err(|source| LoggingError::InvalidDirective {
            directive: default_directive.to_string(),
            source,
        })
    })
}

/// Install a formatting subscriber as the global default.
///
/// Fails instead of panicking when the host already installed one.
pub fn init(default_directive: &str) -> Result<(), LoggingError> {
    let filter = env_filter(default_directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn second_init_reports_already_installed() {
        // Whichever call wins the race with other tests, a later one must fail.
        let _ = init("info");

        let result = init("info");

        assert!(matches!(result, Err(LoggingError::AlreadyInstalled)));
    }

    #[googletest::test]
    fn env_filter_accepts_module_directives() {
        expect_that!(env_filter("world_localization=debug"), ok(anything()));
    }
}
