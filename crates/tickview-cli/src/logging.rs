use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Logs go to stderr so stdout carries only dashboard output.
pub fn init(default_filter: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|error| {
            CliError::Command(format!("invalid log level '{default_filter}': {error}"))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::Command(format!("failed to install logger: {error}")))
}
