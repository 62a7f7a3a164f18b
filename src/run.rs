//! Application execution logic.
//!
//! Builds the collaborators named by the validated configuration, runs one
//! resolution and prints the result to stdout.

use std::io::Write;

use thiserror::Error;

use host_ipv4::config::{OutputFormat, ValidatedConfig};
use host_ipv4::network::FetchError;
use host_ipv4::network::platform::{
    CommandTextSource, FileTextSource, HOSTNAME_PROGRAM, HostCommand,
};
use host_ipv4::resolve::{Resolution, Resolver, Strategy};

#[cfg(windows)]
use host_ipv4::network::platform::{IpHelperAdapterSource, RegistryBindingOrder};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The strategy cannot run on this platform.
    #[error("Strategy '{0}' is not supported on this platform")]
    UnsupportedStrategy(Strategy),

    /// Failed to acquire network information.
    #[error("Failed to read network information: {0}")]
    Fetch(#[from] FetchError),

    /// Failed to render the result as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    /// Failed to write the result to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Resolves the primary address and prints it.
///
/// # Errors
///
/// Returns an error if:
/// - The configured collaborator fails (program missing, non-zero exit, API error)
/// - The output cannot be rendered or written
///
/// Finding no address is not an error.
#[cfg(not(tarpaulin_include))]
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let resolver = build_resolver(config)?;
    tracing::debug!("{resolver:?}");

    let resolution = resolver.resolve()?;
    match resolution.address {
        Some(address) => tracing::debug!("Resolved {address} via {:?}", resolution.source),
        None => tracing::debug!("No primary IPv4 address found"),
    }

    let rendered = render(&resolution, config.format)?;
    let mut stdout = std::io::stdout().lock();
    if !rendered.is_empty() {
        writeln!(stdout, "{rendered}").map_err(RunError::Output)?;
    }
    stdout.flush().map_err(RunError::Output)
}

/// Creates the resolver for `config`.
fn build_resolver(config: &ValidatedConfig) -> Result<Resolver, RunError> {
    let resolver = match config.strategy.resolve_auto() {
        Strategy::Adapters => adapter_resolver()?,
        _ => match &config.input {
            Some(path) => Resolver::ifconfig(FileTextSource::new(path)),
            None => Resolver::ifconfig(CommandTextSource::new(
                &config.ifconfig_program,
                config.ifconfig_args.iter().cloned(),
            )),
        },
    };

    if !config.host_fallback {
        return Ok(resolver);
    }

    Ok(match &config.hostname {
        Some(name) => resolver.with_host_fallback(name.clone(), HostCommand::default()),
        None => resolver.with_host_fallback(
            CommandTextSource::new(HOSTNAME_PROGRAM, Vec::<String>::new()),
            HostCommand::default(),
        ),
    })
}

#[cfg(windows)]
#[allow(clippy::unnecessary_wraps)] // Fallible on other platforms
fn adapter_resolver() -> Result<Resolver, RunError> {
    Ok(Resolver::adapters(
        IpHelperAdapterSource::new(),
        RegistryBindingOrder::new(),
    ))
}

#[cfg(not(windows))]
const fn adapter_resolver() -> Result<Resolver, RunError> {
    Err(RunError::UnsupportedStrategy(Strategy::Adapters))
}

/// Formats a resolution for stdout.
///
/// Plain output is the bare address, or an empty string when nothing was found.
fn render(resolution: &Resolution, format: OutputFormat) -> Result<String, RunError> {
    match format {
        OutputFormat::Plain => Ok(resolution.to_string()),
        OutputFormat::Json => serde_json::to_string(resolution).map_err(RunError::Render),
    }
}
