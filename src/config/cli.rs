//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::resolve::Strategy;

use super::OutputFormat;

/// host-ipv4: primary IPv4 address discovery
///
/// Prints the host's primary IPv4 address, read from ifconfig output on
/// Unix-like systems and from active adapter records on Windows.
#[derive(Debug, Parser)]
#[command(name = "host-ipv4")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Resolution strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Path to the ifconfig program
    #[arg(long = "ifconfig", value_name = "PATH")]
    pub ifconfig: Option<PathBuf>,

    /// Argument passed to ifconfig (can be specified multiple times)
    #[arg(long = "ifconfig-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub ifconfig_args: Vec<String>,

    /// Parse saved ifconfig output from this file instead of running the tool
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Fall back to a DNS lookup of the hostname when no interface address is found
    #[arg(long = "host-fallback")]
    pub host_fallback: bool,

    /// Hostname for the fallback lookup (default: output of `hostname`)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for host-ipv4
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

/// Strategy argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Native strategy for this platform
    Auto,
    /// Parse ifconfig output
    Ifconfig,
    /// Query network adapters (Windows only)
    Adapters,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Ifconfig => Self::Ifconfig,
            StrategyArg::Adapters => Self::Adapters,
        }
    }
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// The bare address, or nothing
    Plain,
    /// A JSON object with the address and its source
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
