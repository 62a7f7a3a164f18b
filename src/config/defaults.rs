//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use crate::resolve::Strategy;

use super::OutputFormat;

/// Default resolution strategy.
pub const STRATEGY: Strategy = Strategy::Auto;

/// Default output format.
pub const FORMAT: OutputFormat = OutputFormat::Plain;

/// Default config file name written by `init`.
pub const CONFIG_FILE_NAME: &str = "host-ipv4.toml";
