//! Configuration layer for host-ipv4.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For ifconfig arguments (`--ifconfig-arg`), CLI values **replace** TOML
//! `ifconfig.args` entirely (not merged).
//!
//! # Boolean Flag Semantics
//!
//! `--host-fallback` uses OR semantics: if set `true` in either CLI or TOML,
//! the result is `true`. Flags only enable, never disable.
//!
//! # Paths
//!
//! The config file path, `ifconfig.program` and `ifconfig.input` accept a
//! leading `~` for the home directory.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command, FormatArg, StrategyArg};
pub use error::{ConfigError, field};
pub use toml::{IfconfigSection, OutputSection, ResolveSection, TomlConfig, default_config_template};
pub use validated::{OutputFormat, ValidatedConfig, write_default_config};
