//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid strategy value.
    #[error("Invalid strategy '{value}': expected auto, ifconfig, or adapters")]
    InvalidStrategy {
        /// The invalid value provided
        value: String,
    },

    /// Invalid output format value.
    #[error("Invalid output format '{value}': expected plain or json")]
    InvalidFormat {
        /// The invalid value provided
        value: String,
    },

    /// The strategy cannot run on this platform.
    #[error("Strategy '{strategy}' is not supported on this platform")]
    UnsupportedStrategy {
        /// The requested strategy
        strategy: &'static str,
    },

    /// Two options that cannot be combined.
    #[error("{first} cannot be used with {second}")]
    ConflictingOptions {
        /// The first option
        first: &'static str,
        /// The option it conflicts with
        second: &'static str,
    },

    /// A program path was configured but is empty.
    #[error("Empty program path for {field}")]
    EmptyProgram {
        /// Name of the field
        field: &'static str,
    },

    /// The saved ifconfig output file does not exist.
    #[error("Input file '{}' does not exist", path.display())]
    MissingInput {
        /// Path to the input file
        path: PathBuf,
    },
}

/// Well-known field names used in error messages.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The resolution strategy field.
    pub const STRATEGY: &str = "strategy";
    /// The ifconfig program field.
    pub const IFCONFIG_PROGRAM: &str = "ifconfig.program";
    /// The saved ifconfig input field.
    pub const IFCONFIG_INPUT: &str = "ifconfig.input";
}
