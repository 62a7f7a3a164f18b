//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Resolution configuration section
    #[serde(default)]
    pub resolve: ResolveSection,

    /// ifconfig invocation section
    #[serde(default)]
    pub ifconfig: IfconfigSection,

    /// Output configuration section
    #[serde(default)]
    pub output: OutputSection,
}

/// Resolution configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveSection {
    /// Strategy: "auto", "ifconfig", or "adapters"
    pub strategy: Option<String>,

    /// Fall back to a hostname lookup when nothing is found
    #[serde(default)]
    pub host_fallback: bool,

    /// Hostname for the fallback lookup
    pub hostname: Option<String>,
}

/// ifconfig invocation section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IfconfigSection {
    /// Path to the ifconfig program
    pub program: Option<String>,

    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,

    /// Saved ifconfig output to parse instead of running the program
    pub input: Option<String>,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "plain" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# host-ipv4 Configuration File

[resolve]
# Resolution strategy (default: auto)
# Accepted values: "auto", "ifconfig", "adapters" (Windows only)
# strategy = "auto"

# Look up the hostname through DNS when no interface address is found
# host_fallback = false

# Hostname for the fallback lookup (default: output of `hostname`)
# hostname = "web01.example.com"

[ifconfig]
# Path to the ifconfig program
# (default: first of /sbin/ifconfig, /usr/sbin/ifconfig, /bin/ifconfig, then PATH)
# program = "/sbin/ifconfig"

# Arguments passed to ifconfig
# Note: CLI --ifconfig-arg values REPLACE these entirely (not merged)
# args = []

# Parse saved ifconfig output instead of running the program
# input = "~/ifconfig.txt"

[output]
# Output format: "plain" or "json" (default: plain)
# format = "plain"
"#
    .to_string()
}
