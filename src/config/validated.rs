//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::network::platform::locate_ifconfig;
use crate::resolve::Strategy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// How the resolution is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The bare address on one line, or nothing.
    #[default]
    Plain,
    /// `{"ipaddress": ..., "source": ...}`
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Resolution strategy, never [`Strategy::Auto`]
    pub strategy: Strategy,

    /// ifconfig program to run
    pub ifconfig_program: PathBuf,

    /// Arguments for the ifconfig program
    pub ifconfig_args: Vec<String>,

    /// Saved ifconfig output to parse instead of running the program
    pub input: Option<PathBuf>,

    /// Whether to fall back to a hostname lookup
    pub host_fallback: bool,

    /// Hostname for the fallback lookup.
    /// If `None`, the `hostname` program is asked.
    pub hostname: Option<String>,

    /// Output format
    pub format: OutputFormat,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input_str = self
            .input
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ strategy: {}, ifconfig: {}",
            self.strategy,
            self.ifconfig_program.display()
        )?;
        for arg in &self.ifconfig_args {
            write!(f, " {arg}")?;
        }
        write!(
            f,
            ", input: {}, host_fallback: {}, format: {} }}",
            input_str, self.host_fallback, self.format,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The strategy or format value is unknown
    /// - The strategy is not supported on this platform
    /// - An input file is combined with the adapters strategy
    /// - The ifconfig program path is empty
    /// - The input file does not exist
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let strategy = Self::resolve_strategy(cli, toml)?;
        let input = Self::resolve_input(cli, toml, strategy)?;
        let ifconfig_program = Self::resolve_ifconfig_program(cli, toml)?;

        // CLI args replace TOML args entirely
        let ifconfig_args = if cli.ifconfig_args.is_empty() {
            toml.map(|t| t.ifconfig.args.clone()).unwrap_or_default()
        } else {
            cli.ifconfig_args.clone()
        };

        let host_fallback = cli.host_fallback || toml.is_some_and(|t| t.resolve.host_fallback);

        let hostname = cli
            .hostname
            .clone()
            .or_else(|| toml.and_then(|t| t.resolve.hostname.clone()));

        let format = Self::resolve_format(cli, toml)?;

        Ok(Self {
            strategy,
            ifconfig_program,
            ifconfig_args,
            input,
            host_fallback,
            hostname,
            format,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path
    /// (a leading `~` is expanded to the home directory).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_tilde(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_strategy(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Strategy, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let strategy = if let Some(arg) = cli.strategy {
            arg.into()
        } else if let Some(value) = toml.and_then(|t| t.resolve.strategy.as_deref()) {
            parse_strategy(value)?
        } else {
            defaults::STRATEGY
        };

        if !strategy.is_supported() {
            return Err(ConfigError::UnsupportedStrategy {
                strategy: strategy.as_str(),
            });
        }

        Ok(strategy.resolve_auto())
    }

    fn resolve_input(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        strategy: Strategy,
    ) -> Result<Option<PathBuf>, ConfigError> {
        let input = cli.input.as_deref().map(expand_tilde).or_else(|| {
            toml.and_then(|t| t.ifconfig.input.as_deref())
                .map(|p| expand_tilde(Path::new(p)))
        });

        let Some(path) = input else {
            return Ok(None);
        };

        if strategy == Strategy::Adapters {
            return Err(ConfigError::ConflictingOptions {
                first: field::IFCONFIG_INPUT,
                second: "the adapters strategy",
            });
        }

        if !path.is_file() {
            return Err(ConfigError::MissingInput { path });
        }

        Ok(Some(path))
    }

    fn resolve_ifconfig_program(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<PathBuf, ConfigError> {
        let configured = cli.ifconfig.as_deref().or_else(|| {
            toml.and_then(|t| t.ifconfig.program.as_deref())
                .map(Path::new)
        });

        match configured {
            Some(path) if path.as_os_str().is_empty() => Err(ConfigError::EmptyProgram {
                field: field::IFCONFIG_PROGRAM,
            }),
            Some(path) => Ok(expand_tilde(path)),
            None => Ok(locate_ifconfig()),
        }
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        if let Some(arg) = cli.format {
            return Ok(arg.into());
        }

        toml.and_then(|t| t.output.format.as_deref())
            .map_or(Ok(defaults::FORMAT), parse_format)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_strategy(s: &str) -> Result<Strategy, ConfigError> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(Strategy::Auto),
        "ifconfig" => Ok(Strategy::Ifconfig),
        "adapters" => Ok(Strategy::Adapters),
        _ => Err(ConfigError::InvalidStrategy {
            value: s.to_string(),
        }),
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, ConfigError> {
    match s.to_lowercase().as_str() {
        "plain" => Ok(OutputFormat::Plain),
        "json" => Ok(OutputFormat::Json),
        _ => Err(ConfigError::InvalidFormat {
            value: s.to_string(),
        }),
    }
}

/// Replaces a leading `~` with the home directory.
///
/// Paths without a leading `~`, and all paths when the home directory is
/// unknown, are returned unchanged.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
