//! Text sources backed by external programs or saved output files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::network::{FetchError, HostLookupSource, TextSource};

/// Well-known `ifconfig` locations, probed in order.
pub const IFCONFIG_LOCATIONS: [&str; 3] = ["/sbin/ifconfig", "/usr/sbin/ifconfig", "/bin/ifconfig"];

/// Program name used when none of [`IFCONFIG_LOCATIONS`] exists.
pub const IFCONFIG_PROGRAM: &str = "ifconfig";

/// Default DNS lookup program for the hostname fallback.
pub const HOST_PROGRAM: &str = "host";

/// Default program printing the local hostname.
pub const HOSTNAME_PROGRAM: &str = "hostname";

/// Runs a program and returns its standard output as text.
///
/// Standard error is discarded. A non-zero exit status is a
/// [`FetchError::CommandFailed`].
///
/// # Example
///
/// ```no_run
/// use host_ipv4::network::TextSource;
/// use host_ipv4::network::platform::CommandTextSource;
///
/// let ifconfig = CommandTextSource::new("/sbin/ifconfig", Vec::<String>::new());
/// let text = ifconfig.read_text().expect("ifconfig failed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTextSource {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandTextSource {
    /// Creates a source that runs `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the program arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandTextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl TextSource for CommandTextSource {
    fn read_text(&self) -> Result<String, FetchError> {
        tracing::debug!("Running '{self}'");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| FetchError::Io {
                context: format!("Failed to run '{}'", self.program.display()),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Runs `<program> <hostname>` for each lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    program: PathBuf,
}

impl HostCommand {
    /// Creates a lookup source running `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for HostCommand {
    fn default() -> Self {
        Self::new(HOST_PROGRAM)
    }
}

impl HostLookupSource for HostCommand {
    fn lookup(&self, hostname: &str) -> Result<String, FetchError> {
        CommandTextSource::new(&self.program, [hostname]).read_text()
    }
}

/// Reads previously captured tool output from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTextSource {
    path: PathBuf,
}

impl FileTextSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileTextSource {
    fn read_text(&self) -> Result<String, FetchError> {
        tracing::debug!("Reading saved output from {}", self.path.display());

        let bytes = std::fs::read(&self.path).map_err(|source| FetchError::Io {
            context: format!("Failed to read '{}'", self.path.display()),
            source,
        })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Returns the first existing well-known `ifconfig` path, or the bare
/// program name to be resolved through `PATH`.
#[must_use]
pub fn locate_ifconfig() -> PathBuf {
    locate_first(&IFCONFIG_LOCATIONS, IFCONFIG_PROGRAM)
}

fn locate_first<P: AsRef<Path>>(candidates: &[P], fallback: &str) -> PathBuf {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|path| path.is_file())
        .map_or_else(|| PathBuf::from(fallback), Path::to_path_buf)
}
