//! Capability traits for the external collaborators and their error type.
//!
//! The resolution core never performs I/O. It consumes whatever these
//! sources return, so tests can substitute fabricated data.

use std::path::PathBuf;

use thiserror::Error;

use super::AdapterRecord;

/// Error type for acquiring raw network information.
///
/// Describes what went wrong without dictating recovery strategy.
/// "No address found" is never a `FetchError`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// An I/O operation (spawning a program, reading a file) failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted
        context: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A program ran but exited unsuccessfully.
    #[error("'{}' exited with {status}", program.display())]
    CommandFailed {
        /// The program that was run
        program: PathBuf,
        /// Exit status description
        status: String,
    },

    /// Permission denied to access network information.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// A provider of raw `ifconfig` text.
pub trait TextSource: Send + Sync {
    /// Returns the full tool output.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the text cannot be obtained (program
    /// missing, non-zero exit, unreadable file).
    fn read_text(&self) -> Result<String, FetchError>;
}

/// A provider of adapter candidate records.
///
/// # Implementation Notes
///
/// - Return every candidate the system considers IP-enabled; the selector
///   does the filtering.
/// - Keep the system's enumeration order: it is the tie-break of last resort.
pub trait AdapterSource: Send + Sync {
    /// The record type produced by this source.
    type Record: AdapterRecord;

    /// Fetches the current adapter candidates.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the underlying query fails.
    fn fetch_candidates(&self) -> Result<Vec<Self::Record>, FetchError>;
}

/// A provider of DNS lookup output for a hostname (e.g. `host <hostname>`).
pub trait HostLookupSource: Send + Sync {
    /// Returns the raw lookup output for `hostname`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the lookup tool cannot be run.
    fn lookup(&self, hostname: &str) -> Result<String, FetchError>;
}

/// Fixed text is its own source.
impl TextSource for String {
    fn read_text(&self) -> Result<String, FetchError> {
        Ok(self.clone())
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn read_text(&self) -> Result<String, FetchError> {
        (*self).read_text()
    }
}

impl<T: TextSource + ?Sized> TextSource for Box<T> {
    fn read_text(&self) -> Result<String, FetchError> {
        self.as_ref().read_text()
    }
}
