//! Adapter candidate records used by the Windows selection path.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field names reported by [`CandidateError::MissingField`].
pub mod field {
    /// The adapter device identifier (setting GUID).
    pub const DEVICE_ID: &str = "device_id";
    /// The IP connection metric.
    pub const CONNECTION_METRIC: &str = "connection_metric";
}

/// A candidate record that lacks data the selection path needs.
///
/// Only raised when the field is actually read; the selector excludes the
/// candidate instead of failing the whole selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    /// A required field was not set on the record.
    #[error("Adapter record has no {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
}

/// Read access to one adapter record.
///
/// # Design
///
/// The selector only reads `connection_metric` and `device_id` when the
/// decision needs them. Going through a trait lets tests observe exactly
/// which fields were read.
pub trait AdapterRecord {
    /// All addresses assigned to the adapter, IPv4 and IPv6 mixed, unvalidated.
    fn ip_addresses(&self) -> &[String];

    /// The IP connection metric. Lower values are preferred.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::MissingField`] if the record has no metric.
    fn connection_metric(&self) -> Result<u32, CandidateError>;

    /// The stable device identifier embedded in binding-order entries.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::MissingField`] if the record has no identifier.
    fn device_id(&self) -> Result<&str, CandidateError>;
}

/// A materialized adapter record.
///
/// # Examples
///
/// ```
/// use host_ipv4::network::{AdapterCandidate, AdapterRecord};
///
/// let adapter = AdapterCandidate::new(vec!["12.123.12.12".into()])
///     .with_device_id("{4AE6B55C-6DD6-427D-A5BB-13535D4BE926}")
///     .with_connection_metric(10);
///
/// assert_eq!(adapter.connection_metric(), Ok(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterCandidate {
    /// Stable device identifier (e.g. `"{4AE6B55C-6DD6-427D-A5BB-13535D4BE926}"`).
    pub device_id: Option<String>,
    /// Assigned addresses in the order the system reported them.
    pub ip_addresses: Vec<String>,
    /// IP connection metric.
    pub connection_metric: Option<u32>,
}

impl AdapterCandidate {
    /// Creates a candidate with only addresses set.
    #[must_use]
    pub const fn new(ip_addresses: Vec<String>) -> Self {
        Self {
            device_id: None,
            ip_addresses,
            connection_metric: None,
        }
    }

    /// Sets the device identifier (builder pattern).
    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Sets the connection metric (builder pattern).
    #[must_use]
    pub fn with_connection_metric(mut self, metric: u32) -> Self {
        self.connection_metric = Some(metric);
        self
    }
}

impl AdapterRecord for AdapterCandidate {
    fn ip_addresses(&self) -> &[String] {
        &self.ip_addresses
    }

    fn connection_metric(&self) -> Result<u32, CandidateError> {
        self.connection_metric
            .ok_or(CandidateError::MissingField {
                field: field::CONNECTION_METRIC,
            })
    }

    fn device_id(&self) -> Result<&str, CandidateError> {
        self.device_id.as_deref().ok_or(CandidateError::MissingField {
            field: field::DEVICE_ID,
        })
    }
}

impl fmt::Display for AdapterCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.device_id.as_deref().unwrap_or("<no device id>"),
            self.ip_addresses.join(", ")
        )?;
        if let Some(metric) = self.connection_metric {
            write!(f, " metric {metric}")?;
        }
        Ok(())
    }
}

impl<T: AdapterRecord + ?Sized> AdapterRecord for &T {
    fn ip_addresses(&self) -> &[String] {
        (*self).ip_addresses()
    }

    fn connection_metric(&self) -> Result<u32, CandidateError> {
        (*self).connection_metric()
    }

    fn device_id(&self) -> Result<&str, CandidateError> {
        (*self).device_id()
    }
}
