//! Resolution pipeline: acquire raw network information, then select the
//! primary IPv4 address.
//!
//! [`Resolver`] wires the collaborators chosen at startup to the pure
//! selection functions in [`crate::network`]. "Nothing found" is a
//! [`Resolution`] with no address, never an error.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::network::host_lookup::{parse_host_output, parse_hostname_output};
use crate::network::{
    AdapterCandidate, AdapterSource, BindingOrderSource, FetchError, HostLookupSource, TextSource,
    parse_ifconfig, select_adapter_address, select_primary_address,
};

/// How the primary address is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Adapters on Windows, ifconfig elsewhere.
    #[default]
    Auto,
    /// Parse `ifconfig` text.
    Ifconfig,
    /// Query adapter records and the binding order (Windows only).
    Adapters,
}

impl Strategy {
    /// Replaces [`Strategy::Auto`] with the platform's native strategy.
    #[must_use]
    pub const fn resolve_auto(self) -> Self {
        match self {
            Self::Auto if cfg!(windows) => Self::Adapters,
            Self::Auto => Self::Ifconfig,
            other => other,
        }
    }

    /// Returns `true` if this strategy can run on the current platform.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Adapters) || cfg!(windows)
    }

    /// Returns the configuration name of this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Ifconfig => "ifconfig",
            Self::Adapters => "adapters",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which step produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Parsed `ifconfig` text.
    Ifconfig,
    /// Adapter records and binding order.
    Adapters,
    /// The `host` lookup fallback.
    HostLookup,
    /// No address was found.
    None,
}

/// Outcome of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The primary IPv4 address, if any.
    #[serde(rename = "ipaddress")]
    pub address: Option<Ipv4Addr>,
    /// Where the address came from.
    pub source: ResolutionSource,
}

impl Resolution {
    /// A resolution that found `address` via `source`.
    #[must_use]
    pub const fn found(address: Ipv4Addr, source: ResolutionSource) -> Self {
        Self {
            address: Some(address),
            source,
        }
    }

    /// A resolution that found nothing.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            address: None,
            source: ResolutionSource::None,
        }
    }

    const fn from_option(address: Option<Ipv4Addr>, source: ResolutionSource) -> Self {
        match address {
            Some(address) => Self::found(address, source),
            None => Self::not_found(),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address {
            Some(address) => write!(f, "{address}"),
            None => Ok(()),
        }
    }
}

/// Reads `ifconfig` text and selects the first eligible IPv4 address.
///
/// # Errors
///
/// Returns [`FetchError`] only if the text cannot be obtained.
pub fn resolve_from_text<S: TextSource + ?Sized>(source: &S) -> Result<Option<Ipv4Addr>, FetchError> {
    let text = source.read_text()?;
    let interfaces = parse_ifconfig(&text);

    tracing::debug!("Parsed {} interface(s) from ifconfig output", interfaces.len());
    if !interfaces.is_empty() && interfaces.iter().all(|i| !i.has_addresses()) {
        tracing::debug!("No address labels recognized; the output may be localized");
    }

    Ok(select_primary_address(&interfaces))
}

/// Fetches adapter candidates and selects the active adapter's address.
///
/// The binding order is only read when candidates tie on metric.
///
/// # Errors
///
/// Returns [`FetchError`] if the candidates cannot be fetched.
pub fn resolve_from_adapters<A, B>(adapters: &A, bindings: &B) -> Result<Option<Ipv4Addr>, FetchError>
where
    A: AdapterSource + ?Sized,
    B: BindingOrderSource + ?Sized,
{
    let candidates = adapters.fetch_candidates()?;
    tracing::debug!("Fetched {} adapter candidate(s)", candidates.len());
    Ok(select_adapter_address(&candidates, bindings))
}

/// Looks up the local hostname through DNS and takes the first eligible
/// IPv4 answer.
///
/// A blank hostname yields `Ok(None)` without running the lookup.
///
/// # Errors
///
/// Returns [`FetchError`] if either the hostname or the lookup output
/// cannot be obtained.
pub fn resolve_by_host_lookup<N, L>(hostname: &N, lookup: &L) -> Result<Option<Ipv4Addr>, FetchError>
where
    N: TextSource + ?Sized,
    L: HostLookupSource + ?Sized,
{
    let raw = hostname.read_text()?;
    let Some(name) = parse_hostname_output(&raw) else {
        tracing::debug!("Hostname is empty, skipping host lookup");
        return Ok(None);
    };

    tracing::debug!("Looking up hostname '{name}'");
    Ok(parse_host_output(&lookup.lookup(name)?))
}

/// Collaborators for the primary strategy.
enum Primary {
    Ifconfig(Box<dyn TextSource>),
    Adapters {
        adapters: Box<dyn AdapterSource<Record = AdapterCandidate>>,
        bindings: Box<dyn BindingOrderSource>,
    },
}

/// Collaborators for the hostname lookup fallback.
struct HostFallback {
    hostname: Box<dyn TextSource>,
    lookup: Box<dyn HostLookupSource>,
}

/// Runs the configured strategy, then the optional hostname fallback.
///
/// # Example
///
/// ```
/// use host_ipv4::resolve::{ResolutionSource, Resolver};
///
/// let text = "eth0      Link encap:Ethernet\n          inet addr:10.0.0.7  Bcast:10.0.0.255\n";
/// let resolution = Resolver::ifconfig(text.to_string()).resolve().unwrap();
///
/// assert_eq!(resolution.address, Some("10.0.0.7".parse().unwrap()));
/// assert_eq!(resolution.source, ResolutionSource::Ifconfig);
/// ```
pub struct Resolver {
    primary: Primary,
    fallback: Option<HostFallback>,
}

impl Resolver {
    /// Resolves from `ifconfig` text.
    #[must_use]
    pub fn ifconfig(source: impl TextSource + 'static) -> Self {
        Self {
            primary: Primary::Ifconfig(Box::new(source)),
            fallback: None,
        }
    }

    /// Resolves from adapter records, breaking metric ties with `bindings`.
    #[must_use]
    pub fn adapters(
        adapters: impl AdapterSource<Record = AdapterCandidate> + 'static,
        bindings: impl BindingOrderSource + 'static,
    ) -> Self {
        Self {
            primary: Primary::Adapters {
                adapters: Box::new(adapters),
                bindings: Box::new(bindings),
            },
            fallback: None,
        }
    }

    /// Enables the hostname lookup fallback.
    #[must_use]
    pub fn with_host_fallback(
        mut self,
        hostname: impl TextSource + 'static,
        lookup: impl HostLookupSource + 'static,
    ) -> Self {
        self.fallback = Some(HostFallback {
            hostname: Box::new(hostname),
            lookup: Box::new(lookup),
        });
        self
    }

    /// Returns `true` if the hostname fallback is enabled.
    #[must_use]
    pub const fn has_host_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Runs the resolution.
    ///
    /// A failing fallback is logged and degrades to "not found".
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the primary collaborator fails.
    pub fn resolve(&self) -> Result<Resolution, FetchError> {
        let primary = match &self.primary {
            Primary::Ifconfig(source) => Resolution::from_option(
                resolve_from_text(source.as_ref())?,
                ResolutionSource::Ifconfig,
            ),
            Primary::Adapters { adapters, bindings } => Resolution::from_option(
                resolve_from_adapters(adapters.as_ref(), bindings.as_ref())?,
                ResolutionSource::Adapters,
            ),
        };

        if primary.address.is_some() {
            return Ok(primary);
        }

        let Some(fallback) = &self.fallback else {
            return Ok(primary);
        };

        tracing::debug!("No interface address found, trying host lookup");
        match resolve_by_host_lookup(fallback.hostname.as_ref(), fallback.lookup.as_ref()) {
            Ok(address) => Ok(Resolution::from_option(address, ResolutionSource::HostLookup)),
            Err(e) => {
                tracing::warn!("Host lookup fallback failed: {e}");
                Ok(Resolution::not_found())
            }
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = match self.primary {
            Primary::Ifconfig(_) => Strategy::Ifconfig,
            Primary::Adapters { .. } => Strategy::Adapters,
        };
        f.debug_struct("Resolver")
            .field("primary", &primary)
            .field("host_fallback", &self.has_host_fallback())
            .finish()
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
