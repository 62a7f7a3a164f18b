//! Interface records produced by the `ifconfig` text parser.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// Address family label attached to a parsed address literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// An `inet` address.
    V4,
    /// An `inet6` address.
    V6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// A single address literal as it appeared in the tool output.
///
/// The value is kept verbatim (minus any IPv6 prefix length). Whether it is a
/// usable address is decided later by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAddress {
    /// The label the literal was found under.
    pub family: AddressFamily,
    /// The literal itself (e.g. `"10.0.0.1"`, `"fe80::1%lo0"`).
    pub value: String,
}

impl InterfaceAddress {
    /// Creates an `inet` address entry.
    #[must_use]
    pub fn v4(value: impl Into<String>) -> Self {
        Self {
            family: AddressFamily::V4,
            value: value.into(),
        }
    }

    /// Creates an `inet6` address entry.
    #[must_use]
    pub fn v6(value: impl Into<String>) -> Self {
        Self {
            family: AddressFamily::V6,
            value: value.into(),
        }
    }

    /// Returns the parsed IPv4 address if this entry is an `inet` literal
    /// that is a syntactically valid dotted-quad.
    #[must_use]
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self.family {
            AddressFamily::V4 => self.value.parse().ok(),
            AddressFamily::V6 => None,
        }
    }
}

/// One interface block of `ifconfig` output.
///
/// # Ordering
///
/// Both the sequence of records and the addresses within a record keep the
/// order of the source text. Selection relies on it: the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Interface name without the trailing colon (e.g. `"eth0"`, `"venet0:0"`).
    pub name: String,
    /// Addresses in the order they appeared.
    pub addresses: Vec<InterfaceAddress>,
}

impl InterfaceRecord {
    /// Creates a record with the given addresses.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<InterfaceAddress>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }

    /// Returns true if the parser found at least one address for this interface.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// Iterates over the `inet` literals that parse as IPv4 addresses.
    pub fn ipv4_addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.addresses.iter().filter_map(InterfaceAddress::as_ipv4)
    }
}
