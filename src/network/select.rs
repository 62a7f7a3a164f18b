//! Primary address selection over parsed interfaces.

use std::net::Ipv4Addr;

use super::InterfaceRecord;

/// Returns true if `addr` may be reported as a host's primary address.
///
/// Loopback (127.0.0.0/8) and unspecified (0.0.0.0) addresses never qualify.
#[must_use]
pub const fn is_eligible(addr: Ipv4Addr) -> bool {
    !addr.is_loopback() && !addr.is_unspecified()
}

/// Parses a raw address string and returns it if it is an eligible
/// dotted-quad IPv4 address.
///
/// IPv6 literals and anything else that does not parse yield `None`.
#[must_use]
pub fn eligible_ipv4(raw: &str) -> Option<Ipv4Addr> {
    raw.trim()
        .parse::<Ipv4Addr>()
        .ok()
        .filter(|addr| is_eligible(*addr))
}

/// Returns the first eligible IPv4 address from a list of raw strings.
#[must_use]
pub fn first_eligible_ipv4<S: AsRef<str>>(raw: &[S]) -> Option<Ipv4Addr> {
    raw.iter().find_map(|s| eligible_ipv4(s.as_ref()))
}

/// Picks the primary IPv4 address from parsed `ifconfig` interfaces.
///
/// Interfaces are scanned in order, and addresses in order within each
/// interface. The first `inet` address that parses and is eligible wins.
///
/// Returns `None` when nothing qualifies. That is a normal outcome.
///
/// # Examples
///
/// ```
/// use host_ipv4::network::{InterfaceAddress, InterfaceRecord, select_primary_address};
///
/// let interfaces = vec![
///     InterfaceRecord::new("lo", vec![InterfaceAddress::v4("127.0.0.1")]),
///     InterfaceRecord::new("eth0", vec![InterfaceAddress::v4("10.0.0.5")]),
/// ];
///
/// assert_eq!(
///     select_primary_address(&interfaces),
///     Some("10.0.0.5".parse().unwrap())
/// );
/// ```
#[must_use]
pub fn select_primary_address(interfaces: &[InterfaceRecord]) -> Option<Ipv4Addr> {
    interfaces
        .iter()
        .flat_map(InterfaceRecord::ipv4_addresses)
        .find(|addr| is_eligible(*addr))
}
