//! Parser for the text output of `ifconfig`.
//!
//! # Supported Dialects
//!
//! - **Legacy net-tools** (Ubuntu 12.04 and older): fixed-width interface name
//!   column, `inet addr:A.B.C.D` and `inet6 addr: X::Y/64` labels.
//! - **Modern net-tools** (1.60+, Fedora 17 and later), BSD, macOS and Solaris:
//!   `name: flags=...` headers, `inet A.B.C.D netmask ...` and
//!   `inet6 X::Y prefixlen 64` labels.
//!
//! Both are normalized into [`InterfaceRecord`]s.
//!
//! # Localized Output
//!
//! Only the English labels are recognized. Output produced under another
//! locale (`inet Adresse:10.0.1.13`) yields interface records without
//! addresses. This is a known limitation: the parser never guesses at
//! translated labels and never fails.

use std::sync::LazyLock;

use regex::Regex;

use super::{InterfaceAddress, InterfaceRecord};

/// `inet A.B.C.D` with the optional legacy `addr:` label.
static INET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*inet\s+(?:addr:\s*)?(\d{1,3}(?:\.\d{1,3}){3})(?:\s|$)")
        .expect("INET pattern is valid")
});

/// `inet6 X::Y` with the optional legacy `addr:` label. The prefix length
/// (`/64`) is not captured; a zone suffix (`%lo0`) is.
static INET6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*inet6\s+(?:addr:\s*)?([0-9A-Fa-f:.]*:[0-9A-Fa-f:.]*(?:%[^\s/]+)?)")
        .expect("INET6 pattern is valid")
});

/// Parses `ifconfig` output into interface records in source order.
///
/// Lines that do not start with whitespace open a new interface; indented
/// lines belong to the most recent one. Indented lines before the first
/// interface header are ignored, so text without any header yields an empty
/// vector.
///
/// # Examples
///
/// ```
/// use host_ipv4::network::parse_ifconfig;
///
/// let text = "\
/// eth0      Link encap:Ethernet  HWaddr 42:01:0a:57:50:6e
///           inet addr:10.87.80.110  Bcast:10.87.80.110  Mask:255.255.255.255
/// ";
///
/// let records = parse_ifconfig(text);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name, "eth0");
/// assert_eq!(records[0].addresses[0].value, "10.87.80.110");
/// ```
#[must_use]
pub fn parse_ifconfig(text: &str) -> Vec<InterfaceRecord> {
    let mut records = Vec::new();
    let mut current: Option<InterfaceRecord> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if is_interface_header(line) {
            records.extend(current.take());
            current = Some(InterfaceRecord::new(interface_name(line), Vec::new()));
            continue;
        }

        if let (Some(record), Some(address)) = (current.as_mut(), parse_address_line(line)) {
            record.addresses.push(address);
        }
    }

    records.extend(current);
    records
}

fn is_interface_header(line: &str) -> bool {
    !line.starts_with(char::is_whitespace)
}

/// Extracts the interface name from a header line.
///
/// `"em1: flags=4163<UP>"` gives `"em1"`, `"venet0:0  Link encap"` gives
/// `"venet0:0"`.
fn interface_name(line: &str) -> &str {
    let token = line.split_whitespace().next().unwrap_or_default();
    token.strip_suffix(':').unwrap_or(token)
}

fn parse_address_line(line: &str) -> Option<InterfaceAddress> {
    if let Some(caps) = INET.captures(line) {
        return Some(InterfaceAddress::v4(&caps[1]));
    }

    INET6
        .captures(line)
        .map(|caps| InterfaceAddress::v6(&caps[1]))
}

#[cfg(test)]
#[path = "ifconfig_tests.rs"]
mod tests;
