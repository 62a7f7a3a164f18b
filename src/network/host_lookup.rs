//! Fallback resolution through the `host` DNS lookup tool.
//!
//! Used only when interface inspection found nothing. The output of
//! `host <hostname>` looks like:
//!
//! ```text
//! web01.example.com has address 10.0.0.5
//! web01.example.com has IPv6 address 2001:db8::5
//! ```

use std::net::Ipv4Addr;

use super::select::eligible_ipv4;

/// Extracts the first eligible IPv4 address from `host` output.
///
/// The last whitespace-separated token of each line is a candidate. Lines
/// whose last token is not an eligible IPv4 address (IPv6 answers, error
/// messages such as `not found: 3(NXDOMAIN)`) are skipped.
///
/// # Examples
///
/// ```
/// use host_ipv4::network::host_lookup::parse_host_output;
///
/// let output = "web01.example.com has address 10.0.0.5\n";
/// assert_eq!(parse_host_output(output), Some("10.0.0.5".parse().unwrap()));
/// ```
#[must_use]
pub fn parse_host_output(text: &str) -> Option<Ipv4Addr> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next_back())
        .find_map(eligible_ipv4)
}

/// Returns the hostname from `hostname` program output.
///
/// The first non-blank line, trimmed. `None` if the output is blank.
#[must_use]
pub fn parse_hostname_output(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
