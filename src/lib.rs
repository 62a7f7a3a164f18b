//! host-ipv4: primary IPv4 address discovery
//!
//! A library for determining a host's primary IPv4 address from
//! `ifconfig` output on Unix-like systems and from active network
//! adapters on Windows.

pub mod config;
pub mod network;
pub mod resolve;
