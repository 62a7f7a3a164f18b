//! Concrete collaborators that acquire raw network information.
//!
//! # Platform Support
//!
//! - **All platforms**: [`CommandTextSource`] runs a program (`ifconfig`,
//!   `hostname`, `host`) and [`FileTextSource`] reads saved output.
//! - **Windows**: [`IpHelperAdapterSource`] uses `GetAdaptersAddresses` via the
//!   `windows` crate, and [`RegistryBindingOrder`] reads the TCP/IP linkage
//!   binding order from the registry.

mod command;

#[cfg(windows)]
mod windows;

pub use command::{
    CommandTextSource, FileTextSource, HOST_PROGRAM, HOSTNAME_PROGRAM, HostCommand,
    IFCONFIG_LOCATIONS, IFCONFIG_PROGRAM, locate_ifconfig,
};

#[cfg(windows)]
pub use windows::{IpHelperAdapterSource, LINKAGE_KEY, RegistryBindingOrder};
