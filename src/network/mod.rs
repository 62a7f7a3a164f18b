//! Network layer: parsing interface information and selecting the primary
//! IPv4 address.
//!
//! This module provides:
//! - Interface records parsed from `ifconfig` text ([`InterfaceRecord`], [`parse_ifconfig`])
//! - First-usable-address selection ([`select_primary_address`])
//! - Adapter candidate records ([`AdapterRecord`], [`AdapterCandidate`])
//! - The adapter binding order ([`BindingOrder`], [`BindingOrderSource`])
//! - Active-adapter selection ([`select_adapter_address`])
//! - Capability traits for the collaborators ([`TextSource`], [`AdapterSource`])
//! - `host` lookup fallback parsing ([`host_lookup`])
//! - Platform-specific collaborators ([`platform`])

mod adapter;
mod adapter_select;
mod binding;
mod fetcher;
pub mod host_lookup;
mod ifconfig;
mod interface;
pub mod platform;
mod select;

pub use adapter::{AdapterCandidate, AdapterRecord, CandidateError, field};
pub use adapter_select::select_adapter_address;
pub use binding::{BindingOrder, BindingOrderSource};
pub use fetcher::{AdapterSource, FetchError, HostLookupSource, TextSource};
pub use ifconfig::parse_ifconfig;
pub use interface::{AddressFamily, InterfaceAddress, InterfaceRecord};
pub use select::{eligible_ipv4, first_eligible_ipv4, is_eligible, select_primary_address};
