//! Windows adapter records via `GetAdaptersAddresses` and the adapter
//! binding order from the TCP/IP linkage registry key.

use crate::network::{AdapterCandidate, AdapterSource, BindingOrder, BindingOrderSource, FetchError};
use std::net::{Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_SUCCESS, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6,
};
use windows::Win32::System::Registry::{HKEY_LOCAL_MACHINE, RRF_RT_REG_MULTI_SZ, RegGetValueW};
use windows::core::w;

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Registry key holding the adapter binding order, relative to `HKLM`.
pub const LINKAGE_KEY: &str = r"SYSTEM\CurrentControlSet\Services\Tcpip\Linkage";

/// [`AdapterSource`] backed by `GetAdaptersAddresses`.
///
/// Reports adapters that are operationally up and not software loopback.
/// The device id is the adapter GUID name (`{4AE6B55C-...}`) and the
/// connection metric is the IPv4 interface metric.
///
/// # Example
///
/// ```no_run
/// use host_ipv4::network::AdapterSource;
/// use host_ipv4::network::platform::IpHelperAdapterSource;
///
/// let source = IpHelperAdapterSource::new();
/// for adapter in source.fetch_candidates().expect("Failed to fetch adapters") {
///     println!("{adapter}");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IpHelperAdapterSource {
    _private: (),
}

impl IpHelperAdapterSource {
    /// Creates a new adapter source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AdapterSource for IpHelperAdapterSource {
    type Record = AdapterCandidate;

    fn fetch_candidates(&self) -> Result<Vec<AdapterCandidate>, FetchError> {
        fetch_adapters()
    }
}

/// [`BindingOrderSource`] reading the `Bind` value under [`LINKAGE_KEY`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBindingOrder {
    _private: (),
}

impl RegistryBindingOrder {
    /// Creates a new registry-backed binding order source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl BindingOrderSource for RegistryBindingOrder {
    fn ordered_bindings(&self) -> Result<BindingOrder, FetchError> {
        read_bind_value().map(BindingOrder::new)
    }
}

/// Walks the adapter list returned by `GetAdaptersAddresses`.
fn fetch_adapters() -> Result<Vec<AdapterCandidate>, FetchError> {
    let raw_adapters = get_adapter_addresses()?;

    let mut adapters = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    // The Windows API guarantees alignment of the returned data structures.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: We iterate through a linked list returned by GetAdaptersAddresses.
    // The list is valid as long as the buffer (`raw_adapters`) is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        if let Some(candidate) = parse_adapter(adapter) {
            adapters.push(candidate);
        }

        current = adapter.Next;
    }

    tracing::debug!("Found {} active adapter(s)", adapters.len());
    Ok(adapters)
}

/// Calls `GetAdaptersAddresses`, retrying once with the size the API asks for.
fn get_adapter_addresses() -> Result<Vec<u8>, FetchError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    for _ in 0..2 {
        // SAFETY: We provide a valid buffer and size. The function writes adapter
        // information to the buffer and updates `size` with the required length.
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut size,
            )
        };

        if result == NO_ERROR.0 {
            return Ok(buffer);
        }
        if result != ERROR_BUFFER_OVERFLOW.0 {
            return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
        }
        buffer.resize(size as usize, 0);
    }

    Err(FetchError::Platform {
        message: "adapter list kept growing while it was being read".to_string(),
    })
}

/// Converts one adapter into a candidate.
///
/// Returns `None` for adapters that are down, software loopback, or whose
/// GUID name cannot be read.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<AdapterCandidate> {
    if adapter.OperStatus != IfOperStatusUp || adapter.IfType == IF_TYPE_SOFTWARE_LOOPBACK {
        return None;
    }

    // SAFETY: AdapterName is a NUL-terminated ANSI string owned by the adapter buffer.
    let device_id = unsafe { adapter.AdapterName.to_string().ok()? };

    Some(
        AdapterCandidate::new(collect_addresses(adapter))
            .with_device_id(device_id)
            .with_connection_metric(adapter.Ipv4Metric),
    )
}

/// Collects unicast addresses as strings, in the order Windows lists them.
///
/// # Safety Note
///
/// The pointer casts to `SOCKADDR_IN` and `SOCKADDR_IN6` are allowed despite alignment
/// concerns because Windows guarantees proper alignment of these structures when returned
/// from the networking APIs.
#[allow(clippy::cast_ptr_alignment)]
fn collect_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<String> {
    let mut addresses = Vec::new();

    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: We iterate through a linked list of unicast addresses.
    // Each address is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let addr_entry = unsafe { &*unicast };

        // SAFETY: The Address field contains a valid SOCKET_ADDRESS structure
        // pointing to either SOCKADDR_IN (IPv4) or SOCKADDR_IN6 (IPv6).
        if let Some(sockaddr) = unsafe { addr_entry.Address.lpSockaddr.as_ref() } {
            match sockaddr.sa_family {
                f if f == AF_INET => {
                    // SAFETY: We verified the family is AF_INET, so this is a valid cast.
                    let sockaddr_in =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
                    // SAFETY: sin_addr contains the IPv4 address bytes in network order.
                    let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
                    let addr = Ipv4Addr::new(octets.s_b1, octets.s_b2, octets.s_b3, octets.s_b4);
                    addresses.push(addr.to_string());
                }
                f if f == AF_INET6 => {
                    // SAFETY: We verified the family is AF_INET6, so this is a valid cast.
                    let sockaddr_in6 =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
                    // SAFETY: We verified this is an IPv6 address, so the union field is valid.
                    let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
                    addresses.push(Ipv6Addr::from(octets).to_string());
                }
                _ => {}
            }
        }

        unicast = addr_entry.Next;
    }

    addresses
}

/// Reads the `Bind` `REG_MULTI_SZ` value under [`LINKAGE_KEY`].
fn read_bind_value() -> Result<Vec<String>, FetchError> {
    let mut size: u32 = 0;

    // SAFETY: Size query only; no data buffer is passed.
    let result = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            w!(r"SYSTEM\CurrentControlSet\Services\Tcpip\Linkage"),
            w!("Bind"),
            RRF_RT_REG_MULTI_SZ,
            None,
            None,
            Some(&raw mut size),
        )
    };
    check_registry_result(result)?;

    let mut buffer = vec![0u16; (size as usize).div_ceil(2)];

    // SAFETY: `buffer` holds at least `size` bytes, as reported by the query above.
    let result = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            w!(r"SYSTEM\CurrentControlSet\Services\Tcpip\Linkage"),
            w!("Bind"),
            RRF_RT_REG_MULTI_SZ,
            None,
            Some(buffer.as_mut_ptr().cast()),
            Some(&raw mut size),
        )
    };
    check_registry_result(result)?;

    buffer.truncate(size as usize / 2);
    Ok(split_multi_sz(&buffer))
}

fn check_registry_result(result: WIN32_ERROR) -> Result<(), FetchError> {
    if result == ERROR_SUCCESS {
        return Ok(());
    }
    if result == ERROR_ACCESS_DENIED {
        return Err(FetchError::PermissionDenied {
            context: format!(r"HKLM\{LINKAGE_KEY}\Bind"),
        });
    }
    Err(windows::core::Error::from(result).into())
}

/// Splits a `REG_MULTI_SZ` UTF-16 buffer into its strings.
fn split_multi_sz(buffer: &[u16]) -> Vec<String> {
    buffer
        .split(|&unit| unit == 0)
        .filter(|part| !part.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(parts: &[&str]) -> Vec<u16> {
        let mut buffer = Vec::new();
        for part in parts {
            buffer.extend(part.encode_utf16());
            buffer.push(0);
        }
        buffer.push(0);
        buffer
    }

    #[test]
    fn split_multi_sz_keeps_order() {
        let buffer = encode(&[
            r"\Device\{4AE6B55C-6DD6-427D-A5BB-13535D4BE926}",
            r"\Device\{38762816-7957-42AC-8DAA-3B08D0C857C7}",
        ]);

        assert_eq!(
            split_multi_sz(&buffer),
            vec![
                r"\Device\{4AE6B55C-6DD6-427D-A5BB-13535D4BE926}",
                r"\Device\{38762816-7957-42AC-8DAA-3B08D0C857C7}",
            ]
        );
    }

    #[test]
    fn split_multi_sz_of_empty_value() {
        assert!(split_multi_sz(&[0, 0]).is_empty());
        assert!(split_multi_sz(&[]).is_empty());
    }

    #[test]
    fn sources_construct() {
        let _adapters = IpHelperAdapterSource::new();
        let _bindings = RegistryBindingOrder::default();
    }

    // Integration test: queries the real adapter list.
    #[test]
    fn fetched_candidates_have_device_ids_and_metrics() {
        let candidates = IpHelperAdapterSource::new()
            .fetch_candidates()
            .expect("fetch_candidates() failed");

        for candidate in &candidates {
            assert!(candidate.device_id.is_some(), "{candidate}");
            assert!(candidate.connection_metric.is_some(), "{candidate}");
        }
    }

    #[test]
    fn no_loopback_adapter_is_reported() {
        let candidates = IpHelperAdapterSource::new()
            .fetch_candidates()
            .expect("fetch_candidates() failed");

        assert!(
            candidates
                .iter()
                .all(|c| !c.ip_addresses.iter().any(|a| a == "127.0.0.1")),
            "Loopback adapter should be skipped: {candidates:?}"
        );
    }
}
