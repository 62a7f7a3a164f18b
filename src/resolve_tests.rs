//! Tests for the resolution pipeline.

use super::*;
use crate::network::BindingOrder;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

const UBUNTU: &str = include_str!("network/fixtures/ifconfig_ubuntu_1204.txt");
const GERMAN: &str = include_str!("network/fixtures/ifconfig_non_english_locale.txt");
const DARWIN: &str = include_str!("network/fixtures/ifconfig_darwin.txt");

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

// =============================================================================
// Test doubles
// =============================================================================

struct FailingText;

impl TextSource for FailingText {
    fn read_text(&self) -> Result<String, FetchError> {
        Err(FetchError::Platform {
            message: "no ifconfig".to_string(),
        })
    }
}

struct StaticAdapters(Vec<AdapterCandidate>);

impl AdapterSource for StaticAdapters {
    type Record = AdapterCandidate;

    fn fetch_candidates(&self) -> Result<Vec<AdapterCandidate>, FetchError> {
        Ok(self.0.clone())
    }
}

struct FailingAdapters;

impl AdapterSource for FailingAdapters {
    type Record = AdapterCandidate;

    fn fetch_candidates(&self) -> Result<Vec<AdapterCandidate>, FetchError> {
        Err(FetchError::PermissionDenied {
            context: "adapter query".to_string(),
        })
    }
}

/// Records every hostname it is asked about.
struct RecordingLookup {
    output: String,
    seen: Mutex<Vec<String>>,
}

impl RecordingLookup {
    fn answering(output: &str) -> Self {
        Self {
            output: output.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl HostLookupSource for RecordingLookup {
    fn lookup(&self, hostname: &str) -> Result<String, FetchError> {
        self.seen.lock().unwrap().push(hostname.to_string());
        Ok(self.output.clone())
    }
}

impl HostLookupSource for std::sync::Arc<RecordingLookup> {
    fn lookup(&self, hostname: &str) -> Result<String, FetchError> {
        self.as_ref().lookup(hostname)
    }
}

struct FailingLookup;

impl HostLookupSource for FailingLookup {
    fn lookup(&self, _hostname: &str) -> Result<String, FetchError> {
        Err(FetchError::CommandFailed {
            program: "host".into(),
            status: "exit status: 1".to_string(),
        })
    }
}

struct CountingBindings {
    order: BindingOrder,
    calls: AtomicUsize,
}

impl BindingOrderSource for CountingBindings {
    fn ordered_bindings(&self) -> Result<BindingOrder, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.order.clone())
    }
}

impl BindingOrderSource for std::sync::Arc<CountingBindings> {
    fn ordered_bindings(&self) -> Result<BindingOrder, FetchError> {
        self.as_ref().ordered_bindings()
    }
}

// =============================================================================
// Strategy
// =============================================================================

mod strategy {
    use super::*;

    #[test]
    fn auto_picks_platform_native_strategy() {
        let expected = if cfg!(windows) {
            Strategy::Adapters
        } else {
            Strategy::Ifconfig
        };
        assert_eq!(Strategy::Auto.resolve_auto(), expected);
    }

    #[test]
    fn explicit_strategies_are_unchanged() {
        assert_eq!(Strategy::Ifconfig.resolve_auto(), Strategy::Ifconfig);
        assert_eq!(Strategy::Adapters.resolve_auto(), Strategy::Adapters);
    }

    #[test]
    fn adapters_only_supported_on_windows() {
        assert!(Strategy::Ifconfig.is_supported());
        assert!(Strategy::Auto.is_supported());
        assert_eq!(Strategy::Adapters.is_supported(), cfg!(windows));
    }

    #[test]
    fn display_matches_config_names() {
        assert_eq!(Strategy::Auto.to_string(), "auto");
        assert_eq!(Strategy::Ifconfig.to_string(), "ifconfig");
        assert_eq!(Strategy::Adapters.to_string(), "adapters");
    }

    #[test]
    fn deserializes_from_snake_case() {
        let strategy: Strategy = serde_json::from_str("\"adapters\"").unwrap();
        assert_eq!(strategy, Strategy::Adapters);
    }
}

// =============================================================================
// Resolution
// =============================================================================

mod resolution {
    use super::*;

    #[test]
    fn found_serializes_address_and_source() {
        let resolution = Resolution::found(ip("10.0.0.5"), ResolutionSource::Ifconfig);
        assert_eq!(
            serde_json::to_string(&resolution).unwrap(),
            r#"{"ipaddress":"10.0.0.5","source":"ifconfig"}"#
        );
    }

    #[test]
    fn host_lookup_source_is_snake_case() {
        let resolution = Resolution::found(ip("10.0.0.5"), ResolutionSource::HostLookup);
        assert!(serde_json::to_string(&resolution)
            .unwrap()
            .contains(r#""source":"host_lookup""#));
    }

    #[test]
    fn not_found_serializes_null() {
        assert_eq!(
            serde_json::to_string(&Resolution::not_found()).unwrap(),
            r#"{"ipaddress":null,"source":"none"}"#
        );
    }

    #[test]
    fn display_is_bare_address_or_empty() {
        let found = Resolution::found(ip("192.168.1.23"), ResolutionSource::Adapters);
        assert_eq!(found.to_string(), "192.168.1.23");
        assert_eq!(Resolution::not_found().to_string(), "");
    }
}

// =============================================================================
// Pipeline functions
// =============================================================================

mod from_text {
    use super::*;

    #[test]
    fn fixture_resolves() {
        let text = UBUNTU.to_string();
        assert_eq!(resolve_from_text(&text).unwrap(), Some(ip("10.87.80.110")));
    }

    #[test]
    fn localized_output_is_not_found() {
        let text = GERMAN.to_string();
        assert_eq!(resolve_from_text(&text).unwrap(), None);
    }

    #[test]
    fn empty_output_is_not_found() {
        assert_eq!(resolve_from_text(&String::new()).unwrap(), None);
    }

    #[test]
    fn fetch_error_propagates() {
        assert!(matches!(
            resolve_from_text(&FailingText),
            Err(FetchError::Platform { .. })
        ));
    }
}

mod from_adapters {
    use super::*;

    #[test]
    fn lowest_metric_wins() {
        let adapters = StaticAdapters(vec![
            AdapterCandidate::new(vec!["12.123.12.12".into()]).with_connection_metric(10),
            AdapterCandidate::new(vec!["12.123.12.13".into()]).with_connection_metric(5),
        ]);

        assert_eq!(
            resolve_from_adapters(&adapters, &BindingOrder::default()).unwrap(),
            Some(ip("12.123.12.13"))
        );
    }

    #[test]
    fn no_adapters_is_not_found() {
        let adapters = StaticAdapters(Vec::new());
        assert_eq!(
            resolve_from_adapters(&adapters, &BindingOrder::default()).unwrap(),
            None
        );
    }

    #[test]
    fn fetch_error_propagates() {
        assert!(matches!(
            resolve_from_adapters(&FailingAdapters, &BindingOrder::default()),
            Err(FetchError::PermissionDenied { .. })
        ));
    }
}

mod by_host_lookup {
    use super::*;

    #[test]
    fn looks_up_trimmed_hostname() {
        let lookup = RecordingLookup::answering("web01 has address 10.0.0.5\n");
        let hostname = "web01\n".to_string();

        assert_eq!(
            resolve_by_host_lookup(&hostname, &lookup).unwrap(),
            Some(ip("10.0.0.5"))
        );
        assert_eq!(*lookup.seen.lock().unwrap(), vec!["web01".to_string()]);
    }

    #[test]
    fn blank_hostname_skips_lookup() {
        let lookup = RecordingLookup::answering("web01 has address 10.0.0.5\n");

        assert_eq!(
            resolve_by_host_lookup(&"  \n".to_string(), &lookup).unwrap(),
            None
        );
        assert!(lookup.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn nxdomain_is_not_found() {
        let lookup = RecordingLookup::answering("Host web01 not found: 3(NXDOMAIN)\n");
        assert_eq!(
            resolve_by_host_lookup(&"web01".to_string(), &lookup).unwrap(),
            None
        );
    }

    #[test]
    fn lookup_error_propagates() {
        assert!(matches!(
            resolve_by_host_lookup(&"web01".to_string(), &FailingLookup),
            Err(FetchError::CommandFailed { .. })
        ));
    }
}

// =============================================================================
// Resolver
// =============================================================================

mod resolver {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn ifconfig_strategy_reports_source() {
        let resolution = Resolver::ifconfig(DARWIN.to_string()).resolve().unwrap();
        assert_eq!(
            resolution,
            Resolution::found(ip("192.168.1.23"), ResolutionSource::Ifconfig)
        );
    }

    #[test]
    fn localized_output_without_fallback_is_not_found() {
        let resolution = Resolver::ifconfig(GERMAN.to_string()).resolve().unwrap();
        assert_eq!(resolution, Resolution::not_found());
    }

    #[test]
    fn fallback_used_when_primary_finds_nothing() {
        let resolver = Resolver::ifconfig(GERMAN.to_string()).with_host_fallback(
            "web01".to_string(),
            RecordingLookup::answering("web01 has address 10.0.0.5\n"),
        );

        assert_eq!(
            resolver.resolve().unwrap(),
            Resolution::found(ip("10.0.0.5"), ResolutionSource::HostLookup)
        );
    }

    #[test]
    fn fallback_not_consulted_when_primary_finds_address() {
        let lookup = Arc::new(RecordingLookup::answering("web01 has address 10.0.0.5\n"));
        let resolver = Resolver::ifconfig(UBUNTU.to_string())
            .with_host_fallback("web01".to_string(), Arc::clone(&lookup));

        assert_eq!(
            resolver.resolve().unwrap(),
            Resolution::found(ip("10.87.80.110"), ResolutionSource::Ifconfig)
        );
        assert!(lookup.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn fallback_failure_degrades_to_not_found() {
        let resolver = Resolver::ifconfig(GERMAN.to_string())
            .with_host_fallback("web01".to_string(), FailingLookup);

        assert_eq!(resolver.resolve().unwrap(), Resolution::not_found());
    }

    #[test]
    fn fallback_with_no_answer_is_not_found() {
        let resolver = Resolver::ifconfig(String::new()).with_host_fallback(
            "web01".to_string(),
            RecordingLookup::answering("web01 has IPv6 address 2001:db8::5\n"),
        );

        assert_eq!(resolver.resolve().unwrap(), Resolution::not_found());
    }

    #[test]
    fn primary_failure_is_an_error_even_with_fallback() {
        let resolver = Resolver::ifconfig(FailingText).with_host_fallback(
            "web01".to_string(),
            RecordingLookup::answering("web01 has address 10.0.0.5\n"),
        );

        assert!(resolver.resolve().is_err());
    }

    #[test]
    fn adapters_strategy_breaks_ties_by_binding_order() {
        let bindings = Arc::new(CountingBindings {
            order: BindingOrder::new([r"\Device\{SECOND}", r"\Device\{FIRST}"]),
            calls: AtomicUsize::new(0),
        });
        let adapters = StaticAdapters(vec![
            AdapterCandidate::new(vec!["10.0.0.1".into()])
                .with_device_id("{FIRST}")
                .with_connection_metric(5),
            AdapterCandidate::new(vec!["10.0.0.2".into()])
                .with_device_id("{SECOND}")
                .with_connection_metric(5),
        ]);

        let resolution = Resolver::adapters(adapters, Arc::clone(&bindings))
            .resolve()
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::found(ip("10.0.0.2"), ResolutionSource::Adapters)
        );
        assert_eq!(bindings.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn adapters_without_tie_never_read_bindings() {
        let bindings = Arc::new(CountingBindings {
            order: BindingOrder::default(),
            calls: AtomicUsize::new(0),
        });
        let adapters = StaticAdapters(vec![
            AdapterCandidate::new(vec!["10.0.0.1".into()]).with_connection_metric(20),
            AdapterCandidate::new(vec!["10.0.0.2".into()]).with_connection_metric(10),
        ]);

        let resolution = Resolver::adapters(adapters, Arc::clone(&bindings))
            .resolve()
            .unwrap();

        assert_eq!(resolution.address, Some(ip("10.0.0.2")));
        assert_eq!(bindings.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn adapter_fetch_failure_is_an_error() {
        let resolver = Resolver::adapters(FailingAdapters, BindingOrder::default());
        assert!(matches!(
            resolver.resolve(),
            Err(FetchError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn repeated_resolution_is_stable() {
        let resolver = Resolver::ifconfig(UBUNTU.to_string());
        assert_eq!(resolver.resolve().unwrap(), resolver.resolve().unwrap());
    }

    #[test]
    fn debug_shows_strategy_and_fallback() {
        let resolver =
            Resolver::ifconfig(String::new()).with_host_fallback(String::new(), FailingLookup);
        let debug = format!("{resolver:?}");

        assert!(debug.contains("Ifconfig"));
        assert!(debug.contains("host_fallback: true"));
    }
}
