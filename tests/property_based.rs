use dynamic_cors_rs::{AdmissionController, OriginRegistry, Posture, Verdict};
use proptest::prelude::*;
use std::sync::Arc;

fn scheme_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("http"), Just("https")]
}

fn port_suffix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0u32..100_000).prop_map(|port| format!(":{port}")),
    ]
}

/// Decimal "octets" without range limits, as the trusted patterns accept them.
fn octet_strategy() -> impl Strategy<Value = u32> {
    0u32..1000
}

fn public_host_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{3,12}\\.(com|org|net|io)").unwrap()
}

proptest! {
    #[test]
    fn loopback_origins_are_allowed_on_any_port(
        scheme in scheme_strategy(),
        host in prop_oneof![Just("localhost"), Just("127.0.0.1")],
        port in port_suffix_strategy(),
    ) {
        let registry = OriginRegistry::new();
        let origin = format!("{scheme}://{host}{port}");

        prop_assert!(registry.is_allowed(&origin), "{} should be allowed", origin);
    }

    #[test]
    fn private_network_origins_are_allowed_without_octet_bounds(
        scheme in scheme_strategy(),
        prefix in prop_oneof![Just("192.168"), Just("10.1"), Just("172.5")],
        a in octet_strategy(),
        b in octet_strategy(),
        port in port_suffix_strategy(),
    ) {
        let registry = OriginRegistry::new();
        let origin = format!("{scheme}://{prefix}.{a}.{b}{port}");

        prop_assert!(registry.is_allowed(&origin), "{} should be allowed", origin);
    }

    #[test]
    fn public_origins_are_denied_until_added(
        scheme in scheme_strategy(),
        host in public_host_strategy(),
        port in port_suffix_strategy(),
    ) {
        let registry = OriginRegistry::new();
        let origin = format!("{scheme}://{host}{port}");

        prop_assert!(!registry.is_allowed(&origin));
        prop_assert!(registry.add(&origin));
        prop_assert!(!registry.add(&origin));
        prop_assert_eq!(registry.len(), 1);
        prop_assert!(registry.is_allowed(&origin));
    }

    #[test]
    fn learning_is_gated_by_posture(
        scheme in scheme_strategy(),
        host in public_host_strategy(),
    ) {
        let origin = format!("{scheme}://{host}");

        let development =
            AdmissionController::new(Arc::new(OriginRegistry::new()), Posture::Development);
        prop_assert!(!development.registry().is_allowed(&origin));
        prop_assert_eq!(development.admit(Some(&origin)), Verdict::Learned);
        prop_assert!(development.registry().is_allowed(&origin));

        let production =
            AdmissionController::new(Arc::new(OriginRegistry::new()), Posture::Production);
        prop_assert_eq!(production.admit(Some(&origin)), Verdict::Denied);
        prop_assert_eq!(production.admit(Some(&origin)), Verdict::Denied);
        prop_assert!(!production.registry().is_allowed(&origin));
    }
}
