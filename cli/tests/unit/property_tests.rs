//! Property-based tests for validation and node-name derivation.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::unwrap_used)]

use gecos_assistant::domain::access::is_url;
use gecos_assistant::domain::workstation::{
    derive_node_name, node_name_from_hw_address, validate_name,
};
use gecos_assistant::domain::{
    AccessData, NetworkInterface, ValidationError, WorkstationData, validate_access_data,
};
use proptest::prelude::*;

fn iface(name: &str, ip: &str, mac: &str) -> NetworkInterface {
    NetworkInterface {
        name: name.to_string(),
        ip_address: ip.to_string(),
        hw_address: Some(mac.to_string()),
    }
}

fn mac_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 6)
        .prop_filter("all-zero MAC is unusable", |b| b.iter().any(|x| *x != 0))
        .prop_map(|b| {
            b.iter()
                .map(|x| format!("{x:02X}"))
                .collect::<Vec<_>>()
                .join(":")
        })
}

// ============================================================================
// Access data validation
// ============================================================================

proptest! {
    /// Whitespace-only fields never pass validation.
    #[test]
    fn prop_blank_fields_are_rejected(blank in "[ \t]{0,5}") {
        let url = validate_access_data(&AccessData::new(blank.clone(), "admin", "secret"));
        prop_assert_eq!(url, Err(ValidationError::EmptyUrl));

        let login = validate_access_data(&AccessData::new("https://cc.example.org", blank.clone(), "secret"));
        prop_assert_eq!(login, Err(ValidationError::EmptyLogin));

        let password = validate_access_data(&AccessData::new("https://cc.example.org", "admin", blank));
        prop_assert_eq!(password, Err(ValidationError::EmptyPassword));
    }

    /// Any http(s) URL with a simple host is accepted.
    #[test]
    fn prop_well_formed_urls_are_accepted(
        scheme in "https?",
        host in "[a-z][a-z0-9]{0,20}(\\.[a-z][a-z0-9]{0,10}){0,2}\\.[a-z]{2,6}",
        port in proptest::option::of(1u16..),
    ) {
        let url = match port {
            Some(p) => format!("{scheme}://{host}:{p}/"),
            None => format!("{scheme}://{host}"),
        };
        prop_assert!(is_url(&url), "{} rejected", url);
        prop_assert!(validate_access_data(&AccessData::new(url, "admin", "secret")).is_ok());
    }

    /// Text without a scheme is never a URL.
    #[test]
    fn prop_schemeless_text_is_not_a_url(text in "[a-zA-Z0-9 ./_-]{1,40}") {
        prop_assume!(!text.contains("://"));
        prop_assert!(!is_url(&text));
    }

    /// Blank workstation names are rejected, anything else passes.
    #[test]
    fn prop_workstation_name_blankness(name in "[ a-z0-9-]{0,12}") {
        let result = validate_name(&WorkstationData::new(name.clone(), "ou"));
        prop_assert_eq!(result.is_err(), name.trim().is_empty());
    }
}

// ============================================================================
// Node-name derivation
// ============================================================================

proptest! {
    /// The node name is deterministic, case-insensitive in the MAC and
    /// always 64 lower-case hex characters.
    #[test]
    fn prop_node_name_is_stable_hex(mac in mac_strategy()) {
        let upper = node_name_from_hw_address(&mac);
        let lower = node_name_from_hw_address(&mac.to_ascii_lowercase());
        prop_assert_eq!(&upper, &lower);
        prop_assert_eq!(upper.len(), 64);
        prop_assert!(upper.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// Loopback interfaces are skipped no matter how many come first.
    #[test]
    fn prop_first_non_loopback_interface_wins(
        loopbacks in 0usize..4,
        first in mac_strategy(),
        second in mac_strategy(),
    ) {
        let mut interfaces: Vec<NetworkInterface> = (0..loopbacks)
            .map(|i| iface(&format!("lo{i}"), &format!("127.0.0.{}", i + 1), "00:00:00:00:00:01"))
            .collect();
        interfaces.push(iface("eth0", "10.0.0.5", &first));
        interfaces.push(iface("eth1", "192.168.1.5", &second));

        prop_assert_eq!(derive_node_name(&interfaces).unwrap(), node_name_from_hw_address(&first));
    }
}

#[test]
fn test_only_loopback_interfaces_is_an_error() {
    let interfaces = vec![iface("lo", "127.0.0.1", "00:00:00:00:00:00")];
    assert_eq!(
        derive_node_name(&interfaces),
        Err(ValidationError::NoUsableInterface)
    );
}
