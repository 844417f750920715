//! Ordering laws for version comparison and parser robustness.

use proptest::prelude::*;

use grasshopper::updater::{NoUpdateReason, ReleaseDescriptor, UpdateDecision, check_for_update};
use grasshopper::version::{Version, is_newer};

fn arb_triple() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..50, 0u64..50, 0u64..50)
}

fn version((major, minor, patch): (u64, u64, u64)) -> Version {
    Version::parse(&format!("{major}.{minor}.{patch}")).unwrap()
}

proptest! {
    #[test]
    fn formatted_triples_parse_back((major, minor, patch) in (any::<u64>(), any::<u64>(), any::<u64>())) {
        let parsed = Version::parse(&format!("{major}.{minor}.{patch}")).unwrap();
        prop_assert_eq!(parsed.triple(), (major, minor, patch));
    }

    #[test]
    fn leading_zeros_do_not_change_value(triple in arb_triple(), pad in 1usize..4) {
        let zeros = "0".repeat(pad);
        let padded = Version::parse(&format!("{zeros}{}.{}.{}", triple.0, triple.1, triple.2)).unwrap();
        prop_assert_eq!(padded, version(triple));
    }

    #[test]
    fn irreflexive(triple in arb_triple()) {
        let v = version(triple);
        prop_assert!(!is_newer(&v, &v));
    }

    #[test]
    fn antisymmetric(a in arb_triple(), b in arb_triple()) {
        let (a, b) = (version(a), version(b));
        prop_assert!(!(is_newer(&a, &b) && is_newer(&b, &a)));
    }

    #[test]
    fn transitive(a in arb_triple(), b in arb_triple(), c in arb_triple()) {
        let (a, b, c) = (version(a), version(b), version(c));
        if is_newer(&a, &b) && is_newer(&b, &c) {
            prop_assert!(is_newer(&a, &c));
        }
    }

    #[test]
    fn matches_lexicographic_numeric_order(a in arb_triple(), b in arb_triple()) {
        prop_assert_eq!(is_newer(&version(a), &version(b)), a > b);
    }

    #[test]
    fn parse_never_panics(text in ".{0,40}") {
        let _ = Version::parse(&text);
    }

    #[test]
    fn non_three_component_strings_are_rejected(parts in prop::collection::vec("[0-9]{1,3}", 0..7)) {
        prop_assume!(parts.len() != 3);
        prop_assert!(Version::parse(&parts.join(".")).is_err());
    }

    #[test]
    fn decision_agrees_with_is_newer(current in arb_triple(), latest in arb_triple()) {
        let release = ReleaseDescriptor {
            tag: format!("v{}.{}.{}", latest.0, latest.1, latest.2),
            url: "https://example.com".to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let current_text = format!("{}.{}.{}", current.0, current.1, current.2);

        let decision = check_for_update(&current_text, &release);
        if latest > current {
            prop_assert!(decision.is_update_available());
        } else {
            prop_assert_eq!(decision, UpdateDecision::NoUpdate { reason: NoUpdateReason::UpToDate });
        }
    }

    #[test]
    fn garbage_tags_never_offer_updates(tag in "[a-z-]{1,12}") {
        let release = ReleaseDescriptor {
            tag,
            url: String::new(),
            published_at: String::new(),
        };
        prop_assert_eq!(
            check_for_update("1.0.0", &release),
            UpdateDecision::NoUpdate { reason: NoUpdateReason::MalformedVersion }
        );
    }
}
