//! Validation is deterministic, repeatable, and safe to run concurrently.

use amrbox_config::{ConfigValue, RawConfig};
use amrbox_hierarchy::{validate, ValidatedHierarchy, Verdict};
use amrbox_test_utils::fixtures::{invalid_1d, valid_1d};
use amrbox_test_utils::{span, RawConfigBuilder};
use proptest::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<RawConfig>();
    assert_send_sync::<Verdict>();
    assert_send_sync::<ValidatedHierarchy>();
}

#[test]
fn validating_twice_gives_the_same_verdict() {
    for scenario in valid_1d(2).into_iter().chain(invalid_1d(2)) {
        assert_eq!(
            validate(&scenario.config),
            validate(&scenario.config),
            "{}",
            scenario.name
        );
    }
}

#[test]
fn concurrent_validation_agrees_with_sequential() {
    let scenarios: Vec<_> = valid_1d(1).into_iter().chain(invalid_1d(3)).collect();
    let expected: Vec<Verdict> = scenarios.iter().map(|s| validate(&s.config)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    scenarios
                        .iter()
                        .map(|s| validate(&s.config))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            let got = handle.join().unwrap();
            assert_eq!(got, expected);
        }
    });
}

proptest! {
    /// Any single in-domain box on L0 is accepted, and refining it gives a
    /// mesh level whose patches cover it exactly.
    #[test]
    fn single_in_domain_box_accepted(lo in 0i64..65, len in 1i64..65, largest in 5i64..=65) {
        let hi = (lo + len - 1).min(64);
        let raw = RawConfigBuilder::new(1)
            .set("largest_patch_size", largest)
            .levels(&[&[(lo, hi)]])
            .build();
        let h = validate(&raw).into_result().unwrap();
        let mesh = h.mesh_levels();
        prop_assert_eq!(mesh.len(), 2);
        let covered: u64 = mesh[1].patches.iter().map(|p| p.cell_count()).sum();
        prop_assert_eq!(covered, 2 * (hi - lo + 1) as u64);
    }

    /// A child inside its refined parent is accepted exactly when the
    /// buffer fits between them.
    #[test]
    fn nesting_depends_only_on_margin(lo in 10i64..40, len in 1i64..20, buffer in 0i64..=2) {
        let hi = lo + len - 1;
        // L0 [5..25] refines to [10..51].
        prop_assume!(hi <= 51);
        let raw = RawConfigBuilder::new(1)
            .set("nesting_buffer", buffer)
            .set(
                "refinement_boxes",
                ConfigValue::map([("L0", vec![span(5, 25)]), ("L1", vec![span(lo, hi)])]),
            )
            .build();
        let margin_ok = lo - 10 >= buffer && 51 - hi >= buffer;
        prop_assert_eq!(validate(&raw).is_accept(), margin_ok);
    }
}
