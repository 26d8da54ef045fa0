//! 1-D refinement scenarios with their expected verdicts.
//!
//! Each table is parameterized by interpolation order; every row must hold
//! for orders 1, 2 and 3. Rows exercise every box-spec shape a front end
//! can send (named corner pairs, named boxes, box lists, integer level
//! keys).

use crate::{span, RawConfigBuilder};
use amrbox_config::boxspec::corners_1d;
use amrbox_config::{ConfigValue, RawConfig};
use amrbox_core::RejectReason;

/// One scenario: a configuration and what validating it must yield.
pub struct Scenario {
    pub name: &'static str,
    pub config: RawConfig,
    /// `None` = accept.
    pub expected: Option<RejectReason>,
}

impl Scenario {
    fn accept(name: &'static str, config: RawConfigBuilder) -> Self {
        Self {
            name,
            config: config.build(),
            expected: None,
        }
    }

    fn reject(name: &'static str, config: RawConfigBuilder, reason: RejectReason) -> Self {
        Self {
            name,
            config: config.build(),
            expected: Some(reason),
        }
    }
}

fn named(level: &str, boxes: &[(&str, ConfigValue)]) -> ConfigValue {
    ConfigValue::map([(level, ConfigValue::map(boxes.iter().cloned()))])
}

/// Hierarchies that must be accepted.
pub fn valid_1d(interp_order: u8) -> Vec<Scenario> {
    let base = || RawConfigBuilder::new(interp_order);
    vec![
        // A single box small enough to give one patch on the refined level.
        Scenario::accept(
            "single_small_named_box",
            base().set(
                "refinement_boxes",
                named("L0", &[("B0", ConfigValue::from([[10], [14]]))]),
            ),
        ),
        Scenario::accept(
            "named_corner_pair",
            base().set(
                "refinement_boxes",
                named("L0", &[("B0", ConfigValue::from([[5], [55]]))]),
            ),
        ),
        Scenario::accept(
            "named_box",
            base().set(
                "refinement_boxes",
                named("L0", &[("B0", ConfigValue::from(span(5, 55)))]),
            ),
        ),
        Scenario::accept("box_list", base().levels(&[&[(5, 55)]])),
        Scenario::accept(
            "integer_level_key",
            base().set("refinement_boxes", ConfigValue::map([(0, vec![span(5, 55)])])),
        ),
        Scenario::accept(
            "integer_level_key_from_origin",
            base().set("refinement_boxes", ConfigValue::map([(0, vec![span(0, 55)])])),
        ),
        Scenario::accept("adjacent_boxes", base().levels(&[&[(5, 14), (15, 25)]])),
        Scenario::accept(
            "three_levels",
            base().levels(&[&[(5, 25)], &[(12, 48)], &[(60, 64)]]),
        ),
        Scenario::accept("two_levels", base().levels(&[&[(5, 25)], &[(12, 48)]])),
        Scenario::accept("small_child", base().levels(&[&[(5, 25)], &[(20, 30)]])),
        Scenario::accept(
            "child_within_buffer",
            base()
                .levels(&[&[(5, 25)], &[(11, 49)]])
                .set("nesting_buffer", 1),
        ),
        Scenario::accept(
            "child_fills_parent",
            base().levels(&[&[(5, 25)], &[(10, 50)]]),
        ),
        Scenario::accept(
            "child_flush_with_parent_upper",
            base().levels(&[&[(5, 25)], &[(15, 49)]]),
        ),
        Scenario::accept(
            "no_refinement_with_patch_sizes",
            base()
                .set("refinement_boxes", ConfigValue::None)
                .set("smallest_patch_size", 20)
                .set("largest_patch_size", 20)
                .set("nesting_buffer", 10),
        ),
        Scenario::accept(
            "corner_pair_list",
            base().set(
                "refinement_boxes",
                ConfigValue::map([("L0", corners_1d(&[(5, 14), (20, 30)]))]),
            ),
        ),
    ]
}

/// Hierarchies that must be rejected, with the reason.
pub fn invalid_1d(interp_order: u8) -> Vec<Scenario> {
    let base = || RawConfigBuilder::new(interp_order);
    vec![
        Scenario::reject(
            "child_below_parent_lower",
            base().levels(&[&[(5, 24)], &[(9, 30)]]),
            RejectReason::NotNestedInParent,
        ),
        Scenario::reject(
            "child_above_parent_upper",
            base().levels(&[&[(5, 24)], &[(15, 50)]]),
            RejectReason::NotNestedInParent,
        ),
        Scenario::reject(
            "overlapping_boxes",
            base().levels(&[&[(5, 15), (15, 25)]]),
            RejectReason::IntraLevelOverlap,
        ),
        Scenario::reject(
            "box_upper_outside_domain",
            base().set("cells", [55]).set(
                "refinement_boxes",
                named("L0", &[("B0", ConfigValue::from([[5], [65]]))]),
            ),
            RejectReason::BoxOutOfDomain,
        ),
        Scenario::reject(
            "largest_below_smallest",
            base()
                .set("smallest_patch_size", 100)
                .set("largest_patch_size", 64),
            RejectReason::PatchSizeInversion,
        ),
        Scenario::reject(
            "unknown_option",
            base().set("refined_particle_nbr", 1),
            RejectReason::UnknownConfigurationOption,
        ),
        Scenario::reject(
            "child_inside_buffer",
            base()
                .levels(&[&[(5, 25)], &[(11, 49)]])
                .set("nesting_buffer", 2),
            RejectReason::NotNestedInParent,
        ),
        Scenario::reject(
            "negative_nesting_buffer",
            base()
                .levels(&[&[(5, 25)], &[(11, 49)]])
                .set("nesting_buffer", -1),
            RejectReason::NestingBufferOutOfRange,
        ),
        Scenario::reject(
            "nesting_buffer_too_large",
            base()
                .levels(&[&[(5, 25)], &[(11, 49)]])
                .set("nesting_buffer", 33),
            RejectReason::NestingBufferOutOfRange,
        ),
        Scenario::reject(
            "nesting_buffer_exceeds_largest_patch",
            base()
                .set("refinement_boxes", ConfigValue::None)
                .set("largest_patch_size", 20)
                .set("nesting_buffer", 46),
            RejectReason::NestingBufferOutOfRange,
        ),
        Scenario::reject(
            "inverted_corner_pair",
            base().set(
                "refinement_boxes",
                ConfigValue::map([("L0", corners_1d(&[(30, 20)]))]),
            ),
            RejectReason::BoxInverted,
        ),
        Scenario::reject(
            "level_gap",
            base().set(
                "refinement_boxes",
                ConfigValue::map([("L0", vec![span(5, 25)]), ("L2", vec![span(20, 30)])]),
            ),
            RejectReason::MissingRefinementLevel,
        ),
        Scenario::reject(
            "bad_level_key",
            base().set(
                "refinement_boxes",
                ConfigValue::map([("level0", vec![span(5, 25)])]),
            ),
            RejectReason::MalformedBoxSpec,
        ),
        Scenario::reject(
            "missing_cells",
            base().without("cells"),
            RejectReason::MissingConfigurationOption,
        ),
    ]
}
