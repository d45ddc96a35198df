use casemk_core::config::{CaseConfig, LabelDirection, resolve_outer_footprint};
use casemk_core::error::CaseMkError;

fn expect_invalid(cfg: CaseConfig, needle: &str) {
    match cfg.validate() {
        Err(CaseMkError::InvalidConfig(msg)) => {
            assert!(msg.contains(needle), "message '{}' should mention '{}'", msg, needle)
        }
        other => panic!("Expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn default_config_is_valid() {
    let cfg = CaseConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.max_footprint, (350.0, 300.0));
    assert_eq!(cfg.label_direction, LabelDirection::Right);
}

#[test]
fn non_positive_footprint_rejected() {
    expect_invalid(
        CaseConfig {
            max_footprint: (0.0, 300.0),
            ..Default::default()
        },
        "max_footprint",
    );
}

#[test]
fn case_size_must_leave_room_inside_walls() {
    expect_invalid(
        CaseConfig {
            case_size: Some((4.0, 100.0)),
            wall_thickness: 2.0,
            ..Default::default()
        },
        "too small",
    );
    expect_invalid(
        CaseConfig {
            case_size: Some((-1.0, 100.0)),
            ..Default::default()
        },
        "case_size",
    );
}

#[test]
fn negative_clearance_rejected_but_zero_allowed() {
    expect_invalid(
        CaseConfig {
            clearance: -0.1,
            ..Default::default()
        },
        "clearance",
    );
    let zero = CaseConfig {
        clearance: 0.0,
        ..Default::default()
    };
    assert!(zero.validate().is_ok());
}

#[test]
fn thicknesses_must_be_positive() {
    expect_invalid(
        CaseConfig {
            wall_thickness: 0.0,
            ..Default::default()
        },
        "wall_thickness",
    );
    expect_invalid(
        CaseConfig {
            divider_thickness: 0.0,
            ..Default::default()
        },
        "divider_thickness",
    );
    expect_invalid(
        CaseConfig {
            base_height: -2.0,
            ..Default::default()
        },
        "base_height",
    );
    expect_invalid(
        CaseConfig {
            corner_radius: -1.0,
            ..Default::default()
        },
        "corner_radius",
    );
}

#[test]
fn nan_is_not_a_valid_magnitude() {
    expect_invalid(
        CaseConfig {
            wall_thickness: f64::NAN,
            ..Default::default()
        },
        "wall_thickness",
    );
}

#[test]
fn stack_params_only_checked_when_stackable() {
    let off = CaseConfig {
        stack_lip_inner: 0.0,
        ..Default::default()
    };
    assert!(off.validate().is_ok());

    expect_invalid(
        CaseConfig {
            stackable: true,
            stack_lip_inner: 0.0,
            ..Default::default()
        },
        "stack_lip_inner",
    );
    expect_invalid(
        CaseConfig {
            stackable: true,
            stack_lip_height: 0.0,
            ..Default::default()
        },
        "stack_lip_height",
    );
    expect_invalid(
        CaseConfig {
            stackable: true,
            stack_clearance: -0.3,
            ..Default::default()
        },
        "stack_clearance",
    );
}

#[test]
fn label_parameters_validated() {
    expect_invalid(
        CaseConfig {
            label_size: Some((10.0, 0.0)),
            ..Default::default()
        },
        "label_size",
    );
    expect_invalid(
        CaseConfig {
            label_text_size: 0.0,
            ..Default::default()
        },
        "label_text_size",
    );
    expect_invalid(
        CaseConfig {
            label_text_depth: 0.0,
            ..Default::default()
        },
        "label_text_depth",
    );
}

#[test]
fn label_direction_parses_aliases() {
    assert_eq!("right".parse::<LabelDirection>(), Ok(LabelDirection::Right));
    assert_eq!("X".parse::<LabelDirection>(), Ok(LabelDirection::Right));
    assert_eq!(
        "right-of-slot".parse::<LabelDirection>(),
        Ok(LabelDirection::Right)
    );
    assert_eq!("below".parse::<LabelDirection>(), Ok(LabelDirection::Below));
    assert_eq!("y".parse::<LabelDirection>(), Ok(LabelDirection::Below));
    assert!("diagonal".parse::<LabelDirection>().is_err());
}

#[test]
fn usable_area_accounts_for_walls_and_corners() {
    let sharp = CaseConfig::default();
    assert_eq!(sharp.usable_area(), (346.0, 296.0));
    assert_eq!(sharp.corner_inset(), 0.0);

    let rounded = CaseConfig::builder().corner_radius(5.0).build();
    assert_eq!(rounded.corner_inset(), 6.0);
    assert_eq!(rounded.usable_area(), (334.0, 284.0));
    assert_eq!(rounded.slot_origin(), 8.0);
}

#[test]
fn case_size_overrides_footprint() {
    let cfg = CaseConfig::builder()
        .max_footprint(350.0, 300.0)
        .case_size(Some((120.0, 80.0)))
        .build();
    assert_eq!(cfg.outer_width(), 120.0);
    assert_eq!(cfg.outer_length(), 80.0);
    assert_eq!(cfg.usable_area(), (116.0, 76.0));
    assert_eq!(resolve_outer_footprint((10.0, 10.0), &cfg), (120.0, 80.0));
}

#[test]
fn outer_footprint_derived_from_extent() {
    let sharp = CaseConfig::default();
    assert_eq!(resolve_outer_footprint((100.0, 50.0), &sharp), (104.0, 54.0));

    let rounded = CaseConfig::builder().corner_radius(3.0).build();
    // walls 2*2 plus corner insets 2*(3+1)
    assert_eq!(resolve_outer_footprint((100.0, 50.0), &rounded), (112.0, 62.0));
}

#[test]
fn config_round_trips_through_json_with_defaults() {
    let cfg: CaseConfig =
        serde_json::from_str(r#"{"clearance": 0.5, "label_direction": "below"}"#).unwrap();
    assert_eq!(cfg.clearance, 0.5);
    assert_eq!(cfg.label_direction, LabelDirection::Below);
    assert_eq!(cfg.wall_thickness, 2.0);
    assert!(cfg.validate().is_ok());
}
