#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn viewport() -> Size {
    Size::new(800.0, 600.0)
}

fn image() -> Size {
    Size::new(1600.0, 1200.0)
}

fn state() -> TransformState {
    TransformState::new(ViewerConfig::default(), image(), viewport()).unwrap()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn cover_scale_for_matching_aspect() {
    // max(800/1600, 600/1200) = 0.5
    let s = state();
    assert_eq!(s.initial_scale(), 0.5);
    assert_eq!(s.min_zoom(), 0.5);
    assert_eq!(s.transform(), Transform::new(0.5, 0.0, 0.0));
}

#[test]
fn cover_scale_picks_larger_ratio() {
    // Wide image in a tall viewport: height ratio wins.
    let s = TransformState::new(ViewerConfig::default(), Size::new(2000.0, 500.0), Size::new(400.0, 800.0)).unwrap();
    assert_eq!(s.initial_scale(), 1.6);
    assert_eq!(s.transform().zoom, 1.6);
}

#[test]
fn min_zoom_lowered_to_cover_scale() {
    // Cover scale 0.2 is below the configured 0.5 ceiling.
    let s = TransformState::new(ViewerConfig::default(), Size::new(4000.0, 3000.0), viewport()).unwrap();
    assert!(approx_eq(s.initial_scale(), 0.2));
    assert!(approx_eq(s.min_zoom(), 0.2));
}

#[test]
fn min_zoom_never_below_absolute_floor() {
    // Cover scale 0.04 is below the 0.1 absolute floor.
    let s = TransformState::new(ViewerConfig::default(), Size::new(20000.0, 15000.0), viewport()).unwrap();
    assert!(approx_eq(s.initial_scale(), 0.04));
    assert_eq!(s.min_zoom(), 0.1);
    assert_eq!(s.absolute_min_zoom(), 0.1);
    // The cover view itself clamps to the floor.
    assert_eq!(s.transform().zoom, 0.1);
}

#[test]
fn min_zoom_capped_by_config_for_small_images() {
    // Cover scale 4.0 is above the 0.5 ceiling.
    let s = TransformState::new(ViewerConfig::default(), Size::new(200.0, 150.0), viewport()).unwrap();
    assert_eq!(s.initial_scale(), 4.0);
    assert_eq!(s.min_zoom(), 0.5);
}

#[test]
fn max_zoom_raised_to_cover_scale() {
    // Cover scale 10 exceeds the configured max of 5.
    let s = TransformState::new(ViewerConfig::default(), Size::new(80.0, 60.0), viewport()).unwrap();
    assert_eq!(s.initial_scale(), 10.0);
    assert_eq!(s.max_zoom(), 10.0);
    assert_eq!(s.transform().zoom, 10.0);
}

#[test]
fn unmeasured_image_is_rejected() {
    let err = TransformState::new(ViewerConfig::default(), Size::default(), viewport()).unwrap_err();
    assert_eq!(err, GeometryError::UnmeasuredImage { width: 0.0, height: 0.0 });
    assert!(err.to_string().contains("not measurable"));
}

#[test]
fn unmeasured_viewport_is_rejected() {
    let err = TransformState::new(ViewerConfig::default(), image(), Size::new(800.0, 0.0)).unwrap_err();
    assert!(matches!(err, GeometryError::UnmeasuredViewport { .. }));
}

// =============================================================
// apply_transform
// =============================================================

#[test]
fn apply_transform_clamps_zoom_to_max() {
    let mut s = state();
    let t = s.apply_transform(50.0, 0.0, 0.0);
    assert_eq!(t.zoom, 5.0);
}

#[test]
fn apply_transform_clamps_zoom_to_min() {
    let mut s = state();
    let t = s.apply_transform(0.01, 0.0, 0.0);
    assert_eq!(t.zoom, 0.5);
}

#[test]
fn apply_transform_clamps_translation_for_clamped_zoom() {
    let mut s = state();
    // At zoom 5 (clamped from 9): scaled 8000x6000, bounds +/-3500 x +/-2600.
    let t = s.apply_transform(9.0, 10_000.0, -10_000.0);
    assert_eq!(t.zoom, 5.0);
    assert_eq!(t.translate_x, 3500.0);
    assert_eq!(t.translate_y, -2600.0);
}

#[test]
fn apply_transform_keeps_in_range_translation() {
    let mut s = state();
    let t = s.apply_transform(1.0, 120.0, -150.0);
    assert_eq!(t, Transform::new(1.0, 120.0, -150.0));
}

#[test]
fn apply_transform_centers_when_image_fits() {
    let mut s = state();
    let t = s.apply_transform(0.5, 75.0, 75.0);
    assert_eq!(t.translate_x, 0.0);
    assert_eq!(t.translate_y, 0.0);
}

#[test]
fn apply_transform_ignores_non_finite_components() {
    let mut s = state();
    s.apply_transform(2.0, 100.0, 50.0);
    let t = s.apply_transform(f64::NAN, f64::INFINITY, 20.0);
    assert_eq!(t, Transform::new(2.0, 100.0, 20.0));
}

#[test]
fn apply_transform_returns_committed_state() {
    let mut s = state();
    let t = s.apply_transform(3.0, 10.0, 20.0);
    assert_eq!(t, s.transform());
}

#[test]
fn committed_translation_always_within_bounds() {
    let mut s = state();
    for zoom in [0.1, 0.5, 0.75, 1.0, 2.5, 4.9, 5.0, 7.0] {
        for tx in [-1e6, -812.0, 0.0, 333.0, 1e6] {
            for ty in [-1e6, -45.0, 0.0, 999.0, 1e6] {
                let t = s.apply_transform(zoom, tx, ty);
                assert!(t.zoom >= s.min_zoom() && t.zoom <= s.max_zoom());
                assert!(compute_bounds(t.zoom, image(), viewport(), 100.0).contains(t.translate_x, t.translate_y));
            }
        }
    }
}

// =============================================================
// reset / recompute
// =============================================================

#[test]
fn reset_returns_to_cover_view() {
    let mut s = state();
    s.apply_transform(3.0, 500.0, -400.0);
    let t = s.reset();
    assert_eq!(t, Transform::new(0.5, 0.0, 0.0));
}

#[test]
fn reset_is_idempotent() {
    let mut s = state();
    s.apply_transform(2.2, 80.0, 90.0);
    let once = s.reset();
    let twice = s.reset();
    assert_eq!(once, twice);
}

#[test]
fn recompute_on_resize_updates_cover_scale() {
    let mut s = state();
    s.recompute_initial_scale(Size::new(1600.0, 600.0), image()).unwrap();
    assert_eq!(s.initial_scale(), 1.0);
    assert_eq!(s.transform().zoom, 1.0);
    assert_eq!(s.viewport(), Size::new(1600.0, 600.0));
}

#[test]
fn recompute_reclamps_translation() {
    let mut s = state();
    s.apply_transform(5.0, 3500.0, 2600.0);
    s.recompute_initial_scale(viewport(), image()).unwrap();
    // Back at 0.5 the image fits exactly, so no translation is legal.
    assert_eq!(s.transform(), Transform::new(0.5, 0.0, 0.0));
}

#[test]
fn recompute_with_unmeasured_geometry_leaves_state() {
    let mut s = state();
    s.apply_transform(2.0, 10.0, 10.0);
    let before = s.transform();
    assert!(s.recompute_initial_scale(Size::default(), image()).is_err());
    assert!(s.recompute_initial_scale(viewport(), Size::new(0.0, 10.0)).is_err());
    assert_eq!(s.transform(), before);
    assert_eq!(s.initial_scale(), 0.5);
}

// =============================================================
// Queries
// =============================================================

#[test]
fn zoom_percent_of_initial_at_cover_is_100() {
    assert_eq!(state().zoom_percent_of_initial(), 100);
}

#[test]
fn zoom_percent_of_initial_scales() {
    let mut s = state();
    s.apply_transform(1.25, 0.0, 0.0);
    assert_eq!(s.zoom_percent_of_initial(), 250);
}

#[test]
fn zoom_percent_rounds() {
    let mut s = state();
    s.apply_transform(0.5 * 1.234_56, 0.0, 0.0);
    assert_eq!(s.zoom_percent_of_initial(), 123);
}

#[test]
fn can_zoom_flags_follow_limits() {
    let mut s = state();
    assert!(s.can_zoom_in());
    assert!(!s.can_zoom_out());
    s.apply_transform(5.0, 0.0, 0.0);
    assert!(!s.can_zoom_in());
    assert!(s.can_zoom_out());
}

#[test]
fn clamp_zoom_does_not_commit() {
    let s = state();
    assert_eq!(s.clamp_zoom(10.0), 5.0);
    assert_eq!(s.clamp_zoom(0.0), 0.5);
    assert_eq!(s.transform().zoom, 0.5);
}

#[test]
fn zoom_step_comes_from_config() {
    let cfg = ViewerConfig { zoom_step: 0.5, ..ViewerConfig::default() };
    let s = TransformState::new(cfg, image(), viewport()).unwrap();
    assert_eq!(s.zoom_step(), 0.5);
}
