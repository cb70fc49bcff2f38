use super::*;
use crate::foundation::core::approx_eq;

#[test]
fn pixel_time_roundtrip() {
    for &zoom in &[0.5, 1.0, 6.0, 13.37, 50.0] {
        for &t in &[0.0, 0.1, 1.0, 9.75, 120.0, 3601.5] {
            let back = pixel_to_time(time_to_pixel(t, zoom), zoom);
            assert!(approx_eq(back, t), "t={t} zoom={zoom} back={back}");
        }
    }
}

#[test]
fn snap_rounds_to_nearest_grid_line() {
    assert_eq!(snap(2.4, 1.0, true), 2.0);
    assert_eq!(snap(2.5, 1.0, true), 3.0);
    assert_eq!(snap(7.3, 0.5, true), 7.5);
    assert_eq!(snap(7.3, 0.5, false), 7.3);
}

#[test]
fn snap_is_idempotent() {
    for &grid in &[0.25, 0.5, 1.0, 5.0] {
        for &t in &[0.0, 0.13, 1.49, 2.51, 17.77, 99.9] {
            let once = snap(t, grid, true);
            assert!(approx_eq(snap(once, grid, true), once));
        }
    }
}

#[test]
fn degenerate_grid_disables_snapping() {
    assert_eq!(snap(3.3, 0.0, true), 3.3);
    assert_eq!(snap(3.3, -1.0, true), 3.3);
    assert_eq!(snap(3.3, f64::NAN, true), 3.3);
}

#[test]
fn snapped_times_are_floored_at_zero() {
    assert_eq!(snap_time(-0.4, 1.0, true), 0.0);
    assert_eq!(snap_time(-3.0, 1.0, false), 0.0);
    assert_eq!(pixel_to_snapped_time(-25.0, 10.0, 1.0, true), 0.0);
    assert_eq!(pixel_to_snapped_time(57.0, 10.0, 1.0, true), 6.0);
}

#[test]
fn nan_is_not_floored_onto_origin() {
    assert!(snap_time(f64::NAN, 1.0, true).is_nan());
    assert!(pixel_to_snapped_time(f64::NAN, 10.0, 1.0, false).is_nan());
}
