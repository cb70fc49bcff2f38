use super::*;

fn manager() -> ViewportManager {
    ViewportManager::new(&EditorOpts::default())
}

#[test]
fn zoom_is_clamped_to_bounds() {
    let mut vp = manager();
    assert_eq!(vp.set_zoom(0.2), 1.0);
    assert_eq!(vp.set_zoom(500.0), 50.0);
    assert_eq!(vp.set_zoom(12.0), 12.0);
    assert_eq!(vp.set_zoom(f64::NAN), 12.0);
}

#[test]
fn zoom_to_fit_scenario() {
    let mut vp = manager();
    vp.scroll_to(300.0);
    let zoom = vp.zoom_to_fit(120.0, 800.0);
    assert!((zoom - 6.0).abs() < 1e-12);
    assert_eq!(vp.state().viewport_left_px, 0.0);
    assert_eq!(vp.state().viewport_width_px, 800.0);
}

#[test]
fn zoom_to_fit_respects_bounds() {
    let mut vp = manager();
    assert_eq!(vp.zoom_to_fit(1.0, 800.0), 50.0);
    assert_eq!(vp.zoom_to_fit(100_000.0, 800.0), 1.0);
}

#[test]
fn center_on_time_floors_at_zero() {
    let mut vp = manager();
    vp.set_zoom(10.0);
    vp.set_viewport_width(400.0).unwrap();

    vp.center_on_time(100.0);
    assert_eq!(vp.state().viewport_left_px, 800.0);

    vp.center_on_time(5.0);
    assert_eq!(vp.state().viewport_left_px, 0.0);
}

#[test]
fn zoom_steps_are_multiplicative() {
    let mut vp = manager();
    vp.set_zoom(8.0);
    assert!((vp.zoom_in() - 10.0).abs() < 1e-12);
    assert!((vp.zoom_out() - 8.0).abs() < 1e-12);
}

#[test]
fn visible_range_follows_scroll_and_zoom() {
    let mut vp = manager();
    vp.set_zoom(10.0);
    vp.set_viewport_width(500.0).unwrap();
    vp.scroll_to(200.0);
    assert_eq!(vp.state().visible_time_range(), (20.0, 70.0));
    assert_eq!(vp.state().content_x(15.0), 215.0);
}

#[test]
fn invalid_width_and_grid_are_refused() {
    let mut vp = manager();
    assert!(vp.set_viewport_width(0.0).is_err());
    assert!(vp.set_grid_size(-1.0).is_err());
    vp.set_grid_size(0.5).unwrap();
    assert_eq!(vp.state().grid_size_sec, 0.5);
}
