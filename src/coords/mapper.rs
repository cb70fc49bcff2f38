//! Time/pixel conversion and grid snapping.
//!
//! Times are seconds, zoom is pixels per second. All helpers are pure.

/// Convert a timeline time to a horizontal pixel offset.
pub fn time_to_pixel(time_sec: f64, zoom: f64) -> f64 {
    time_sec * zoom
}

/// Convert a horizontal pixel offset to a timeline time.
///
/// `zoom` must be `> 0`; callers obtain it from a clamped view state.
pub fn pixel_to_time(px: f64, zoom: f64) -> f64 {
    px / zoom
}

/// Round `time_sec` to the nearest multiple of `grid_size_sec` when `enabled`.
///
/// A non-positive or non-finite grid disables snapping.
pub fn snap(time_sec: f64, grid_size_sec: f64, enabled: bool) -> f64 {
    if !enabled || !grid_size_sec.is_finite() || grid_size_sec <= 0.0 {
        return time_sec;
    }
    (time_sec / grid_size_sec).round() * grid_size_sec
}

/// Snap and floor at zero. This is the form used for every derived placement time.
///
/// NaN passes through unchanged so callers can refuse it.
pub fn snap_time(time_sec: f64, grid_size_sec: f64, enabled: bool) -> f64 {
    if time_sec.is_nan() {
        return time_sec;
    }
    snap(time_sec, grid_size_sec, enabled).max(0.0)
}

/// Map a pixel offset straight to a placement time: convert, snap, floor at zero.
pub fn pixel_to_snapped_time(px: f64, zoom: f64, grid_size_sec: f64, enabled: bool) -> f64 {
    snap_time(pixel_to_time(px, zoom), grid_size_sec, enabled)
}

#[cfg(test)]
#[path = "../../tests/unit/coords/mapper.rs"]
mod tests;
