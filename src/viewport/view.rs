use crate::{
    coords::mapper::{pixel_to_time, time_to_pixel},
    foundation::core::ClipId,
    foundation::error::{ReelError, ReelResult},
    session::opts::EditorOpts,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Horizontal view of the timeline plus interaction toggles.
pub struct ViewState {
    /// Pixels per second, kept inside `[min_zoom, max_zoom]`.
    pub zoom: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Whether derived placement times are snapped to the grid.
    pub snap_to_grid: bool,
    /// Grid spacing in seconds.
    pub grid_size_sec: f64,
    /// Scroll offset of the visible window, in content pixels (`>= 0`).
    pub viewport_left_px: f64,
    /// Width of the visible window in pixels (`> 0`).
    pub viewport_width_px: f64,
    /// Currently selected clip.
    pub selected_clip: Option<ClipId>,
}

impl ViewState {
    /// Content-space x for a viewport-local x.
    pub fn content_x(&self, viewport_x: f64) -> f64 {
        viewport_x + self.viewport_left_px
    }

    /// Visible time window `[start, end)` in seconds.
    pub fn visible_time_range(&self) -> (f64, f64) {
        let start = pixel_to_time(self.viewport_left_px, self.zoom);
        let end = pixel_to_time(self.viewport_left_px + self.viewport_width_px, self.zoom);
        (start, end)
    }
}

/// Owns the [`ViewState`] and applies zoom and scroll commands to it.
#[derive(Clone, Debug)]
pub struct ViewportManager {
    state: ViewState,
    fit_ratio: f64,
    zoom_step: f64,
}

impl ViewportManager {
    /// Build a manager from validated editor options.
    pub fn new(opts: &EditorOpts) -> Self {
        Self {
            state: ViewState {
                zoom: opts.initial_zoom.clamp(opts.min_zoom, opts.max_zoom),
                min_zoom: opts.min_zoom,
                max_zoom: opts.max_zoom,
                snap_to_grid: opts.snap_to_grid,
                grid_size_sec: opts.grid_size_sec,
                viewport_left_px: 0.0,
                viewport_width_px: opts.viewport_width_px,
                selected_clip: None,
            },
            fit_ratio: opts.fit_ratio,
            zoom_step: opts.zoom_step,
        }
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Set the zoom level, clamped to the configured bounds. Returns the applied level.
    pub fn set_zoom(&mut self, level: f64) -> f64 {
        if !level.is_finite() {
            return self.state.zoom;
        }
        self.state.zoom = level.clamp(self.state.min_zoom, self.state.max_zoom);
        tracing::debug!(zoom = self.state.zoom, "zoom set");
        self.state.zoom
    }

    /// Multiply the zoom by the configured step.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.state.zoom * self.zoom_step)
    }

    /// Divide the zoom by the configured step.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.state.zoom / self.zoom_step)
    }

    /// Fit `total_duration_sec` into `viewport_width_px`, leaving a margin, and scroll home.
    pub fn zoom_to_fit(&mut self, total_duration_sec: f64, viewport_width_px: f64) -> f64 {
        if viewport_width_px.is_finite() && viewport_width_px > 0.0 {
            self.state.viewport_width_px = viewport_width_px;
        }
        self.state.viewport_left_px = 0.0;
        if !total_duration_sec.is_finite() || total_duration_sec <= 0.0 {
            return self.state.zoom;
        }
        let fit = (self.state.viewport_width_px * self.fit_ratio) / total_duration_sec;
        self.set_zoom(fit)
    }

    /// Scroll so that `time_sec` sits in the middle of the viewport.
    pub fn center_on_time(&mut self, time_sec: f64) {
        let px = time_to_pixel(time_sec, self.state.zoom);
        self.scroll_to(px - self.state.viewport_width_px / 2.0);
    }

    /// Scroll to `left_px`, floored at zero.
    pub fn scroll_to(&mut self, left_px: f64) {
        if !left_px.is_finite() {
            return;
        }
        self.state.viewport_left_px = left_px.max(0.0);
    }

    /// Update the visible width reported by the host.
    pub fn set_viewport_width(&mut self, width_px: f64) -> ReelResult<()> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(ReelError::validation(
                "viewport width must be finite and > 0",
            ));
        }
        self.state.viewport_width_px = width_px;
        Ok(())
    }

    /// Toggle grid snapping.
    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.state.snap_to_grid = enabled;
    }

    /// Change the grid spacing; non-positive values are refused.
    pub fn set_grid_size(&mut self, grid_size_sec: f64) -> ReelResult<()> {
        if !grid_size_sec.is_finite() || grid_size_sec <= 0.0 {
            return Err(ReelError::validation("grid size must be finite and > 0"));
        }
        self.state.grid_size_sec = grid_size_sec;
        Ok(())
    }

    /// Replace the selection.
    pub fn select(&mut self, clip: Option<ClipId>) {
        self.state.selected_clip = clip;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/view.rs"]
mod tests;
