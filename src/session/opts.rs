use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::{
    coords::bands::TrackBands,
    foundation::error::{ReelError, ReelResult},
};

/// Editor session options.
///
/// Every field has a default, so an options file only needs the values it
/// overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorOpts {
    /// Lower zoom bound in pixels per second.
    pub min_zoom: f64,
    /// Upper zoom bound in pixels per second.
    pub max_zoom: f64,
    /// Zoom applied when a session opens.
    pub initial_zoom: f64,
    /// Factor used by zoom-in/zoom-out steps.
    pub zoom_step: f64,
    /// Snap derived times to the grid.
    pub snap_to_grid: bool,
    /// Grid spacing in seconds.
    pub grid_size_sec: f64,
    /// Share of the viewport filled by zoom-to-fit, in `(0, 1)`.
    pub fit_ratio: f64,
    /// Initial viewport width in pixels.
    pub viewport_width_px: f64,
    /// Floor for the derived timeline duration.
    pub minimum_duration_sec: f64,
    /// Clip length used when a library item has no estimate.
    pub fallback_clip_duration_sec: f64,
    /// Playback tick period in milliseconds.
    pub tick_period_ms: u64,
    /// Lowest accepted playback speed multiplier.
    pub min_speed: f64,
    /// Highest accepted playback speed multiplier.
    pub max_speed: f64,
    /// Track band geometry used for pointer hit-testing.
    pub bands: TrackBands,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 50.0,
            initial_zoom: 10.0,
            zoom_step: 1.25,
            snap_to_grid: true,
            grid_size_sec: 1.0,
            fit_ratio: 0.9,
            viewport_width_px: 1000.0,
            minimum_duration_sec: 60.0,
            fallback_clip_duration_sec: 30.0,
            tick_period_ms: 100,
            min_speed: 0.1,
            max_speed: 16.0,
            bands: TrackBands::default(),
        }
    }
}

impl EditorOpts {
    /// Parse options from a JSON reader and validate them.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse editor options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk and validate them.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::config(format!("open editor options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Playback tick period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Validate option invariants.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("initial_zoom", self.initial_zoom),
            ("grid_size_sec", self.grid_size_sec),
            ("viewport_width_px", self.viewport_width_px),
            ("fallback_clip_duration_sec", self.fallback_clip_duration_sec),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ReelError::config(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(ReelError::config("min_zoom must be <= max_zoom"));
        }
        if self.min_speed > self.max_speed {
            return Err(ReelError::config("min_speed must be <= max_speed"));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ReelError::config("zoom_step must be finite and > 1"));
        }
        if !(self.fit_ratio > 0.0 && self.fit_ratio < 1.0) {
            return Err(ReelError::config("fit_ratio must be in (0, 1)"));
        }
        if !self.minimum_duration_sec.is_finite() || self.minimum_duration_sec < 0.0 {
            return Err(ReelError::config(
                "minimum_duration_sec must be finite and >= 0",
            ));
        }
        if self.tick_period_ms == 0 {
            return Err(ReelError::config("tick_period_ms must be > 0"));
        }
        self.bands.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
