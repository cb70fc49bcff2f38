use crate::foundation::core::ClipKind;
use crate::foundation::error::{ReelError, ReelResult};

/// Vertical band geometry of the track area, supplied by the host UI.
///
/// Tracks are stacked top to bottom in canonical order, one band of
/// `band_height_px` each. When the stack crosses from the picture group
/// (Graphics, Video) into the sound group (Audio, Music), `group_gap_px` of
/// empty space is inserted once.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackBands {
    /// Y offset of the first band, relative to the pointer coordinate origin.
    #[serde(default)]
    pub top_px: f64,
    /// Height of each track band.
    #[serde(default = "default_band_height_px")]
    pub band_height_px: f64,
    /// Extra spacing between the picture and sound groups.
    #[serde(default)]
    pub group_gap_px: f64,
}

fn default_band_height_px() -> f64 {
    60.0
}

impl Default for TrackBands {
    fn default() -> Self {
        Self {
            top_px: 0.0,
            band_height_px: default_band_height_px(),
            group_gap_px: 0.0,
        }
    }
}

impl TrackBands {
    /// Validate geometry invariants.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.top_px.is_finite() {
            return Err(ReelError::config("bands top_px must be finite"));
        }
        if !self.band_height_px.is_finite() || self.band_height_px <= 0.0 {
            return Err(ReelError::config(
                "bands band_height_px must be finite and > 0",
            ));
        }
        if !self.group_gap_px.is_finite() || self.group_gap_px < 0.0 {
            return Err(ReelError::config(
                "bands group_gap_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Top edge of the band at `index` for a track stack of `kinds`.
    pub fn band_top(&self, index: usize, kinds: &[ClipKind]) -> f64 {
        let mut top = self.top_px;
        for i in 0..index.min(kinds.len()) {
            top += self.band_height_px;
            if let Some(next) = kinds.get(i + 1)
                && kinds[i].is_visual()
                && !next.is_visual()
            {
                top += self.group_gap_px;
            }
        }
        top
    }

    /// Index of the track band containing `y`, or `None` when `y` falls above
    /// the stack, below it, or inside the group gap.
    pub fn track_index_at(&self, y: f64, kinds: &[ClipKind]) -> Option<usize> {
        if !y.is_finite() {
            return None;
        }
        (0..kinds.len()).find(|&i| {
            let top = self.band_top(i, kinds);
            y >= top && y < top + self.band_height_px
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/coords/bands.rs"]
mod tests;
