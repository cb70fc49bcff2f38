//! Boundary records exchanged with the track source, clip library and save sink.
//!
//! These use the collaborators' camelCase field names. Kind names are resolved
//! through [`ClipKind::from_name`] and an unknown name fails the load.

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::core::{ClipId, ClipKind, TrackId},
    foundation::error::{ReelError, ReelResult},
    timeline::model::{Clip, ClipDraft, TimelineModel, Track},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Layer configuration record supplied by the track source.
pub struct TrackRecord {
    /// Track id.
    pub id: TrackId,
    /// Layer name; doubles as the track kind (case-insensitive).
    pub name: String,
    /// Display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
    /// Source ordering hint.
    #[serde(default)]
    pub order_index: i64,
    /// Whether the layer is shown.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl TrackRecord {
    /// Resolve the record into a typed [`Track`].
    pub fn to_track(&self) -> ReelResult<Track> {
        let kind = ClipKind::from_name(&self.name).ok_or_else(|| {
            ReelError::validation(format!(
                "track {} has unrecognized layer name '{}'",
                self.id, self.name
            ))
        })?;
        Ok(Track {
            id: self.id,
            name: self.name.clone(),
            kind,
            order_index: self.order_index,
            visible: self.is_active,
            muted: false,
            color_hex: self.color_hex.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Template record from the clip library, used only to seed insertions.
pub struct LibraryItem {
    /// Library-side identifier; not reused as a clip id.
    pub id: String,
    /// Name given to clips created from this item.
    pub name: String,
    /// Media kind.
    #[serde(rename = "type")]
    pub kind: ClipKind,
    /// Suggested clip length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LibraryItem {
    /// Duration for a clip created from this item.
    ///
    /// Missing, non-finite or non-positive estimates fall back to `fallback_sec`.
    pub fn clip_duration(&self, fallback_sec: f64) -> f64 {
        match self.estimated_duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => fallback_sec,
        }
    }

    /// Build an insertion draft at `start_sec` on `track_id`.
    pub fn draft(&self, start_sec: f64, track_id: TrackId, fallback_sec: f64) -> ClipDraft {
        ClipDraft {
            name: self.name.clone(),
            kind: self.kind,
            start_sec,
            duration_sec: self.clip_duration(fallback_sec),
            track_id,
            locked: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Snapshot row handed to the save/export sink.
pub struct ClipRecord {
    /// Clip id.
    pub id: ClipId,
    /// Display name.
    pub name: String,
    /// Start in seconds.
    pub start_time: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Hosting track.
    pub track_id: TrackId,
    /// Media kind.
    pub clip_type: ClipKind,
    /// Lock flag; omitted when unlocked.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
}

impl From<&Clip> for ClipRecord {
    fn from(c: &Clip) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            start_time: c.start_sec,
            duration: c.duration_sec,
            track_id: c.track_id,
            clip_type: c.kind,
            locked: c.locked,
        }
    }
}

impl From<ClipRecord> for Clip {
    fn from(r: ClipRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            start_sec: r.start_time,
            duration_sec: r.duration,
            track_id: r.track_id,
            kind: r.clip_type,
            locked: r.locked,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Saved timeline: track layer configuration plus placed clips.
pub struct TimelineDocument {
    /// Track source records.
    pub tracks: Vec<TrackRecord>,
    /// Placed clips.
    #[serde(default)]
    pub clips: Vec<ClipRecord>,
}

impl TimelineDocument {
    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse timeline document JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open timeline document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("serialize timeline document: {e}")))
    }

    /// Build a validated model from this document.
    pub fn to_model(&self, minimum_duration_sec: f64) -> ReelResult<TimelineModel> {
        let tracks = self
            .tracks
            .iter()
            .map(TrackRecord::to_track)
            .collect::<ReelResult<Vec<_>>>()?;
        let mut model = TimelineModel::new(tracks, minimum_duration_sec)?;
        model.load_clips(self.clips.iter().cloned().map(Clip::from).collect())?;
        Ok(model)
    }

    /// Capture the current state of `model` using `tracks` as the layer records.
    pub fn from_model(tracks: Vec<TrackRecord>, model: &TimelineModel) -> Self {
        Self {
            tracks,
            clips: model.snapshot(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/source.rs"]
mod tests;
