use std::collections::BTreeSet;

use crate::{
    foundation::core::{ClipId, ClipKind, TrackId},
    foundation::error::{ReelError, ReelResult},
    timeline::source::ClipRecord,
    timeline::validate::{Candidate, Rejection, can_place},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A time-bounded unit placed on a track.
pub struct Clip {
    /// Model-assigned identifier.
    pub id: ClipId,
    /// Display name.
    pub name: String,
    /// Placement start in seconds (`>= 0`).
    pub start_sec: f64,
    /// Placement length in seconds (`> 0`).
    pub duration_sec: f64,
    /// Track hosting the clip.
    pub track_id: TrackId,
    /// Media kind; must match the hosting track.
    pub kind: ClipKind,
    /// Locked clips refuse drags, moves and resizes.
    #[serde(default)]
    pub locked: bool,
}

impl Clip {
    /// Exclusive end of the placement interval.
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }

    fn candidate(&self) -> Candidate {
        Candidate {
            clip_id: Some(self.id),
            kind: self.kind,
            start_sec: self.start_sec,
            duration_sec: self.duration_sec,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A clip that has not been inserted yet; the model assigns its id.
pub struct ClipDraft {
    /// Display name.
    pub name: String,
    /// Media kind.
    pub kind: ClipKind,
    /// Requested start in seconds; negative values are clamped to zero.
    pub start_sec: f64,
    /// Requested length in seconds.
    pub duration_sec: f64,
    /// Target track.
    pub track_id: TrackId,
    /// Insert the clip already locked.
    #[serde(default)]
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A typed lane hosting clips of exactly one kind.
pub struct Track {
    /// Identifier from the track source.
    pub id: TrackId,
    /// Display name.
    pub name: String,
    /// Kind of clips this track accepts.
    pub kind: ClipKind,
    /// Order hint from the track source; ties within a kind are broken by it.
    pub order_index: i64,
    /// Whether the host shows the track. Hidden tracks take no band in hit-testing.
    pub visible: bool,
    /// Whether the track is muted during playback.
    #[serde(default)]
    pub muted: bool,
    /// Display color as `#rrggbb`, passed through for the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
}

/// Authoritative clip and track collections for one editing session.
///
/// Tracks are fixed after construction. Every clip mutation is validated first
/// and either fully applied or not applied at all, so the model never holds
/// overlapping or kind-mismatched clips.
#[derive(Clone, Debug)]
pub struct TimelineModel {
    tracks: Vec<Track>,
    clips: Vec<Clip>,
    next_clip_id: u64,
    minimum_duration_sec: f64,
    total_duration_sec: f64,
}

impl TimelineModel {
    /// Build a model over `tracks`, sorted into canonical order.
    pub fn new(mut tracks: Vec<Track>, minimum_duration_sec: f64) -> ReelResult<Self> {
        if !minimum_duration_sec.is_finite() || minimum_duration_sec < 0.0 {
            return Err(ReelError::validation(
                "minimum duration must be finite and >= 0",
            ));
        }
        let mut seen = BTreeSet::new();
        for track in &tracks {
            if !seen.insert(track.id) {
                return Err(ReelError::validation(format!(
                    "duplicate track id {}",
                    track.id
                )));
            }
        }
        tracks.sort_by_key(|t| (t.kind.canonical_rank(), t.order_index, t.id));

        tracing::debug!(tracks = tracks.len(), "timeline model created");
        Ok(Self {
            tracks,
            clips: Vec::new(),
            next_clip_id: 1,
            minimum_duration_sec,
            total_duration_sec: minimum_duration_sec,
        })
    }

    /// Replace the clip set with `clips`, validating each against those before it.
    ///
    /// On error the model keeps its previous clips.
    pub fn load_clips(&mut self, clips: Vec<Clip>) -> ReelResult<()> {
        let mut accepted: Vec<Clip> = Vec::with_capacity(clips.len());
        let mut ids = BTreeSet::new();
        for clip in clips {
            if !ids.insert(clip.id) {
                return Err(ReelError::validation(format!(
                    "duplicate clip id {}",
                    clip.id
                )));
            }
            if !clip.start_sec.is_finite() || clip.start_sec < 0.0 {
                return Err(ReelError::validation(format!(
                    "clip {} start must be finite and >= 0",
                    clip.id
                )));
            }
            let track = self.track(clip.track_id).ok_or_else(|| {
                ReelError::validation(format!(
                    "clip {} references unknown track {}",
                    clip.id, clip.track_id
                ))
            })?;
            can_place(&clip.candidate(), track, &accepted).map_err(|r| {
                ReelError::validation(format!("clip {} '{}': {r}", clip.id, clip.name))
            })?;
            accepted.push(clip);
        }

        let next_clip_id = match accepted.iter().map(|c| c.id.0).max() {
            Some(max_id) => max_id
                .checked_add(1)
                .ok_or_else(|| ReelError::validation("clip id space exhausted"))?,
            None => 1,
        };

        self.next_clip_id = next_clip_id;
        self.clips = accepted;
        self.recompute_duration();
        Ok(())
    }

    /// Tracks in canonical order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by id.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Position of a track in canonical order.
    pub fn track_index(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Kinds of all tracks in canonical order.
    pub fn track_kinds(&self) -> Vec<ClipKind> {
        self.tracks.iter().map(|t| t.kind).collect()
    }

    /// All clips, in insertion order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Look up a clip by id.
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Clips hosted by `track_id`, sorted by start time.
    pub fn clips_on_track(&self, track_id: TrackId) -> Vec<&Clip> {
        let mut out: Vec<&Clip> = self
            .clips
            .iter()
            .filter(|c| c.track_id == track_id)
            .collect();
        out.sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));
        out
    }

    /// Floor applied to the derived total duration.
    pub fn minimum_duration_sec(&self) -> f64 {
        self.minimum_duration_sec
    }

    /// `max(minimum duration, latest clip end)`, as of the last mutation.
    pub fn total_duration_sec(&self) -> f64 {
        self.total_duration_sec
    }

    /// Run the placement validator for `candidate` against `track_id` without mutating.
    pub fn check_placement(
        &self,
        candidate: &Candidate,
        track_id: TrackId,
    ) -> Result<(), Rejection> {
        let track = self
            .track(track_id)
            .ok_or(Rejection::UnknownTrack(track_id))?;
        can_place(candidate, track, &self.clips)
    }

    /// Move a clip to `new_start_sec` on `new_track_id`.
    ///
    /// Negative starts are clamped to zero. On rejection nothing changes.
    pub fn try_move(
        &mut self,
        clip_id: ClipId,
        new_start_sec: f64,
        new_track_id: TrackId,
    ) -> Result<(), Rejection> {
        let idx = self.clip_slot(clip_id)?;
        let clip = &self.clips[idx];
        if clip.locked {
            return Err(Rejection::LockedClip(clip_id));
        }
        let candidate = Candidate {
            start_sec: clamp_start(new_start_sec)?,
            ..clip.candidate()
        };
        if let Err(reason) = self.check_placement(&candidate, new_track_id) {
            tracing::debug!(
                clip = %clip_id,
                track = %new_track_id,
                start = candidate.start_sec,
                %reason,
                "move rejected"
            );
            return Err(reason);
        }

        let clip = &mut self.clips[idx];
        clip.start_sec = candidate.start_sec;
        clip.track_id = new_track_id;
        tracing::trace!(
            clip = %clip_id,
            track = %new_track_id,
            start = candidate.start_sec,
            "move committed"
        );
        self.recompute_duration();
        Ok(())
    }

    /// Insert a new clip and return its freshly assigned id.
    pub fn try_insert(&mut self, draft: ClipDraft) -> Result<ClipId, Rejection> {
        let candidate = Candidate {
            clip_id: None,
            kind: draft.kind,
            start_sec: clamp_start(draft.start_sec)?,
            duration_sec: draft.duration_sec,
        };
        if let Err(reason) = self.check_placement(&candidate, draft.track_id) {
            tracing::debug!(
                name = %draft.name,
                track = %draft.track_id,
                start = candidate.start_sec,
                %reason,
                "insert rejected"
            );
            return Err(reason);
        }
        let next = self
            .next_clip_id
            .checked_add(1)
            .ok_or(Rejection::IdsExhausted)?;

        let id = ClipId(self.next_clip_id);
        self.next_clip_id = next;
        self.clips.push(Clip {
            id,
            name: draft.name,
            start_sec: candidate.start_sec,
            duration_sec: candidate.duration_sec,
            track_id: draft.track_id,
            kind: draft.kind,
            locked: draft.locked,
        });
        tracing::debug!(
            clip = %id,
            track = %draft.track_id,
            start = candidate.start_sec,
            "clip inserted"
        );
        self.recompute_duration();
        Ok(id)
    }

    /// Change a clip's duration, keeping its start and track.
    pub fn try_resize(
        &mut self,
        clip_id: ClipId,
        new_duration_sec: f64,
    ) -> Result<(), Rejection> {
        let idx = self.clip_slot(clip_id)?;
        let clip = &self.clips[idx];
        if clip.locked {
            return Err(Rejection::LockedClip(clip_id));
        }
        let candidate = Candidate {
            duration_sec: new_duration_sec,
            ..clip.candidate()
        };
        if let Err(reason) = self.check_placement(&candidate, clip.track_id) {
            tracing::debug!(
                clip = %clip_id,
                duration = new_duration_sec,
                %reason,
                "resize rejected"
            );
            return Err(reason);
        }

        self.clips[idx].duration_sec = new_duration_sec;
        self.recompute_duration();
        Ok(())
    }

    /// Lock or unlock a clip.
    pub fn set_locked(&mut self, clip_id: ClipId, locked: bool) -> Result<(), Rejection> {
        let idx = self.clip_slot(clip_id)?;
        self.clips[idx].locked = locked;
        Ok(())
    }

    /// Remove a clip, returning it when it existed.
    pub fn remove(&mut self, clip_id: ClipId) -> Option<Clip> {
        let idx = self.clips.iter().position(|c| c.id == clip_id)?;
        let clip = self.clips.remove(idx);
        tracing::debug!(clip = %clip_id, "clip removed");
        self.recompute_duration();
        Some(clip)
    }

    /// Re-derive the total duration from the clip set and return it.
    pub fn recompute_duration(&mut self) -> f64 {
        let max_end = self
            .clips
            .iter()
            .map(Clip::end_sec)
            .fold(0.0_f64, f64::max);
        self.total_duration_sec = max_end.max(self.minimum_duration_sec);
        self.total_duration_sec
    }

    /// Export-facing snapshot, ordered by track position then start time.
    pub fn snapshot(&self) -> Vec<ClipRecord> {
        let mut clips: Vec<&Clip> = self.clips.iter().collect();
        clips.sort_by(|a, b| {
            let ta = self.track_index(a.track_id);
            let tb = self.track_index(b.track_id);
            ta.cmp(&tb)
                .then(a.start_sec.total_cmp(&b.start_sec))
                .then(a.id.cmp(&b.id))
        });
        clips.into_iter().map(ClipRecord::from).collect()
    }

    /// Re-verify the no-overlap and kind invariants over the whole model.
    pub fn check_invariants(&self) -> ReelResult<()> {
        for (i, clip) in self.clips.iter().enumerate() {
            let track = self.track(clip.track_id).ok_or_else(|| {
                ReelError::validation(format!(
                    "clip {} references unknown track {}",
                    clip.id, clip.track_id
                ))
            })?;
            can_place(&clip.candidate(), track, &self.clips[..i])
                .map_err(|r| ReelError::validation(format!("clip {}: {r}", clip.id)))?;
        }
        Ok(())
    }

    fn clip_slot(&self, clip_id: ClipId) -> Result<usize, Rejection> {
        self.clips
            .iter()
            .position(|c| c.id == clip_id)
            .ok_or(Rejection::UnknownClip(clip_id))
    }
}

// Negative starts clamp to zero; NaN and infinities are refused rather than
// collapsed onto the origin.
fn clamp_start(start_sec: f64) -> Result<f64, Rejection> {
    if !start_sec.is_finite() {
        return Err(Rejection::InvalidTime);
    }
    Ok(start_sec.max(0.0))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
