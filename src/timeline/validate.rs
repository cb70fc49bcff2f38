use crate::{
    foundation::core::{ClipId, ClipKind, TIME_EPSILON, TrackId},
    timeline::model::{Clip, Track},
};

/// Why a placement or mutation was refused.
///
/// Rejections are ordinary values: drag interactions probe invalid positions
/// all the time, so callers branch on them instead of propagating them.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Rejection {
    /// Clip kind does not match the target track kind.
    #[error("{clip} clip cannot be placed on a {track} track")]
    IncompatibleType {
        /// Kind of the clip being placed.
        clip: ClipKind,
        /// Kind of the target track.
        track: ClipKind,
    },
    /// Candidate interval intersects an existing clip on the target track.
    #[error("placement overlaps clip {with}")]
    Overlap {
        /// First colliding clip found.
        with: ClipId,
    },
    /// Clip is locked against interactive and programmatic edits.
    #[error("clip {0} is locked")]
    LockedClip(ClipId),
    /// No clip with this id exists in the model.
    #[error("unknown clip {0}")]
    UnknownClip(ClipId),
    /// No track with this id exists in the model.
    #[error("unknown track {0}")]
    UnknownTrack(TrackId),
    /// Duration is not finite or not strictly positive.
    #[error("clip duration must be finite and > 0")]
    InvalidDuration,
    /// Start time is not finite.
    #[error("clip start time must be finite")]
    InvalidTime,
    /// Pointer is not over any track band.
    #[error("no track under pointer")]
    NoTarget,
    /// Every clip id has been handed out.
    #[error("clip id space exhausted")]
    IdsExhausted,
}

/// A proposed clip interval on some track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Id of the clip being moved, `None` for a fresh insertion.
    pub clip_id: Option<ClipId>,
    /// Kind of the clip being placed.
    pub kind: ClipKind,
    /// Interval start in seconds.
    pub start_sec: f64,
    /// Interval length in seconds.
    pub duration_sec: f64,
}

impl Candidate {
    /// Exclusive interval end.
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }
}

/// Half-open interval intersection: `[a0, a1)` and `[b0, b1)` overlap when each
/// starts before the other ends. Touching endpoints do not overlap.
pub fn intervals_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end - TIME_EPSILON && a_end > b_start + TIME_EPSILON
}

/// Decide whether `candidate` may be placed on `track` given `existing` clips.
///
/// `existing` may contain clips of any track; only those on `track` are
/// considered, and the candidate's own clip (when moving) is skipped.
pub fn can_place(
    candidate: &Candidate,
    track: &Track,
    existing: &[Clip],
) -> Result<(), Rejection> {
    if !candidate.start_sec.is_finite() {
        return Err(Rejection::InvalidTime);
    }
    if !candidate.duration_sec.is_finite() || candidate.duration_sec <= 0.0 {
        return Err(Rejection::InvalidDuration);
    }
    // Both finite but the sum may still overflow.
    if !candidate.end_sec().is_finite() {
        return Err(Rejection::InvalidDuration);
    }
    if !track.kind.accepts(candidate.kind) {
        return Err(Rejection::IncompatibleType {
            clip: candidate.kind,
            track: track.kind,
        });
    }

    let start = candidate.start_sec;
    let end = candidate.end_sec();
    let collision = existing
        .iter()
        .filter(|c| c.track_id == track.id)
        .filter(|c| Some(c.id) != candidate.clip_id)
        .find(|c| intervals_overlap(start, end, c.start_sec, c.end_sec()));

    match collision {
        Some(other) => Err(Rejection::Overlap { with: other.id }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/validate.rs"]
mod tests;
