use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::Point;

/// Tolerance used when comparing derived times and pixel positions.
pub const TIME_EPSILON: f64 = 1e-9;

/// Compare two floating point values within [`TIME_EPSILON`] scaled to magnitude.
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= TIME_EPSILON * scale
}

/// Identifier of a clip placed on the timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ClipId(pub u64);

/// Identifier of a track, as supplied by the track source.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Media category shared by clips and tracks.
///
/// The same enumeration types both sides of the compatibility rule: a clip of
/// kind `K` may only live on a track of kind `K`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ClipKind {
    /// Overlays, titles and other generated imagery.
    Graphics,
    /// Picture footage.
    Video,
    /// Dialogue and effects audio.
    Audio,
    /// Score and music beds.
    Music,
}

impl ClipKind {
    /// All kinds in canonical track order.
    pub const ALL: [ClipKind; 4] = [
        ClipKind::Graphics,
        ClipKind::Video,
        ClipKind::Audio,
        ClipKind::Music,
    ];

    /// Case-insensitive lookup of a kind name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
    }

    /// Canonical display name.
    pub fn as_str(self) -> &'static str {
        match self {
            ClipKind::Graphics => "Graphics",
            ClipKind::Video => "Video",
            ClipKind::Audio => "Audio",
            ClipKind::Music => "Music",
        }
    }

    /// Position in the canonical track order (Graphics, Video, Audio, Music).
    pub fn canonical_rank(self) -> u32 {
        match self {
            ClipKind::Graphics => 0,
            ClipKind::Video => 1,
            ClipKind::Audio => 2,
            ClipKind::Music => 3,
        }
    }

    /// `true` for the picture group (Graphics, Video), `false` for the sound group.
    pub fn is_visual(self) -> bool {
        matches!(self, ClipKind::Graphics | ClipKind::Video)
    }

    /// One-to-one compatibility table between clip and track kinds.
    pub fn accepts(self, clip_kind: ClipKind) -> bool {
        self == clip_kind
    }
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClipKind {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        Self::from_name(s)
            .ok_or_else(|| ReelError::validation(format!("unrecognized clip/track kind '{s}'")))
    }
}

impl TryFrom<String> for ClipKind {
    type Error = ReelError;

    fn try_from(value: String) -> ReelResult<Self> {
        value.parse()
    }
}

impl From<ClipKind> for String {
    fn from(kind: ClipKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
