//! Reelcut is the editing core of a multi-track timeline composer.
//!
//! It owns the state behind a timeline editor surface: typed tracks holding
//! non-overlapping clips, pointer-driven drag and drop, a fixed-period playback
//! clock and a zoomable, scrollable viewport. Rendering is left to the host;
//! everything here is plain data plus the rules that keep it consistent.
//!
//! # Layers
//!
//! 1. **Coordinates**: seconds to pixels and back, grid snapping, track band geometry.
//! 2. **Placement**: [`can_place`] decides whether an interval fits on a track.
//! 3. **Model**: [`TimelineModel`] is the single owner of clips and tracks; every
//!    mutation is validated in the same call that performs it.
//! 4. **Interaction**: [`transition`] turns pointer events into [`DragEffect`]s.
//! 5. **Session**: [`EditorSession`] wires the model, viewport, clock and drag
//!    controller together and is what a host talks to.
//!
//! Interactive refusals are reported as [`Rejection`] values and never abort a
//! session. Load-time and configuration failures are [`ReelError`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod coords;
mod foundation;
mod interaction;
mod playback;
mod session;
mod timeline;
mod viewport;

pub use coords::bands::TrackBands;
pub use coords::mapper::{pixel_to_snapped_time, pixel_to_time, snap, snap_time, time_to_pixel};
pub use foundation::core::{ClipId, ClipKind, Point, TIME_EPSILON, TrackId, approx_eq};
pub use foundation::error::{ReelError, ReelResult};
pub use interaction::drag::{
    ClipDrag, DragContext, DragController, DragEffect, DragEvent, DragState, LibraryDrag,
    transition,
};
pub use playback::clock::{PlaybackClock, PlaybackMode, PlaybackState};
pub use session::editor::{DispatchOutcome, EditorSession};
pub use session::opts::EditorOpts;
pub use timeline::model::{Clip, ClipDraft, TimelineModel, Track};
pub use timeline::source::{ClipRecord, LibraryItem, TimelineDocument, TrackRecord};
pub use timeline::validate::{Candidate, Rejection, can_place, intervals_overlap};
pub use viewport::view::{ViewState, ViewportManager};
