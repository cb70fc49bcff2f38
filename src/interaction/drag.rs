//! Drag/drop interaction state machine.
//!
//! [`transition`] is a pure function from `(state, event)` to
//! `(state, effects)`. It reads the model and view but never mutates them; the
//! owning session applies the returned [`DragEffect`]s in the same turn.

use crate::{
    coords::bands::TrackBands,
    coords::mapper::{pixel_to_snapped_time, time_to_pixel},
    foundation::core::{ClipId, ClipKind, Point, TrackId, approx_eq},
    timeline::model::{ClipDraft, TimelineModel, Track},
    timeline::source::LibraryItem,
    timeline::validate::Rejection,
    viewport::view::ViewState,
};

/// Pointer input delivered by the host.
///
/// Positions are viewport-local: `x` is measured from the left edge of the
/// visible timeline area, `y` in the same space as [`TrackBands`].
#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// Pointer pressed on a placed clip.
    PointerDown {
        /// Clip under the pointer.
        clip_id: ClipId,
        /// Pointer position.
        pos: Point,
    },
    /// Pointer moved while captured.
    PointerMove {
        /// Pointer position.
        pos: Point,
    },
    /// Pointer released.
    PointerUp {
        /// Pointer position.
        pos: Point,
    },
    /// Pointer capture lost (window blur, pointer left the window, ...).
    PointerCancel,
    /// A library item started being dragged toward the timeline.
    LibraryDragStart {
        /// Template being dragged.
        item: LibraryItem,
    },
    /// The dragged library item hovers over the timeline surface.
    LibraryDragOver {
        /// Pointer position.
        pos: Point,
    },
    /// The dragged library item was dropped on the timeline surface.
    LibraryDrop {
        /// Pointer position.
        pos: Point,
    },
}

/// An in-progress drag of a placed clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipDrag {
    /// Clip being dragged.
    pub clip_id: ClipId,
    /// Kind of the dragged clip, fixed for the drag.
    pub kind: ClipKind,
    /// Pointer x minus the clip's left edge, in content pixels.
    pub offset_px: f64,
}

/// An in-progress drag of a library item.
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryDrag {
    /// Template being dragged.
    pub item: LibraryItem,
    /// Last drop-target verdict reported to the host.
    pub over_valid_target: Option<bool>,
}

/// Interaction state. `Idle` means no drag is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// Nothing is being dragged.
    #[default]
    Idle,
    /// A placed clip is being repositioned.
    Dragging(ClipDrag),
    /// A library item is being dragged over the timeline.
    DraggingLibraryItem(LibraryDrag),
}

impl DragState {
    /// `true` while any drag is active.
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

/// Requested side effects of a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEffect {
    /// Change the selection.
    Select(Option<ClipId>),
    /// Attempt to move a clip; the model validates again when applying.
    MoveClip {
        /// Clip to move.
        clip_id: ClipId,
        /// New start in seconds.
        start_sec: f64,
        /// Destination track.
        track_id: TrackId,
    },
    /// Attempt to insert a clip built from a library item.
    InsertClip(ClipDraft),
    /// Whether the pointer is over a valid drop target (visual feedback only).
    DropTarget {
        /// Verdict for the current pointer position.
        valid: bool,
    },
    /// The event was refused; diagnostic only.
    Rejected(Rejection),
}

/// Read-only inputs a transition needs.
#[derive(Clone, Copy, Debug)]
pub struct DragContext<'a> {
    /// Current timeline.
    pub model: &'a TimelineModel,
    /// Current view (zoom, scroll, snapping).
    pub view: &'a ViewState,
    /// Track band geometry.
    pub bands: &'a TrackBands,
    /// Clip length used when a library item has no estimate.
    pub fallback_clip_duration_sec: f64,
}

impl<'a> DragContext<'a> {
    fn time_at(&self, content_x: f64) -> f64 {
        pixel_to_snapped_time(
            content_x,
            self.view.zoom,
            self.view.grid_size_sec,
            self.view.snap_to_grid,
        )
    }

    // Only visible tracks occupy a band.
    fn track_at(&self, y: f64) -> Option<&'a Track> {
        let visible: Vec<&Track> = self
            .model
            .tracks()
            .iter()
            .filter(|t| t.visible)
            .collect();
        let kinds: Vec<ClipKind> = visible.iter().map(|t| t.kind).collect();
        let idx = self.bands.track_index_at(y, &kinds)?;
        visible.get(idx).copied()
    }
}

/// Advance the state machine by one event.
pub fn transition(
    state: DragState,
    event: DragEvent,
    ctx: &DragContext<'_>,
) -> (DragState, Vec<DragEffect>) {
    match (state, event) {
        // Release or capture loss always ends the interaction.
        (_, DragEvent::PointerCancel) => (DragState::Idle, Vec::new()),
        (DragState::Dragging(drag), DragEvent::PointerUp { .. }) => {
            tracing::debug!(clip = %drag.clip_id, "clip drag ended");
            (DragState::Idle, Vec::new())
        }
        (DragState::DraggingLibraryItem(drag), DragEvent::PointerUp { .. }) => {
            tracing::debug!(item = %drag.item.id, "library drag released outside timeline");
            (DragState::Idle, Vec::new())
        }

        (DragState::Idle, DragEvent::PointerDown { clip_id, pos }) => {
            start_clip_drag(clip_id, pos, ctx)
        }
        (DragState::Idle, DragEvent::LibraryDragStart { item }) => {
            tracing::debug!(item = %item.id, kind = %item.kind, "library drag started");
            (
                DragState::DraggingLibraryItem(LibraryDrag {
                    item,
                    over_valid_target: None,
                }),
                Vec::new(),
            )
        }

        (DragState::Dragging(drag), DragEvent::PointerMove { pos }) => {
            let effects = move_clip_drag(&drag, pos, ctx);
            (DragState::Dragging(drag), effects)
        }

        (DragState::DraggingLibraryItem(mut drag), DragEvent::LibraryDragOver { pos })
        | (DragState::DraggingLibraryItem(mut drag), DragEvent::PointerMove { pos }) => {
            let valid = ctx
                .track_at(pos.y)
                .is_some_and(|t| t.kind.accepts(drag.item.kind));
            drag.over_valid_target = Some(valid);
            (
                DragState::DraggingLibraryItem(drag),
                vec![DragEffect::DropTarget { valid }],
            )
        }

        (DragState::DraggingLibraryItem(drag), DragEvent::LibraryDrop { pos }) => {
            (DragState::Idle, drop_library_item(&drag.item, pos, ctx))
        }

        // Anything else is out of sequence for the current state and ignored.
        (state, event) => {
            tracing::trace!(?event, "drag event ignored");
            (state, Vec::new())
        }
    }
}

fn start_clip_drag(
    clip_id: ClipId,
    pos: Point,
    ctx: &DragContext<'_>,
) -> (DragState, Vec<DragEffect>) {
    let Some(clip) = ctx.model.clip(clip_id) else {
        return (
            DragState::Idle,
            vec![DragEffect::Rejected(Rejection::UnknownClip(clip_id))],
        );
    };
    if clip.locked {
        tracing::debug!(clip = %clip_id, "drag refused on locked clip");
        return (
            DragState::Idle,
            vec![DragEffect::Rejected(Rejection::LockedClip(clip_id))],
        );
    }
    if !pos.x.is_finite() {
        return (
            DragState::Idle,
            vec![DragEffect::Rejected(Rejection::InvalidTime)],
        );
    }

    let pointer_x = ctx.view.content_x(pos.x);
    let offset_px = pointer_x - time_to_pixel(clip.start_sec, ctx.view.zoom);
    tracing::debug!(clip = %clip_id, offset_px, "clip drag started");
    (
        DragState::Dragging(ClipDrag {
            clip_id,
            kind: clip.kind,
            offset_px,
        }),
        vec![DragEffect::Select(Some(clip_id))],
    )
}

fn move_clip_drag(drag: &ClipDrag, pos: Point, ctx: &DragContext<'_>) -> Vec<DragEffect> {
    // The clip may have been removed programmatically mid-drag.
    let Some(clip) = ctx.model.clip(drag.clip_id) else {
        return vec![DragEffect::Rejected(Rejection::UnknownClip(drag.clip_id))];
    };

    let start_sec = ctx.time_at(ctx.view.content_x(pos.x) - drag.offset_px);
    if !start_sec.is_finite() {
        return vec![DragEffect::Rejected(Rejection::InvalidTime)];
    }
    // Never retarget onto a track that cannot host the clip.
    let track_id = match ctx.track_at(pos.y) {
        Some(track) if track.kind.accepts(drag.kind) => track.id,
        _ => clip.track_id,
    };

    if track_id == clip.track_id && approx_eq(start_sec, clip.start_sec) {
        return Vec::new();
    }
    vec![DragEffect::MoveClip {
        clip_id: drag.clip_id,
        start_sec,
        track_id,
    }]
}

fn drop_library_item(item: &LibraryItem, pos: Point, ctx: &DragContext<'_>) -> Vec<DragEffect> {
    let Some(track) = ctx.track_at(pos.y) else {
        tracing::debug!(item = %item.id, "library drop outside any track");
        return vec![DragEffect::Rejected(Rejection::NoTarget)];
    };
    if !track.kind.accepts(item.kind) {
        tracing::debug!(
            item = %item.id,
            kind = %item.kind,
            track = %track.id,
            "library drop on incompatible track"
        );
        return vec![DragEffect::Rejected(Rejection::IncompatibleType {
            clip: item.kind,
            track: track.kind,
        })];
    }

    let start_sec = ctx.time_at(ctx.view.content_x(pos.x));
    if !start_sec.is_finite() {
        return vec![DragEffect::Rejected(Rejection::InvalidTime)];
    }
    vec![DragEffect::InsertClip(item.draft(
        start_sec,
        track.id,
        ctx.fallback_clip_duration_sec,
    ))]
}

/// Owner of the current [`DragState`].
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// `true` while any drag is active.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Feed one event and return the effects to apply.
    pub fn handle(&mut self, event: DragEvent, ctx: &DragContext<'_>) -> Vec<DragEffect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, event, ctx);
        self.state = next;
        effects
    }

    /// Drop any active drag without effects.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
