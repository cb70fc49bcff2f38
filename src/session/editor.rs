use std::time::Duration;

use crate::{
    foundation::core::{ClipId, TrackId},
    foundation::error::ReelResult,
    interaction::drag::{DragContext, DragController, DragEffect, DragEvent, DragState},
    playback::clock::{PlaybackClock, PlaybackState},
    session::opts::EditorOpts,
    timeline::model::{Clip, ClipDraft, TimelineModel},
    timeline::source::{ClipRecord, TimelineDocument, TrackRecord},
    timeline::validate::Rejection,
    viewport::view::{ViewState, ViewportManager},
};

/// What a dispatched event did, for host feedback.
///
/// Nothing here is an error: rejected interactions leave the timeline as it was
/// and report why in `rejection`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatchOutcome {
    /// A clip was moved or inserted.
    pub changed: bool,
    /// Id of a clip inserted by a library drop.
    pub inserted: Option<ClipId>,
    /// Drop-target verdict while dragging a library item.
    pub drop_target: Option<bool>,
    /// Why the event (or its resulting mutation) was refused.
    pub rejection: Option<Rejection>,
}

/// One editing session: the timeline model plus the view, clock and drag state
/// that operate on it.
///
/// Every entry point runs to completion before returning, so validation and the
/// write it guards always happen in the same call.
#[derive(Debug)]
pub struct EditorSession {
    opts: EditorOpts,
    track_records: Vec<TrackRecord>,
    model: TimelineModel,
    viewport: ViewportManager,
    clock: PlaybackClock,
    drag: DragController,
}

impl EditorSession {
    /// Open a session over the track source records, with no clips.
    pub fn new(track_records: Vec<TrackRecord>, opts: EditorOpts) -> ReelResult<Self> {
        Self::from_document(
            &TimelineDocument {
                tracks: track_records,
                clips: Vec::new(),
            },
            opts,
        )
    }

    /// Open a session from a saved document.
    pub fn from_document(doc: &TimelineDocument, opts: EditorOpts) -> ReelResult<Self> {
        opts.validate()?;
        let model = doc.to_model(opts.minimum_duration_sec)?;
        let clock = PlaybackClock::new(
            model.total_duration_sec(),
            opts.tick_period(),
            opts.min_speed,
            opts.max_speed,
        );
        let viewport = ViewportManager::new(&opts);
        tracing::debug!(
            tracks = model.tracks().len(),
            clips = model.clips().len(),
            "editor session opened"
        );
        Ok(Self {
            opts,
            track_records: doc.tracks.clone(),
            model,
            viewport,
            clock,
            drag: DragController::new(),
        })
    }

    /// Options the session was opened with.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Current timeline.
    pub fn model(&self) -> &TimelineModel {
        &self.model
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        self.viewport.state()
    }

    /// Current playback clock.
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Current playback state snapshot.
    pub fn playback(&self) -> PlaybackState {
        self.clock.state()
    }

    /// Current drag state.
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Feed one pointer event through the drag controller and apply its effects.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn dispatch(&mut self, event: DragEvent) -> DispatchOutcome {
        let ctx = DragContext {
            model: &self.model,
            view: self.viewport.state(),
            bands: &self.opts.bands,
            fallback_clip_duration_sec: self.opts.fallback_clip_duration_sec,
        };
        let effects = self.drag.handle(event, &ctx);

        let mut outcome = DispatchOutcome::default();
        for effect in effects {
            self.apply(effect, &mut outcome);
        }
        outcome
    }

    fn apply(&mut self, effect: DragEffect, outcome: &mut DispatchOutcome) {
        match effect {
            DragEffect::Select(clip) => self.viewport.select(clip),
            DragEffect::MoveClip {
                clip_id,
                start_sec,
                track_id,
            } => match self.move_clip(clip_id, start_sec, track_id) {
                Ok(()) => outcome.changed = true,
                Err(reason) => outcome.rejection = Some(reason),
            },
            DragEffect::InsertClip(draft) => match self.add_clip(draft) {
                Ok(id) => {
                    outcome.changed = true;
                    outcome.inserted = Some(id);
                }
                Err(reason) => outcome.rejection = Some(reason),
            },
            DragEffect::DropTarget { valid } => outcome.drop_target = Some(valid),
            DragEffect::Rejected(reason) => {
                tracing::debug!(%reason, "interaction rejected");
                outcome.rejection = Some(reason);
            }
        }
    }

    /// Abort any drag in progress, e.g. on teardown or focus loss.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Insert a clip programmatically.
    pub fn add_clip(&mut self, draft: ClipDraft) -> Result<ClipId, Rejection> {
        let id = self.model.try_insert(draft)?;
        self.sync_duration();
        Ok(id)
    }

    /// Move a clip programmatically.
    pub fn move_clip(
        &mut self,
        clip_id: ClipId,
        start_sec: f64,
        track_id: TrackId,
    ) -> Result<(), Rejection> {
        self.model.try_move(clip_id, start_sec, track_id)?;
        self.sync_duration();
        Ok(())
    }

    /// Resize a clip programmatically.
    pub fn resize_clip(&mut self, clip_id: ClipId, duration_sec: f64) -> Result<(), Rejection> {
        self.model.try_resize(clip_id, duration_sec)?;
        self.sync_duration();
        Ok(())
    }

    /// Lock or unlock a clip.
    pub fn set_clip_locked(&mut self, clip_id: ClipId, locked: bool) -> Result<(), Rejection> {
        self.model.set_locked(clip_id, locked)
    }

    /// Remove a clip, clearing the selection when it pointed at it.
    pub fn remove_clip(&mut self, clip_id: ClipId) -> Option<Clip> {
        let removed = self.model.remove(clip_id)?;
        if self.viewport.state().selected_clip == Some(clip_id) {
            self.viewport.select(None);
        }
        self.sync_duration();
        Some(removed)
    }

    /// Select a clip, or clear the selection. Unknown ids clear it.
    pub fn select_clip(&mut self, clip_id: Option<ClipId>) {
        let clip_id = clip_id.filter(|id| self.model.clip(*id).is_some());
        self.viewport.select(clip_id);
    }

    fn sync_duration(&mut self) {
        self.clock.set_total_duration(self.model.total_duration_sec());
    }

    /// Toggle playback.
    pub fn play(&mut self) {
        self.clock.play();
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Stop playback and rewind.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Seek the playhead.
    pub fn seek(&mut self, time_sec: f64) {
        self.clock.seek(time_sec);
    }

    /// Change the playback speed.
    pub fn set_speed(&mut self, multiplier: f64) {
        self.clock.set_speed(multiplier);
    }

    /// Feed elapsed wall time to the clock; returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.clock.advance(elapsed)
    }

    /// Set the zoom level.
    pub fn set_zoom(&mut self, level: f64) -> f64 {
        self.viewport.set_zoom(level)
    }

    /// Step the zoom in.
    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    /// Step the zoom out.
    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    /// Fit the whole timeline into the current viewport width.
    pub fn zoom_to_fit(&mut self) -> f64 {
        let width = self.viewport.state().viewport_width_px;
        self.viewport
            .zoom_to_fit(self.model.total_duration_sec(), width)
    }

    /// Update the viewport width reported by the host.
    pub fn set_viewport_width(&mut self, width_px: f64) -> ReelResult<()> {
        self.viewport.set_viewport_width(width_px)
    }

    /// Scroll the viewport.
    pub fn scroll_to(&mut self, left_px: f64) {
        self.viewport.scroll_to(left_px);
    }

    /// Toggle grid snapping.
    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.viewport.set_snap_to_grid(enabled);
    }

    /// Change the snapping grid spacing.
    pub fn set_grid_size(&mut self, grid_size_sec: f64) -> ReelResult<()> {
        self.viewport.set_grid_size(grid_size_sec)
    }

    /// Center the viewport on a time.
    pub fn center_on_time(&mut self, time_sec: f64) {
        self.viewport.center_on_time(time_sec);
    }

    /// Center the viewport on the playhead.
    pub fn center_on_playhead(&mut self) {
        self.viewport.center_on_time(self.clock.current_time_sec());
    }

    /// Seek to zero, optionally re-centering the viewport on the playhead.
    pub fn jump_to_start(&mut self, recenter: bool) {
        self.clock.seek(0.0);
        if recenter {
            self.center_on_playhead();
        }
    }

    /// Seek to the end, optionally re-centering the viewport on the playhead.
    pub fn jump_to_end(&mut self, recenter: bool) {
        self.clock.seek(self.model.total_duration_sec());
        if recenter {
            self.center_on_playhead();
        }
    }

    /// Clip snapshot for the save/export sink.
    pub fn snapshot(&self) -> Vec<ClipRecord> {
        self.model.snapshot()
    }

    /// Full document for saving.
    pub fn to_document(&self) -> TimelineDocument {
        TimelineDocument::from_model(self.track_records.clone(), &self.model)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
