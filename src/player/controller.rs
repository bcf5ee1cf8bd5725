// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback command and query surface.
//!
//! The controller owns the routine library, the current selection,
//! the shared transition duration, and the sequencer, and exposes the
//! commands the presentation layer forwards. Commands never fail:
//! invalid input is clamped or ignored, and each command reports
//! whether it had any effect.

use tracing::{debug, info};

use crate::routine::{Routine, RoutineLibrary, MIN_TRANSITION};

use super::sequencer::{Phase, Sequencer, StepEvent};

/// Front door for all playback mutations and reads
#[derive(Debug, Clone)]
pub struct PlaybackController {
    library: RoutineLibrary,
    selected: usize,
    transition_secs: u32,
    sequencer: Sequencer,
}

impl PlaybackController {
    /// Create a controller over a library. The first routine is
    /// selected and the idle readout mirrors its first pose.
    pub fn new(library: RoutineLibrary, transition_secs: u32) -> Self {
        let mut controller = Self {
            library,
            selected: 0,
            transition_secs: transition_secs.max(MIN_TRANSITION),
            sequencer: Sequencer::new(),
        };
        controller.resync_idle();
        controller
    }

    /// The routine library
    pub fn library(&self) -> &RoutineLibrary {
        &self.library
    }

    /// Index of the selected routine
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected routine, if the library is non-empty
    pub fn selected_routine(&self) -> Option<&Routine> {
        self.library.at(self.selected)
    }

    /// Shared transition duration in seconds
    pub fn transition_secs(&self) -> u32 {
        self.transition_secs
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    /// Index of the pose being held or transitioned from
    pub fn pose_index(&self) -> usize {
        self.sequencer.phase().pose_index()
    }

    /// Seconds left in the current phase (idle: the first hold)
    pub fn remaining_secs(&self) -> u32 {
        self.sequencer.remaining_secs()
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.sequencer.is_paused()
    }

    /// Whether playback is active
    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    /// Total time of the selected routine at the current transition
    /// duration; recomputed on every call.
    pub fn total_secs(&self) -> u32 {
        self.selected_routine()
            .map(|r| r.total_secs(self.transition_secs))
            .unwrap_or(0)
    }

    /// Select a routine by id for the idle display. No effect while
    /// playing, for an unknown id, or when already selected.
    pub fn select_routine(&mut self, id: &str) -> bool {
        if self.is_playing() {
            return false;
        }
        match self.library.index_of(id) {
            Some(index) if index != self.selected => {
                self.selected = index;
                self.resync_idle();
                debug!(routine = id, "routine selected");
                true
            }
            _ => false,
        }
    }

    /// Select the next routine, wrapping. No effect while playing.
    pub fn select_next(&mut self) -> bool {
        self.select_offset(1)
    }

    /// Select the previous routine, wrapping. No effect while playing.
    pub fn select_prev(&mut self) -> bool {
        self.select_offset(-1)
    }

    fn select_offset(&mut self, offset: isize) -> bool {
        if self.is_playing() || self.library.len() < 2 {
            return false;
        }
        let len = self.library.len() as isize;
        self.selected = (self.selected as isize + offset).rem_euclid(len) as usize;
        self.resync_idle();
        true
    }

    /// Start playback of the selected routine. A routine with no
    /// poses (or an empty library) never starts.
    pub fn start(&mut self) -> bool {
        let Some(routine) = self.library.at(self.selected) else {
            return false;
        };
        let started = self.sequencer.start(routine);
        if started {
            info!(routine = %routine.id, total = self.total_secs(), "routine started");
        }
        started
    }

    /// Pause or resume. The countdown resumes from the exact value it
    /// paused at.
    pub fn toggle_pause(&mut self) -> bool {
        self.sequencer.toggle_pause()
    }

    /// Rewind the running playback to the first pose.
    pub fn restart(&mut self) -> bool {
        match self.library.at(self.selected) {
            Some(routine) => self.sequencer.restart(routine),
            None => false,
        }
    }

    /// Leave playback and return to the idle display.
    pub fn exit(&mut self) -> bool {
        match self.library.at(self.selected) {
            Some(routine) => self.sequencer.exit(routine),
            None => false,
        }
    }

    /// Adjust one pose's hold duration, clamped at the floor. While
    /// idle the countdown readout re-syncs to the (possibly changed)
    /// first hold; a live countdown is never rewritten. Returns the
    /// new value, or `None` for an unknown pose id.
    pub fn adjust_pose_duration(&mut self, pose_id: &str, delta: i64) -> Option<u32> {
        let adjusted = self.library.adjust_pose_duration(pose_id, delta)?;
        debug!(pose = pose_id, secs = adjusted, "hold duration adjusted");
        if !self.is_playing() {
            self.resync_idle();
        }
        Some(adjusted)
    }

    /// Adjust the shared transition duration, clamped at the floor.
    /// An in-flight transition's countdown snaps to the new value.
    /// Returns the new value.
    pub fn adjust_transition(&mut self, delta: i64) -> u32 {
        let next = self.transition_secs as i64 + delta;
        self.transition_secs = next.max(MIN_TRANSITION as i64) as u32;
        debug!(secs = self.transition_secs, "transition duration adjusted");
        self.sequencer.snap_transition(self.transition_secs);
        self.transition_secs
    }

    /// Deliver one second of time. Expected at 1 Hz from an external
    /// driver; suppressed while idle or paused.
    pub fn on_tick(&mut self) -> StepEvent {
        match self.library.at(self.selected) {
            Some(routine) => self.sequencer.advance(routine, self.transition_secs),
            None => StepEvent::Suppressed,
        }
    }

    /// Replace the whole library (config reload). Only honored while
    /// idle; selection is kept by id when possible. Returns whether
    /// the library was swapped.
    pub fn replace_library(&mut self, library: RoutineLibrary) -> bool {
        if self.is_playing() {
            return false;
        }
        let selected_id = self.selected_routine().map(|r| r.id.clone());
        self.library = library;
        self.selected = selected_id
            .and_then(|id| self.library.index_of(&id))
            .unwrap_or(0);
        self.resync_idle();
        info!(routines = self.library.len(), "routine library replaced");
        true
    }

    fn resync_idle(&mut self) {
        match self.library.at(self.selected) {
            Some(routine) => self.sequencer.sync_idle(routine),
            None => self.sequencer.sync_idle(&Routine::new("", "")),
        }
    }
}
