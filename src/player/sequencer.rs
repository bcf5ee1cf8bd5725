// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Countdown state machine.
//!
//! The sequencer owns the live playback state: which phase it is in,
//! how many seconds remain in that phase, and whether ticking is
//! suppressed. It advances exactly one second per [`Sequencer::advance`]
//! call and never consults a clock itself; an external driver delivers
//! ticks serially.

use tracing::debug;

use crate::routine::Routine;

/// Where the countdown currently is.
///
/// The variant carries the pose index so a transition with no next
/// pose cannot be represented: `Transition(i)` is only ever
/// constructed when pose `i + 1` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Holding pose `i`
    Pose(usize),
    /// Moving from pose `i` toward pose `i + 1`
    Transition(usize),
}

impl Phase {
    /// Index of the pose being held or transitioned from
    pub fn pose_index(&self) -> usize {
        match *self {
            Phase::Pose(i) | Phase::Transition(i) => i,
        }
    }

    /// Whether this is a transition interval
    pub fn is_transition(&self) -> bool {
        matches!(self, Phase::Transition(_))
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Idle or paused; no state changed
    Suppressed,
    /// The current phase counted down by one second
    CountedDown,
    /// The hold of pose `i` ended and its transition began
    TransitionStarted(usize),
    /// A transition ended and the hold of pose `i` began
    PoseStarted(usize),
    /// The last hold ended; playback returned to idle
    Finished,
}

/// The live countdown state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequencer {
    phase: Phase,
    remaining: u32,
    paused: bool,
    playing: bool,
}

impl Sequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self {
            phase: Phase::Pose(0),
            remaining: 0,
            paused: false,
            playing: false,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left in the current phase
    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// Whether ticks are currently suppressed by the user
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether playback is active (false = idle/editing)
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Re-establish the idle mirror: first pose of `routine`, not
    /// paused, remaining showing that pose's hold (0 when empty).
    /// Does nothing while playing.
    pub fn sync_idle(&mut self, routine: &Routine) {
        if self.playing {
            return;
        }
        self.phase = Phase::Pose(0);
        self.paused = false;
        self.remaining = routine.first_hold_secs();
    }

    /// Begin playback from the first pose. A routine with no poses
    /// never starts; returns whether playback began.
    pub fn start(&mut self, routine: &Routine) -> bool {
        if routine.poses.is_empty() {
            return false;
        }
        self.playing = true;
        self.paused = false;
        self.phase = Phase::Pose(0);
        self.remaining = routine.first_hold_secs();
        debug!(routine = %routine.id, "playback started");
        true
    }

    /// Flip the paused flag. Only meaningful during playback; the
    /// countdown resumes from the exact value it paused at. Returns
    /// whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        true
    }

    /// Rewind to the first pose without leaving playback. Returns
    /// whether anything changed (idle state is already at the start).
    pub fn restart(&mut self, routine: &Routine) -> bool {
        if !self.playing {
            return false;
        }
        self.paused = false;
        self.phase = Phase::Pose(0);
        self.remaining = routine.first_hold_secs();
        true
    }

    /// Leave playback and return to the idle mirror. Returns whether
    /// playback was active.
    pub fn exit(&mut self, routine: &Routine) -> bool {
        let was_playing = self.playing;
        self.playing = false;
        self.sync_idle(routine);
        if was_playing {
            debug!(routine = %routine.id, "playback exited");
        }
        was_playing
    }

    /// Overwrite the live countdown with a freshly chosen transition
    /// value. Applies only mid-transition during playback; a pose
    /// hold in progress is never rewritten. Returns whether the
    /// countdown snapped.
    pub fn snap_transition(&mut self, transition_secs: u32) -> bool {
        if self.playing && self.phase.is_transition() {
            self.remaining = transition_secs;
            true
        } else {
            false
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Crossing a phase boundary consumes the tick: the second that
    /// would take `remaining` below 1 switches phase (or finishes)
    /// instead of decrementing.
    pub fn advance(&mut self, routine: &Routine, transition_secs: u32) -> StepEvent {
        if !self.playing || self.paused {
            return StepEvent::Suppressed;
        }

        if self.remaining > 1 {
            self.remaining -= 1;
            return StepEvent::CountedDown;
        }

        match self.phase {
            Phase::Pose(i) => {
                if i + 1 < routine.poses.len() {
                    self.phase = Phase::Transition(i);
                    self.remaining = transition_secs;
                    debug!(from = i, "transition started");
                    StepEvent::TransitionStarted(i)
                } else {
                    self.finish(routine)
                }
            }
            Phase::Transition(i) => {
                let next = i + 1;
                if next < routine.poses.len() {
                    self.phase = Phase::Pose(next);
                    self.remaining = routine.poses[next].hold_secs;
                    debug!(pose = next, "pose started");
                    StepEvent::PoseStarted(next)
                } else {
                    self.finish(routine)
                }
            }
        }
    }

    fn finish(&mut self, routine: &Routine) -> StepEvent {
        self.playing = false;
        self.sync_idle(routine);
        debug!(routine = %routine.id, "playback finished");
        StepEvent::Finished
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::Pose;

    fn three_pose_routine() -> Routine {
        Routine::new("r-1", "Test")
            .with_pose(Pose::new("p-1", "A", 30))
            .with_pose(Pose::new("p-2", "B", 40))
            .with_pose(Pose::new("p-3", "C", 30))
    }

    fn two_pose_routine() -> Routine {
        Routine::new("r-2", "Short")
            .with_pose(Pose::new("p-1", "A", 10))
            .with_pose(Pose::new("p-2", "B", 10))
    }

    /// Run a full playback to completion, collecting every event
    fn run_to_idle(seq: &mut Sequencer, routine: &Routine, transition: u32) -> Vec<StepEvent> {
        let mut events = Vec::new();
        let mut guard = 0;
        while seq.is_playing() {
            events.push(seq.advance(routine, transition));
            guard += 1;
            assert!(guard < 100_000, "playback never finished");
        }
        events
    }

    #[test]
    fn test_new_is_idle() {
        let seq = Sequencer::new();
        assert!(!seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.phase(), Phase::Pose(0));
        assert_eq!(seq.remaining_secs(), 0);
    }

    #[test]
    fn test_start_empty_routine_is_noop() {
        let mut seq = Sequencer::new();
        let empty = Routine::new("r-0", "Empty");

        assert!(!seq.start(&empty));
        assert!(!seq.is_playing());
        assert_eq!(seq.advance(&empty, 10), StepEvent::Suppressed);
    }

    #[test]
    fn test_start_sets_first_hold() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();

        assert!(seq.start(&routine));
        assert!(seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.phase(), Phase::Pose(0));
        assert_eq!(seq.remaining_secs(), 30);
    }

    #[test]
    fn test_full_run_tick_count_and_order() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.start(&routine);

        let events = run_to_idle(&mut seq, &routine, 10);

        // sum(30, 40, 30) + 2 * 10 transitions
        assert_eq!(events.len(), 120);
        assert_eq!(events.len() as u32, routine.total_secs(10));

        // Poses visited in order with exactly N-1 transitions between
        let boundaries: Vec<StepEvent> = events
            .iter()
            .copied()
            .filter(|e| !matches!(e, StepEvent::CountedDown))
            .collect();
        assert_eq!(
            boundaries,
            vec![
                StepEvent::TransitionStarted(0),
                StepEvent::PoseStarted(1),
                StepEvent::TransitionStarted(1),
                StepEvent::PoseStarted(2),
                StepEvent::Finished,
            ]
        );

        // Completion lands back on the idle mirror
        assert!(!seq.is_playing());
        assert_eq!(seq.phase(), Phase::Pose(0));
        assert_eq!(seq.remaining_secs(), 30);
    }

    #[test]
    fn test_countdown_values_through_first_boundary() {
        let mut seq = Sequencer::new();
        let routine = two_pose_routine();
        seq.start(&routine);

        // 10 → 1 over nine decrements
        for expected in (1..=9).rev() {
            assert_eq!(seq.advance(&routine, 4), StepEvent::CountedDown);
            assert_eq!(seq.remaining_secs(), expected);
        }

        // The tenth tick crosses into the transition
        assert_eq!(seq.advance(&routine, 4), StepEvent::TransitionStarted(0));
        assert_eq!(seq.phase(), Phase::Transition(0));
        assert_eq!(seq.remaining_secs(), 4);
    }

    #[test]
    fn test_single_pose_skips_transition() {
        let mut seq = Sequencer::new();
        let routine = Routine::new("r-3", "Solo").with_pose(Pose::new("p-1", "Only", 6));
        seq.start(&routine);

        let events = run_to_idle(&mut seq, &routine, 600);

        assert_eq!(events.len(), 6);
        assert!(events.iter().all(|e| !matches!(e, StepEvent::TransitionStarted(_))));
        assert_eq!(events.last(), Some(&StepEvent::Finished));
    }

    #[test]
    fn test_pause_suppresses_ticks() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.start(&routine);
        seq.advance(&routine, 10);

        let before = seq.clone();
        assert!(seq.toggle_pause());

        for _ in 0..50 {
            assert_eq!(seq.advance(&routine, 10), StepEvent::Suppressed);
        }
        assert_eq!(seq.phase(), before.phase());
        assert_eq!(seq.remaining_secs(), before.remaining_secs());
    }

    #[test]
    fn test_toggle_pause_twice_restores_state() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.start(&routine);
        seq.advance(&routine, 10);

        let before = seq.clone();
        seq.toggle_pause();
        seq.toggle_pause();
        assert_eq!(seq, before);
    }

    #[test]
    fn test_toggle_pause_idle_is_noop() {
        let mut seq = Sequencer::new();
        assert!(!seq.toggle_pause());
        assert!(!seq.is_paused());
    }

    #[test]
    fn test_restart_rewinds_without_leaving_playback() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.start(&routine);
        for _ in 0..35 {
            seq.advance(&routine, 10);
        }
        assert_eq!(seq.phase(), Phase::Transition(0));

        assert!(seq.restart(&routine));
        assert!(seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.phase(), Phase::Pose(0));
        assert_eq!(seq.remaining_secs(), 30);
    }

    #[test]
    fn test_restart_idle_is_noop() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.sync_idle(&routine);
        assert!(!seq.restart(&routine));
    }

    #[test]
    fn test_exit_restores_idle_mirror() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.start(&routine);
        for _ in 0..50 {
            seq.advance(&routine, 10);
        }
        seq.toggle_pause();

        assert!(seq.exit(&routine));
        assert!(!seq.is_playing());
        assert!(!seq.is_paused());
        assert_eq!(seq.phase(), Phase::Pose(0));
        assert_eq!(seq.remaining_secs(), 30);

        // A second exit reports no effect
        assert!(!seq.exit(&routine));
    }

    #[test]
    fn test_snap_transition_mid_transition() {
        let mut seq = Sequencer::new();
        let routine = two_pose_routine();
        seq.start(&routine);

        // Tick through the first hold into the transition
        for _ in 0..10 {
            seq.advance(&routine, 10);
        }
        assert_eq!(seq.phase(), Phase::Transition(0));
        assert_eq!(seq.remaining_secs(), 10);

        assert!(seq.snap_transition(15));
        assert_eq!(seq.remaining_secs(), 15);
    }

    #[test]
    fn test_snap_does_not_touch_pose_hold() {
        let mut seq = Sequencer::new();
        let routine = two_pose_routine();
        seq.start(&routine);
        seq.advance(&routine, 10);
        let remaining = seq.remaining_secs();

        assert!(!seq.snap_transition(99));
        assert_eq!(seq.remaining_secs(), remaining);
    }

    #[test]
    fn test_new_transition_value_applies_to_later_gaps() {
        let mut seq = Sequencer::new();
        let routine = three_pose_routine();
        seq.start(&routine);

        // First gap at 10s, second gap at 25s
        for _ in 0..30 {
            seq.advance(&routine, 10);
        }
        assert_eq!(seq.remaining_secs(), 10);
        for _ in 0..10 {
            seq.advance(&routine, 25);
        }
        assert_eq!(seq.phase(), Phase::Pose(1));
        for _ in 0..40 {
            seq.advance(&routine, 25);
        }
        assert_eq!(seq.phase(), Phase::Transition(1));
        assert_eq!(seq.remaining_secs(), 25);
    }

    #[test]
    fn test_sync_idle_follows_routine_change() {
        let mut seq = Sequencer::new();
        let a = three_pose_routine();
        let b = two_pose_routine();

        seq.sync_idle(&a);
        assert_eq!(seq.remaining_secs(), 30);

        seq.sync_idle(&b);
        assert_eq!(seq.remaining_secs(), 10);

        // While playing the idle sync is inert
        seq.start(&a);
        seq.advance(&a, 10);
        seq.sync_idle(&b);
        assert_eq!(seq.remaining_secs(), 29);
    }
}
