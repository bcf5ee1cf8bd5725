// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for keyboard input.
//!
//! This module provides:
//! - The action vocabulary the run loop understands
//! - Keyboard shortcut handling with help-display metadata

pub mod keyboard;

pub use keyboard::{format_shortcut, KeyBinding, KeyboardController, Shortcut};

use crate::routine::ADJUST_STEP;

/// Action that can be triggered by controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// No action
    None,

    // Transport
    /// Start the selected routine
    Start,
    /// Pause or resume the countdown
    TogglePause,
    /// Rewind the running routine to its first pose
    Restart,
    /// Leave playback and return to the browser
    ExitPlayback,

    // Selection
    /// Select the next routine
    NextRoutine,
    /// Select the previous routine
    PrevRoutine,
    /// Highlight the next pose in the browser
    NextPose,
    /// Highlight the previous pose in the browser
    PrevPose,

    // Durations
    /// Adjust the highlighted pose's hold by a signed delta
    AdjustPoseDuration(i64),
    /// Adjust the shared transition duration by a signed delta
    AdjustTransition(i64),

    // UI
    /// Toggle help display
    ToggleHelp,
    /// Quit application
    Quit,
}

impl ControlAction {
    /// Check if this is a transport action
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ControlAction::Start
                | ControlAction::TogglePause
                | ControlAction::Restart
                | ControlAction::ExitPlayback
        )
    }

    /// Check if this adjusts a duration
    pub fn is_duration(&self) -> bool {
        matches!(
            self,
            ControlAction::AdjustPoseDuration(_) | ControlAction::AdjustTransition(_)
        )
    }

    /// Check if this moves a selection
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            ControlAction::NextRoutine
                | ControlAction::PrevRoutine
                | ControlAction::NextPose
                | ControlAction::PrevPose
        )
    }

    /// The standard increase-by-one-step pose adjustment
    pub fn pose_step_up() -> Self {
        ControlAction::AdjustPoseDuration(ADJUST_STEP)
    }

    /// The standard decrease-by-one-step pose adjustment
    pub fn pose_step_down() -> Self {
        ControlAction::AdjustPoseDuration(-ADJUST_STEP)
    }

    /// The standard increase-by-one-step transition adjustment
    pub fn transition_step_up() -> Self {
        ControlAction::AdjustTransition(ADJUST_STEP)
    }

    /// The standard decrease-by-one-step transition adjustment
    pub fn transition_step_down() -> Self {
        ControlAction::AdjustTransition(-ADJUST_STEP)
    }
}
