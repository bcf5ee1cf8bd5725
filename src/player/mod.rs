// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback core for routine countdown sequencing.
//!
//! This module provides:
//! - The phase state machine advancing one second per tick
//! - The command/query surface consumed by the presentation layer

pub mod controller;
pub mod sequencer;

pub use controller::PlaybackController;
pub use sequencer::{Phase, Sequencer, StepEvent};
