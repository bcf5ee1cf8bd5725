// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing and clock module.
//!
//! This module provides the wall-clock tick source that drives the
//! playback countdown.

pub mod clock;

pub use clock::{ClockState, TickClock, TICK_PERIOD};
