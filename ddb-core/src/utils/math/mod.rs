//! Math utilities for the differential drive bot.
//!
//! This module turns calibrated step and quarter-turn timings into blocking
//! durations.

pub mod timing;
