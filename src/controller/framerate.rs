// SPDX-License-Identifier: GPL-3.0-only

//! Frame-rate estimation
//!
//! A sampling estimator fed by periodic ticks rather than decoded-frame
//! events. Each tick bumps a counter; once at least a full window
//! (1000ms) has elapsed the rate is recomputed as
//! `round(count * 1000 / elapsed_ms)` and the window restarts. The
//! reported rate is forced to 0 whenever the estimator is deactivated,
//! which the controller does on pause and stop.
//!
//! Ticks take an explicit [`Instant`] so tests can drive simulated time.

use crate::constants::timing::FPS_WINDOW_MS;
use std::time::Instant;

/// Tick-driven frame-rate estimator
#[derive(Debug)]
pub struct FrameRateEstimator {
    active: bool,
    tick_count: u32,
    window_start: Option<Instant>,
    current: u32,
}

impl FrameRateEstimator {
    pub fn new() -> Self {
        Self {
            active: false,
            tick_count: 0,
            window_start: None,
            current: 0,
        }
    }

    /// Begin counting; opens a fresh window at `now`
    pub fn activate(&mut self, now: Instant) {
        self.active = true;
        self.tick_count = 0;
        self.window_start = Some(now);
    }

    /// Stop counting; the reported rate drops to 0 immediately
    pub fn deactivate(&mut self) {
        self.active = false;
        self.tick_count = 0;
        self.window_start = None;
        self.current = 0;
    }

    /// Register one sampling tick at `now`
    pub fn tick(&mut self, now: Instant) {
        if !self.active {
            return;
        }
        self.tick_count += 1;

        if let Some(start) = self.window_start {
            let elapsed_ms = now.duration_since(start).as_millis() as u64;
            if elapsed_ms >= FPS_WINDOW_MS {
                self.current =
                    ((self.tick_count as f64) * 1000.0 / (elapsed_ms as f64)).round() as u32;
                self.tick_count = 0;
                self.window_start = Some(now);
            }
        }
    }

    /// The displayed rate; 0 while deactivated
    pub fn current(&self) -> u32 {
        if self.active { self.current } else { 0 }
    }
}

impl Default for FrameRateEstimator {
    fn default() -> Self {
        Self::new()
    }
}
