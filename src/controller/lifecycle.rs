// SPDX-License-Identifier: GPL-3.0-only

//! Session lifecycle
//!
//! The controller walks a three-state machine:
//!
//! ```text
//! Stopped ──start──> Running ──pause──> Paused
//!    ^                  │  ^──resume──────┘
//!    └──────stop────────┴──────stop───────┘
//! ```
//!
//! One table keyed by state decides which commands are accepted and,
//! equivalently, which controls a frontend should enable. Every command
//! outside the table is a no-op, so no control combination beyond the
//! three rows is reachable.

use std::fmt;

/// Lifecycle state of the camera session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No session open
    Stopped,
    /// Session open, tracks enabled, frames flowing
    Running,
    /// Session open, tracks disabled, device still held
    Paused,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Stopped => write!(f, "stopped"),
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
        }
    }
}

/// Which commands are accepted in a given state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSet {
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    pub stop: bool,
    pub screenshot: bool,
    pub record: bool,
}

/// The control table, one row per state
pub const fn controls(state: RunState) -> ControlSet {
    match state {
        RunState::Stopped => ControlSet {
            start: true,
            pause: false,
            resume: false,
            stop: false,
            screenshot: false,
            record: false,
        },
        RunState::Running => ControlSet {
            start: false,
            pause: true,
            resume: false,
            stop: true,
            screenshot: true,
            record: true,
        },
        RunState::Paused => ControlSet {
            start: false,
            pause: false,
            resume: true,
            stop: true,
            screenshot: true,
            record: true,
        },
    }
}
