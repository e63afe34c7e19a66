// SPDX-License-Identifier: GPL-3.0-only

//! Status projection
//!
//! One (message, glyph) pair mirroring the latest controller transition.
//! Purely presentational; no history is retained.

use std::fmt;

/// Glyph shown next to the status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGlyph {
    Idle,
    Live,
    Paused,
    Recording,
    Error,
}

impl StatusGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusGlyph::Idle => "○",
            StatusGlyph::Live => "●",
            StatusGlyph::Paused => "⏸",
            StatusGlyph::Recording => "⏺",
            StatusGlyph::Error => "✗",
        }
    }
}

/// The current user-visible status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub glyph: StatusGlyph,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            message: "Ready".to_string(),
            glyph: StatusGlyph::Idle,
        }
    }

    /// Replace the projected pair
    pub fn set(&mut self, glyph: StatusGlyph, message: impl Into<String>) {
        self.glyph = glyph;
        self.message = message.into();
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph.symbol(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_is_idle() {
        let status = StatusLine::new();
        assert_eq!(status.glyph, StatusGlyph::Idle);
        assert_eq!(status.message, "Ready");
    }

    #[test]
    fn test_set_replaces_both_fields() {
        let mut status = StatusLine::new();
        status.set(StatusGlyph::Live, "Camera running");
        assert_eq!(status.glyph, StatusGlyph::Live);
        assert_eq!(status.to_string(), "● Camera running");
    }
}
