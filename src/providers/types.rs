// SPDX-License-Identifier: GPL-3.0-only

//! Shared camera types used across providers and the controller

use crate::constants::defaults;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// A camera device available for capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Stable identifier (device path on Linux, provider-assigned elsewhere)
    pub id: String,
    /// Human-readable device name
    pub name: String,
}

/// Requested stream parameters
///
/// Width, height and framerate are ideals: the provider grants the closest
/// format the device supports and reports the actual one in [`StreamFormat`].
/// `device_id` is exact when set; otherwise the provider picks its default
/// device. Audio capture is never requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
    pub device_id: Option<String>,
    pub audio: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            framerate: defaults::FRAMERATE,
            device_id: None,
            audio: false,
        }
    }
}

/// The format actually granted for an open stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {}fps", self.width, self.height, self.framerate)
    }
}

/// A single captured frame, tightly packed RGBA
#[derive(Debug, Clone)]
pub struct CameraFrame {
    /// RGBA pixel data, `width * height * 4` bytes
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
    /// Monotonic sequence number assigned by the capture pump
    pub seq: u64,
    /// When the frame was captured
    pub captured_at: Instant,
}
