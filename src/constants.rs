// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// A selectable capture resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPreset {
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
}

/// Resolutions offered by the resolution selector
pub const RESOLUTION_PRESETS: [ResolutionPreset; 3] = [
    ResolutionPreset {
        width: 640,
        height: 480,
        label: "VGA",
    },
    ResolutionPreset {
        width: 1280,
        height: 720,
        label: "HD",
    },
    ResolutionPreset {
        width: 1920,
        height: 1080,
        label: "Full HD",
    },
];

/// Resolution tier label for a given width
pub fn get_resolution_label(width: u32) -> Option<&'static str> {
    match width {
        w if w >= 3840 => Some("4K"),
        w if w >= 2560 => Some("2K"),
        w if w >= 1920 => Some("Full HD"),
        w if w >= 1280 => Some("HD"),
        w if w >= 640 => Some("VGA"),
        _ => None,
    }
}

/// Default capture parameters
pub mod defaults {
    /// Default capture width
    pub const WIDTH: u32 = 1280;

    /// Default capture height
    pub const HEIGHT: u32 = 720;

    /// Default requested framerate
    pub const FRAMERATE: u32 = 30;
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Cadence at which the frame-rate estimator is ticked
    pub const FPS_TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Minimum measurement window before the estimate updates
    pub const FPS_WINDOW_MS: u64 = 1000;

    /// Camera warm-up period before the first capture is trusted
    pub const CAPTURE_WARMUP: Duration = Duration::from_millis(500);

    /// Poll interval while waiting for a frame
    pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Give up waiting for a first frame after this long
    pub const FIRST_FRAME_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Capture output constants
pub mod capture {
    /// JPEG quality for recorded clip frames (1-100)
    pub const CLIP_JPEG_QUALITY: u8 = 85;

    /// Filename prefix for saved screenshots
    pub const SCREENSHOT_PREFIX: &str = "screenshot";

    /// Filename prefix for saved recordings
    pub const RECORDING_PREFIX: &str = "recording";

    /// Timestamp format used in artifact filenames
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_labels() {
        assert_eq!(get_resolution_label(3840), Some("4K"));
        assert_eq!(get_resolution_label(1920), Some("Full HD"));
        assert_eq!(get_resolution_label(1280), Some("HD"));
        assert_eq!(get_resolution_label(640), Some("VGA"));
        assert_eq!(get_resolution_label(320), None);
    }

    #[test]
    fn test_presets_ascend_by_area() {
        for pair in RESOLUTION_PRESETS.windows(2) {
            assert!(pair[0].width * pair[0].height < pair[1].width * pair[1].height);
        }
    }
}
