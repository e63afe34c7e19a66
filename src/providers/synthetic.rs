// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera provider
//!
//! Generates a moving gradient test pattern without touching any hardware.
//! Serves two purposes: a usable fallback on machines without a camera
//! (`--synthetic`), and the provider every controller test runs against.
//! Open and close counts are observable so tests can assert that reopen
//! paths release exactly one stream.

use crate::errors::CameraError;
use crate::providers::pump::{CaptureLoop, LoopAction};
use crate::providers::types::{CameraDevice, CameraFrame, StreamConstraints, StreamFormat};
use crate::providers::{CameraProvider, StreamHandle, VideoTrack};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Shared open/close counters for a [`SyntheticProvider`]
///
/// A close is counted when the pump thread exits, which is the moment a
/// real provider would have released the device.
#[derive(Debug, Clone, Default)]
pub struct StreamCounters {
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl StreamCounters {
    /// Streams opened so far
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Streams fully released so far
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Fires the close counter when the pump thread drops it
struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hardware-free camera provider producing a moving test pattern
pub struct SyntheticProvider {
    devices: Vec<CameraDevice>,
    fail_open: Option<CameraError>,
    counters: StreamCounters,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::with_device_count(1)
    }

    /// Provider advertising `count` pattern devices
    pub fn with_device_count(count: usize) -> Self {
        let devices = (0..count)
            .map(|i| CameraDevice {
                id: format!("synthetic-{}", i),
                name: format!("Synthetic Pattern {}", i),
            })
            .collect();
        Self {
            devices,
            fail_open: None,
            counters: StreamCounters::default(),
        }
    }

    /// Provider whose `open` always fails with `error`
    pub fn failing(error: CameraError) -> Self {
        Self {
            fail_open: Some(error),
            ..Self::new()
        }
    }

    /// Handle to the open/close counters, valid after the provider moves
    pub fn counters(&self) -> StreamCounters {
        self.counters.clone()
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError> {
        Ok(self.devices.clone())
    }

    fn open(&self, constraints: &StreamConstraints) -> Result<StreamHandle, CameraError> {
        if let Some(error) = &self.fail_open {
            return Err(error.clone());
        }
        if let Some(id) = &constraints.device_id
            && !self.devices.iter().any(|d| &d.id == id)
        {
            return Err(CameraError::DeviceUnavailable(format!(
                "unknown device {}",
                id
            )));
        }

        let format = StreamFormat {
            width: constraints.width,
            height: constraints.height,
            framerate: constraints.framerate.max(1),
        };
        let interval = Duration::from_millis(1000 / format.framerate as u64);

        let track = VideoTrack::new();
        let publisher = track.clone();
        let closes = Arc::clone(&self.counters.closes);
        let mut seq = 0u64;

        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        info!(format = %format, "Opening synthetic stream");

        // The guard is the loop state: it drops when the pump thread exits,
        // which is when a hardware provider would have released the device.
        let pump = CaptureLoop::spawn_with_setup(
            "synthetic-pump",
            move || Ok(ReleaseGuard(closes)),
            move |_guard| {
                if publisher.is_stopped() {
                    return LoopAction::Stop;
                }
                publisher.publish(pattern_frame(format.width, format.height, seq));
                seq += 1;
                thread::sleep(interval);
                LoopAction::Continue
            },
        );

        Ok(StreamHandle::new(vec![track], format, pump))
    }
}

/// One frame of the moving gradient pattern
fn pattern_frame(width: u32, height: u32, seq: u64) -> CameraFrame {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    let shift = (seq % 256) as u32;

    for y in 0..height {
        for x in 0..width {
            let r = ((x * 256 / width.max(1) + shift) % 256) as u8;
            let g = (y * 256 / height.max(1)) as u8;
            let b = (255 - shift) as u8;
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }

    CameraFrame {
        data: Arc::from(data.into_boxed_slice()),
        width,
        height,
        seq,
        captured_at: Instant::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_frame(track: &VideoTrack) -> Arc<CameraFrame> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(frame) = track.latest_frame() {
                return frame;
            }
            assert!(Instant::now() < deadline, "no frame within deadline");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_enumerate_lists_devices() {
        let provider = SyntheticProvider::with_device_count(2);
        let devices = provider.enumerate().unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "synthetic-0");
    }

    #[test]
    fn test_open_grants_requested_format() {
        let provider = SyntheticProvider::new();
        let stream = provider
            .open(&StreamConstraints {
                width: 320,
                height: 240,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(stream.format().width, 320);
        assert_eq!(stream.format().height, 240);
        assert_eq!(stream.tracks().len(), 1);

        let frame = wait_for_frame(stream.primary_track());
        assert_eq!(frame.width, 320);
        assert_eq!(frame.data.len(), 320 * 240 * 4);
        stream.close();
    }

    #[test]
    fn test_unknown_device_rejected() {
        let provider = SyntheticProvider::new();
        let result = provider.open(&StreamConstraints {
            device_id: Some("missing".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(CameraError::DeviceUnavailable(_))));
    }

    #[test]
    fn test_injected_failure() {
        let provider = SyntheticProvider::failing(CameraError::PermissionDenied);
        let result = provider.open(&StreamConstraints::default());
        assert_eq!(result.err(), Some(CameraError::PermissionDenied));
    }

    #[test]
    fn test_close_counted_once_per_stream() {
        let provider = SyntheticProvider::new();
        let counters = provider.counters();

        let stream = provider.open(&StreamConstraints::default()).unwrap();
        assert_eq!(counters.opens(), 1);
        assert_eq!(counters.closes(), 0);

        stream.close();
        assert_eq!(counters.closes(), 1);

        let second = provider.open(&StreamConstraints::default()).unwrap();
        second.close();
        assert_eq!(counters.opens(), 2);
        assert_eq!(counters.closes(), 2);
    }
}
