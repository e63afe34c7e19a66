// SPDX-License-Identifier: GPL-3.0-only

//! Camera capability providers
//!
//! Everything the controller knows about cameras goes through the
//! [`CameraProvider`] trait: enumeration of devices and opening of streams.
//! Providers are injected at construction, so the controller never touches
//! a concrete backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │     CameraApp       │  ← owns at most one Session
//! └──────────┬──────────┘
//!            │ enumerate() / open()
//!            ▼
//! ┌─────────────────────┐
//! │ CameraProvider trait│
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴──────┐
//!      ▼            ▼
//! ┌─────────┐ ┌───────────┐
//! │  V4L2   │ │ Synthetic │  ← concrete providers
//! └────┬────┘ └─────┬─────┘
//!      └─────┬──────┘
//!            ▼
//! ┌─────────────────────┐
//! │    StreamHandle     │  ← pump thread + granted format
//! │  └─ VideoTrack(s)   │  ← enable/disable/stop, latest frame
//! └─────────────────────┘
//! ```
//!
//! A pump thread captures frames and publishes them to the stream's tracks.
//! Closing a stream joins the pump, and because the device handle lives on
//! the pump thread, returning from [`StreamHandle::close`] guarantees the
//! device has been released. Reopen paths rely on that instead of settle
//! delays.

pub mod convert;
pub mod pump;
pub mod synthetic;
pub mod types;
#[cfg(target_os = "linux")]
pub mod v4l2;

pub use pump::{CaptureLoop, LoopAction};
pub use types::{CameraDevice, CameraFrame, StreamConstraints, StreamFormat};

use crate::errors::CameraError;
use futures::channel::mpsc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Capacity of the optional live-frame tap channel
const TAP_CHANNEL_CAPACITY: usize = 10;

/// Source of camera devices and streams
pub trait CameraProvider: Send + Sync {
    /// Short provider name for logs and the device listing
    fn name(&self) -> &'static str;

    /// Enumerate the devices this provider can open
    fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError>;

    /// Open a stream satisfying `constraints` as closely as the device allows
    ///
    /// # Returns
    /// * `Ok(StreamHandle)` - stream with at least one live video track
    /// * `Err(CameraError::PermissionDenied)` - access to the device refused
    /// * `Err(CameraError::DeviceUnavailable)` - device missing, busy or failed
    fn open(&self, constraints: &StreamConstraints) -> Result<StreamHandle, CameraError>;
}

/// Provider used when none is chosen explicitly: V4L2 on Linux, the
/// synthetic pattern generator elsewhere.
pub fn platform_provider() -> Box<dyn CameraProvider> {
    #[cfg(target_os = "linux")]
    {
        Box::new(v4l2::V4l2Provider::new())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(synthetic::SyntheticProvider::new())
    }
}

// ===== Tracks =====

/// State shared between a track handle and the pump publishing into it
#[derive(Debug)]
struct TrackState {
    enabled: AtomicBool,
    stopped: AtomicBool,
    latest: Mutex<Option<Arc<CameraFrame>>>,
    delivered: AtomicU64,
    tap: Mutex<Option<mpsc::Sender<Arc<CameraFrame>>>>,
}

/// One video track of an open stream
///
/// Track handles are cheap clones of shared state. `disable` freezes frame
/// delivery (the latest frame stays available, which is what makes
/// screenshots during pause capture the frozen image); `stop` is terminal
/// and tells the pump to wind down.
#[derive(Debug, Clone)]
pub struct VideoTrack {
    state: Arc<TrackState>,
}

impl VideoTrack {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(TrackState {
                enabled: AtomicBool::new(true),
                stopped: AtomicBool::new(false),
                latest: Mutex::new(None),
                delivered: AtomicU64::new(0),
                tap: Mutex::new(None),
            }),
        }
    }

    /// Resume frame delivery on a disabled track
    pub fn enable(&self) {
        if !self.is_stopped() {
            self.state.enabled.store(true, Ordering::SeqCst);
        }
    }

    /// Freeze frame delivery; the latest frame remains readable
    pub fn disable(&self) {
        self.state.enabled.store(false, Ordering::SeqCst);
    }

    /// Terminally stop the track; the pump exits once it observes this
    pub fn stop(&self) {
        self.state.enabled.store(false, Ordering::SeqCst);
        self.state.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.state.stopped.load(Ordering::SeqCst)
    }

    /// Most recently delivered frame, if any
    pub fn latest_frame(&self) -> Option<Arc<CameraFrame>> {
        self.state.latest.lock().unwrap().clone()
    }

    /// Total frames delivered since the stream opened
    pub fn frames_delivered(&self) -> u64 {
        self.state.delivered.load(Ordering::SeqCst)
    }

    /// Attach a bounded live-frame tap, replacing any previous one.
    ///
    /// The pump sends every delivered frame with `try_send` and drops
    /// frames the consumer is too slow for.
    pub fn tap_frames(&self) -> mpsc::Receiver<Arc<CameraFrame>> {
        let (sender, receiver) = mpsc::channel(TAP_CHANNEL_CAPACITY);
        *self.state.tap.lock().unwrap() = Some(sender);
        receiver
    }

    /// Drop the live-frame tap
    pub fn detach_tap(&self) {
        *self.state.tap.lock().unwrap() = None;
    }

    /// Pump side: publish a frame to the track.
    ///
    /// Delivery is skipped while the track is disabled or stopped.
    pub(crate) fn publish(&self, frame: CameraFrame) {
        if !self.is_enabled() {
            return;
        }
        let frame = Arc::new(frame);
        if let Ok(mut guard) = self.state.latest.lock() {
            *guard = Some(Arc::clone(&frame));
        }
        self.state.delivered.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.state.tap.lock()
            && let Some(sender) = guard.as_mut()
        {
            // Dropped frames are fine, the tap is best-effort
            let _ = sender.try_send(frame);
        }
    }
}

// ===== Streams =====

/// An open camera stream: granted format, tracks, and the capture pump
pub struct StreamHandle {
    tracks: Vec<VideoTrack>,
    format: StreamFormat,
    pump: CaptureLoop,
}

impl StreamHandle {
    /// Assemble a stream from a started pump (provider side)
    pub(crate) fn new(tracks: Vec<VideoTrack>, format: StreamFormat, pump: CaptureLoop) -> Self {
        Self {
            tracks,
            format,
            pump,
        }
    }

    /// The tracks granted for this stream (always at least one)
    pub fn tracks(&self) -> &[VideoTrack] {
        &self.tracks
    }

    /// The first video track
    pub fn primary_track(&self) -> &VideoTrack {
        &self.tracks[0]
    }

    /// The format actually granted, which may differ from the request
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Stop every track, wind down the pump, and wait for the device to be
    /// released. Returning from this call is the release acknowledgement.
    pub fn close(mut self) {
        for track in &self.tracks {
            track.stop();
        }
        self.pump.stop();
        debug!(format = %self.format, "Stream closed");
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle")
            .field("tracks", &self.tracks.len())
            .field("format", &self.format)
            .field("running", &self.pump.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn frame(seq: u64) -> CameraFrame {
        CameraFrame {
            data: Arc::from(vec![0u8; 16].into_boxed_slice()),
            width: 2,
            height: 2,
            seq,
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_track_starts_enabled() {
        let track = VideoTrack::new();
        assert!(track.is_enabled());
        assert!(!track.is_stopped());
    }

    #[test]
    fn test_disabled_track_drops_frames() {
        let track = VideoTrack::new();
        track.publish(frame(1));
        assert_eq!(track.frames_delivered(), 1);

        track.disable();
        track.publish(frame(2));
        assert_eq!(track.frames_delivered(), 1);

        // The frozen frame is still readable
        assert_eq!(track.latest_frame().unwrap().seq, 1);
    }

    #[test]
    fn test_stopped_track_cannot_reenable() {
        let track = VideoTrack::new();
        track.stop();
        track.enable();
        assert!(!track.is_enabled());
        assert!(track.is_stopped());
    }

    #[test]
    fn test_tap_receives_published_frames() {
        let track = VideoTrack::new();
        let mut receiver = track.tap_frames();

        track.publish(frame(1));
        track.publish(frame(2));

        assert_eq!(receiver.try_next().unwrap().unwrap().seq, 1);
        assert_eq!(receiver.try_next().unwrap().unwrap().seq, 2);
    }
}
