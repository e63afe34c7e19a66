// SPDX-License-Identifier: GPL-3.0-only

//! Application controller
//!
//! [`CameraApp`] owns the camera session, the clip recorder and everything
//! derived from them. Collaborators are injected at construction, so the
//! controller is backend-agnostic and fully testable without hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          CameraApp           │
//! │  state ── control table      │
//! │  session ── open stream      │
//! │  gallery ── screenshots      │
//! │  estimator ── frame rate     │
//! │  status ── (message, glyph)  │
//! └───────┬──────────────┬───────┘
//!         │              │
//!         ▼              ▼
//! ┌───────────────┐ ┌─────────────┐
//! │CameraProvider │ │ ClipRecorder│  ← injected
//! └───────────────┘ └─────────────┘
//! ```
//!
//! Exactly one session is open at a time. Every path that replaces the
//! session closes the old one first, and [`StreamHandle::close`] does not
//! return until the device is released, so swaps need no settle delays.

pub mod framerate;
pub mod lifecycle;
pub mod status;

pub use framerate::FrameRateEstimator;
pub use lifecycle::{ControlSet, RunState};
pub use status::{StatusGlyph, StatusLine};

use crate::capture::{ClipRecorder, Gallery, GalleryEntry, screenshot};
use crate::config::Config;
use crate::constants::capture::{RECORDING_PREFIX, SCREENSHOT_PREFIX};
use crate::constants::get_resolution_label;
use crate::errors::{AppResult, CaptureError};
use crate::providers::{CameraDevice, CameraProvider, StreamConstraints, StreamFormat, StreamHandle};
use crate::storage::{self, OutputPaths};
use chrono::Local;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// One open camera stream and the selection it was opened for
struct Session {
    device_id: Option<String>,
    label: String,
    stream: StreamHandle,
    opened_at: Instant,
}

/// Result of a record toggle
#[derive(Debug)]
pub enum RecordToggle {
    /// Recording began
    Started,
    /// Recording stopped and the clip was written
    Saved(SavedClip),
}

/// A finalized clip written to disk
#[derive(Debug, Clone)]
pub struct SavedClip {
    pub path: PathBuf,
    pub bytes: usize,
    pub chunks: usize,
    pub duration: Duration,
}

/// The application controller
pub struct CameraApp {
    provider: Box<dyn CameraProvider>,
    recorder: Box<dyn ClipRecorder>,
    config: Config,
    outputs: OutputPaths,
    devices: Vec<CameraDevice>,
    selected: Option<usize>,
    session: Option<Session>,
    state: RunState,
    gallery: Gallery,
    fps: FrameRateEstimator,
    status: StatusLine,
}

impl CameraApp {
    /// Create a controller with injected collaborators
    pub fn new(
        provider: Box<dyn CameraProvider>,
        recorder: Box<dyn ClipRecorder>,
        config: Config,
        outputs: OutputPaths,
    ) -> Self {
        info!(provider = %provider.name(), "Creating camera controller");

        Self {
            provider,
            recorder,
            config,
            outputs,
            devices: Vec::new(),
            selected: None,
            session: None,
            state: RunState::Stopped,
            gallery: Gallery::new(),
            fps: FrameRateEstimator::new(),
            status: StatusLine::new(),
        }
    }

    // ===== Devices =====

    /// Enumerate devices once and pick an initial selection.
    ///
    /// The remembered device from the config wins if it is still present,
    /// otherwise the first device is selected. The list is not kept in sync
    /// with hot-plug events afterwards.
    pub fn refresh_devices(&mut self) -> AppResult<()> {
        match self.provider.enumerate() {
            Ok(devices) => {
                info!(count = devices.len(), "Enumerated camera devices");
                self.devices = devices;
                let remembered = self.config.last_device_id.as_deref();
                self.selected = remembered
                    .and_then(|id| self.devices.iter().position(|d| d.id == id))
                    .or_else(|| (!self.devices.is_empty()).then_some(0));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Device enumeration failed");
                self.status
                    .set(StatusGlyph::Error, format!("Enumeration failed: {}", e));
                self.devices.clear();
                self.selected = None;
                Err(e.into())
            }
        }
    }

    /// Select the device at `index` in the enumerated list.
    ///
    /// While a session is open this closes it (exactly once) and reopens
    /// with the new device.
    pub fn select_device(&mut self, index: usize) -> AppResult<()> {
        let Some(device) = self.devices.get(index) else {
            warn!(index, "No such device");
            self.status.set(StatusGlyph::Error, "Unknown device");
            return Err(crate::errors::CameraError::DeviceUnavailable(format!(
                "no device at index {}",
                index
            ))
            .into());
        };

        info!(device = %device.name, "Device selected");
        let name = device.name.clone();
        self.config.last_device_id = Some(device.id.clone());
        self.selected = Some(index);

        match self.state {
            RunState::Stopped => {
                self.status
                    .set(StatusGlyph::Idle, format!("Selected: {}", name));
                Ok(())
            }
            _ => self.reopen_session(),
        }
    }

    // ===== Lifecycle =====

    /// Open a session with the current device and resolution
    pub fn start(&mut self) -> AppResult<()> {
        if !lifecycle::controls(self.state).start {
            warn!(state = %self.state, "Ignoring start command");
            return Ok(());
        }
        self.open_session()
    }

    /// Freeze the live tracks without releasing the device
    pub fn pause(&mut self) -> AppResult<()> {
        if !lifecycle::controls(self.state).pause {
            warn!(state = %self.state, "Ignoring pause command");
            return Ok(());
        }
        if let Some(session) = self.session.as_ref() {
            for track in session.stream.tracks() {
                track.disable();
            }
        }
        self.state = RunState::Paused;
        self.fps.deactivate();
        self.status.set(StatusGlyph::Paused, "Camera paused");
        info!("Camera paused");
        Ok(())
    }

    /// Re-enable the tracks of a paused session
    pub fn resume(&mut self) -> AppResult<()> {
        if !lifecycle::controls(self.state).resume {
            warn!(state = %self.state, "Ignoring resume command");
            return Ok(());
        }
        if let Some(session) = self.session.as_ref() {
            for track in session.stream.tracks() {
                track.enable();
            }
        }
        self.state = RunState::Running;
        self.fps.activate(Instant::now());
        self.status.set(StatusGlyph::Live, "Camera running");
        info!("Camera resumed");
        Ok(())
    }

    /// Close the session, finalizing any in-flight recording first
    pub fn stop(&mut self) -> AppResult<()> {
        if !lifecycle::controls(self.state).stop {
            warn!(state = %self.state, "Ignoring stop command");
            return Ok(());
        }
        if self.recorder.is_active() {
            match self.finish_recording() {
                Ok(saved) => info!(path = %saved.path.display(), "Recording finalized on stop"),
                Err(e) => warn!(error = %e, "Recording could not be finalized"),
            }
        }
        self.close_session();
        self.state = RunState::Stopped;
        self.fps.deactivate();
        self.status.set(StatusGlyph::Idle, "Camera stopped");
        info!("Camera stopped");
        Ok(())
    }

    /// Close everything; used on application exit
    pub fn shutdown(&mut self) {
        if self.recorder.is_active() {
            match self.finish_recording() {
                Ok(saved) => info!(path = %saved.path.display(), "Recording finalized on shutdown"),
                Err(e) => warn!(error = %e, "Recording could not be finalized"),
            }
        }
        self.close_session();
        self.state = RunState::Stopped;
        self.fps.deactivate();
        info!("Controller shut down");
    }

    // ===== Capture =====

    /// Capture the latest frame as a PNG and append it to the gallery.
    ///
    /// The gallery is untouched on every error path.
    pub fn take_screenshot(&mut self) -> AppResult<PathBuf> {
        if !lifecycle::controls(self.state).screenshot {
            warn!(state = %self.state, "Ignoring screenshot command");
            self.status.set(StatusGlyph::Error, "No camera frame available");
            return Err(CaptureError::NoFrameAvailable.into());
        }

        let frame = self
            .session
            .as_ref()
            .and_then(|session| session.stream.primary_track().latest_frame());
        let Some(frame) = frame else {
            warn!("Screenshot requested before any frame arrived");
            self.status.set(StatusGlyph::Error, "No camera frame available");
            return Err(CaptureError::NoFrameAvailable.into());
        };

        let shot = match screenshot::encode_png(&frame) {
            Ok(shot) => shot,
            Err(e) => {
                error!(error = %e, "Screenshot failed");
                self.status
                    .set(StatusGlyph::Error, format!("Screenshot failed: {}", e));
                return Err(e.into());
            }
        };

        let filename = storage::timestamped_filename(SCREENSHOT_PREFIX, "png");
        let path = match storage::write_artifact(&self.outputs.screenshots, &filename, &shot.data)
        {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "Screenshot could not be saved");
                self.status
                    .set(StatusGlyph::Error, format!("Screenshot failed: {}", e));
                return Err(CaptureError::from(e).into());
            }
        };

        self.gallery.push(GalleryEntry {
            taken_at: Local::now(),
            path: path.clone(),
            width: shot.width,
            height: shot.height,
            bytes: shot.data.len(),
        });
        info!(path = %path.display(), count = self.gallery.len(), "Screenshot saved");
        self.status.set(self.state_glyph(), "Screenshot saved");
        Ok(path)
    }

    /// Start recording, or stop and save the clip if one is in flight
    pub fn toggle_recording(&mut self) -> AppResult<RecordToggle> {
        if !lifecycle::controls(self.state).record {
            warn!(state = %self.state, "Ignoring record command");
            self.status.set(StatusGlyph::Error, "No active stream to record");
            return Err(CaptureError::NoActiveStream.into());
        }

        if self.recorder.is_active() {
            let saved = match self.finish_recording() {
                Ok(saved) => saved,
                Err(e) => {
                    error!(error = %e, "Recording failed");
                    self.status
                        .set(StatusGlyph::Error, format!("Recording failed: {}", e));
                    return Err(e);
                }
            };
            self.status.set(self.state_glyph(), "Recording saved");
            return Ok(RecordToggle::Saved(saved));
        }

        let Some(session) = self.session.as_ref() else {
            self.status.set(StatusGlyph::Error, "No active stream to record");
            return Err(CaptureError::NoActiveStream.into());
        };
        if let Err(e) = self.recorder.start(session.stream.primary_track()) {
            error!(error = %e, "Recording could not start");
            self.status
                .set(StatusGlyph::Error, format!("Recording failed: {}", e));
            return Err(e.into());
        }
        self.status.set(StatusGlyph::Recording, "Recording");
        Ok(RecordToggle::Started)
    }

    /// Stop the recorder and write the finalized clip to disk
    fn finish_recording(&mut self) -> AppResult<SavedClip> {
        let clip = self.recorder.stop()?;
        let filename = storage::timestamped_filename(RECORDING_PREFIX, clip.extension);
        let path = storage::write_artifact(&self.outputs.clips, &filename, &clip.data)
            .map_err(CaptureError::from)?;

        info!(
            path = %path.display(),
            chunks = clip.chunk_count,
            bytes = clip.data.len(),
            "Recording saved"
        );
        Ok(SavedClip {
            path,
            bytes: clip.data.len(),
            chunks: clip.chunk_count,
            duration: clip.duration,
        })
    }

    // ===== Selection =====

    /// Change the requested resolution.
    ///
    /// While stopped only the stored constraints (and the displayed label)
    /// change; no session is opened. While live the session is reopened
    /// with the new constraints.
    pub fn set_resolution(&mut self, width: u32, height: u32) -> AppResult<()> {
        self.config.capture_width = width;
        self.config.capture_height = height;
        info!(width, height, "Resolution changed");

        match self.state {
            RunState::Stopped => {
                self.status.set(
                    StatusGlyph::Idle,
                    format!("Resolution set to {}", self.resolution_label()),
                );
                Ok(())
            }
            _ => self.reopen_session(),
        }
    }

    // ===== Sampling =====

    /// Advance the frame-rate estimator; called on a fixed interval
    pub fn tick(&mut self, now: Instant) {
        self.fps.tick(now);
    }

    // ===== Session internals =====

    fn open_session(&mut self) -> AppResult<()> {
        let constraints = StreamConstraints {
            width: self.config.capture_width,
            height: self.config.capture_height,
            framerate: self.config.framerate,
            device_id: self.selected_device().map(|d| d.id.clone()),
            audio: false,
        };
        let label = self
            .selected_device()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "default camera".to_string());

        match self.provider.open(&constraints) {
            Ok(stream) => {
                let format = stream.format();
                self.session = Some(Session {
                    device_id: constraints.device_id,
                    label: label.clone(),
                    stream,
                    opened_at: Instant::now(),
                });
                self.state = RunState::Running;
                self.fps.activate(Instant::now());
                self.status
                    .set(StatusGlyph::Live, format!("Live: {} ({})", label, format));
                info!(device = %label, format = %format, "Camera session opened");
                Ok(())
            }
            Err(e) => {
                self.state = RunState::Stopped;
                self.fps.deactivate();
                error!(error = %e, "Failed to open camera");
                self.status
                    .set(StatusGlyph::Error, format!("Camera error: {}", e));
                Err(e.into())
            }
        }
    }

    /// Close the current session and open a new one with the current
    /// selection. An in-flight recording is finalized first, and the old
    /// device is fully released before the new open begins.
    fn reopen_session(&mut self) -> AppResult<()> {
        if self.recorder.is_active() {
            match self.finish_recording() {
                Ok(saved) => {
                    info!(path = %saved.path.display(), "Recording finalized before session swap")
                }
                Err(e) => warn!(error = %e, "Recording lost during session swap"),
            }
        }
        self.close_session();
        self.open_session()
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!(device = %session.label, "Closing camera session");
            session.stream.close();
        }
    }

    fn state_glyph(&self) -> StatusGlyph {
        if self.recorder.is_active() {
            return StatusGlyph::Recording;
        }
        match self.state {
            RunState::Stopped => StatusGlyph::Idle,
            RunState::Running => StatusGlyph::Live,
            RunState::Paused => StatusGlyph::Paused,
        }
    }

    // ===== Projection =====

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The control row for the current state
    pub fn controls(&self) -> ControlSet {
        lifecycle::controls(self.state)
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn devices(&self) -> &[CameraDevice] {
        &self.devices
    }

    pub fn selected_device(&self) -> Option<&CameraDevice> {
        self.selected.and_then(|index| self.devices.get(index))
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Displayed rate from the sampling estimator; 0 unless running
    pub fn current_fps(&self) -> u32 {
        self.fps.current()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_active()
    }

    /// The format granted for the open session, if any
    pub fn session_format(&self) -> Option<StreamFormat> {
        self.session.as_ref().map(|s| s.stream.format())
    }

    /// The device identifier the open session was requested with
    pub fn session_device_id(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.device_id.as_deref())
    }

    /// How long the current session has been open
    pub fn session_uptime(&self) -> Option<Duration> {
        self.session.as_ref().map(|s| s.opened_at.elapsed())
    }

    /// Whether the session has delivered at least one frame
    pub fn has_live_frame(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.stream.primary_track().latest_frame().is_some())
    }

    /// The requested resolution with its common name when known
    pub fn resolution_label(&self) -> String {
        let width = self.config.capture_width;
        let height = self.config.capture_height;
        match get_resolution_label(width) {
            Some(name) => format!("{}x{} ({})", width, height, name),
            None => format!("{}x{}", width, height),
        }
    }
}

impl std::fmt::Debug for CameraApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraApp")
            .field("state", &self.state)
            .field("devices", &self.devices.len())
            .field("session", &self.session.as_ref().map(|s| &s.label))
            .field("recording", &self.recorder.is_active())
            .field("screenshots", &self.gallery.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MotionJpegRecorder;
    use crate::errors::AppError;
    use crate::providers::synthetic::SyntheticProvider;
    use crate::providers::{CameraFrame, CaptureLoop, LoopAction, VideoTrack};
    use std::sync::Arc;
    use std::thread;

    fn test_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("viewfinder-controller-{}-{}", tag, std::process::id()))
    }

    fn test_app(provider: impl CameraProvider + 'static, tag: &str) -> CameraApp {
        let root = test_root(tag);
        let outputs = OutputPaths {
            screenshots: root.join("shots"),
            clips: root.join("clips"),
        };
        CameraApp::new(
            Box::new(provider),
            Box::new(MotionJpegRecorder::new()),
            Config::default(),
            outputs,
        )
    }

    fn wait_for_frame(app: &CameraApp) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !app.has_live_frame() {
            assert!(Instant::now() < deadline, "no frame arrived in time");
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Provider whose only delivered frame has a zero dimension
    struct ZeroFrameProvider;

    impl CameraProvider for ZeroFrameProvider {
        fn name(&self) -> &'static str {
            "zero"
        }

        fn enumerate(&self) -> Result<Vec<CameraDevice>, crate::errors::CameraError> {
            Ok(vec![CameraDevice {
                id: "zero-0".to_string(),
                name: "Zero".to_string(),
            }])
        }

        fn open(
            &self,
            _constraints: &StreamConstraints,
        ) -> Result<StreamHandle, crate::errors::CameraError> {
            let track = VideoTrack::new();
            track.publish(CameraFrame {
                data: Arc::from(Vec::new().into_boxed_slice()),
                width: 0,
                height: 0,
                seq: 0,
                captured_at: Instant::now(),
            });
            let pump = CaptureLoop::spawn("zero-pump", || LoopAction::Stop);
            Ok(StreamHandle::new(
                vec![track],
                StreamFormat {
                    width: 0,
                    height: 0,
                    framerate: 0,
                },
                pump,
            ))
        }
    }

    #[test]
    fn test_control_rows_follow_state_through_sequences() {
        let mut app = test_app(SyntheticProvider::new(), "table");
        assert_eq!(app.state(), RunState::Stopped);
        assert_eq!(app.controls(), lifecycle::controls(RunState::Stopped));

        // Commands outside the table are no-ops
        app.pause().unwrap();
        app.resume().unwrap();
        app.stop().unwrap();
        assert_eq!(app.state(), RunState::Stopped);

        app.start().unwrap();
        assert_eq!(app.state(), RunState::Running);
        assert_eq!(app.controls(), lifecycle::controls(RunState::Running));

        app.start().unwrap();
        assert_eq!(app.state(), RunState::Running);

        app.pause().unwrap();
        assert_eq!(app.state(), RunState::Paused);
        assert_eq!(app.controls(), lifecycle::controls(RunState::Paused));

        app.pause().unwrap();
        assert_eq!(app.state(), RunState::Paused);

        app.resume().unwrap();
        assert_eq!(app.state(), RunState::Running);

        app.stop().unwrap();
        assert_eq!(app.state(), RunState::Stopped);
        assert_eq!(app.controls(), lifecycle::controls(RunState::Stopped));
    }

    #[test]
    fn test_screenshot_while_stopped_keeps_gallery_empty() {
        let mut app = test_app(SyntheticProvider::new(), "shot-stopped");
        let err = app.take_screenshot().unwrap_err();
        assert!(matches!(
            err,
            AppError::Capture(CaptureError::NoFrameAvailable)
        ));
        assert!(app.gallery().is_empty());
        assert_eq!(app.status().glyph, StatusGlyph::Error);
    }

    #[test]
    fn test_zero_sized_frame_screenshot_leaves_gallery_unchanged() {
        let mut app = test_app(ZeroFrameProvider, "shot-zero");
        app.start().unwrap();

        let err = app.take_screenshot().unwrap_err();
        assert!(matches!(
            err,
            AppError::Capture(CaptureError::NoFrameAvailable)
        ));
        assert!(app.gallery().is_empty());
        app.stop().unwrap();
    }

    #[test]
    fn test_screenshot_appends_gallery_entry() {
        let mut app = test_app(SyntheticProvider::new(), "shot-ok");
        app.start().unwrap();
        wait_for_frame(&app);

        let path = app.take_screenshot().unwrap();
        assert!(path.exists());
        assert_eq!(app.gallery().len(), 1);
        let entry = app.gallery().latest().unwrap();
        assert_eq!(entry.path, path);
        assert!(entry.bytes > 0);

        app.stop().unwrap();
        let _ = std::fs::remove_dir_all(test_root("shot-ok"));
    }

    #[test]
    fn test_record_toggle_saves_clip() {
        let mut app = test_app(SyntheticProvider::new(), "record");
        app.start().unwrap();
        wait_for_frame(&app);

        assert!(matches!(
            app.toggle_recording().unwrap(),
            RecordToggle::Started
        ));
        assert!(app.is_recording());
        thread::sleep(Duration::from_millis(300));

        let RecordToggle::Saved(saved) = app.toggle_recording().unwrap() else {
            panic!("second toggle must finalize");
        };
        assert!(!app.is_recording());
        assert!(saved.chunks >= 1);
        assert_eq!(std::fs::metadata(&saved.path).unwrap().len(), saved.bytes as u64);

        app.stop().unwrap();
        let _ = std::fs::remove_dir_all(test_root("record"));
    }

    #[test]
    fn test_record_rejected_while_stopped() {
        let mut app = test_app(SyntheticProvider::new(), "record-stopped");
        let err = app.toggle_recording().unwrap_err();
        assert!(matches!(
            err,
            AppError::Capture(CaptureError::NoActiveStream)
        ));
    }

    #[test]
    fn test_device_change_closes_prior_session_exactly_once() {
        let provider = SyntheticProvider::with_device_count(2);
        let counters = provider.counters();
        let mut app = test_app(provider, "swap");
        app.refresh_devices().unwrap();
        assert_eq!(app.devices().len(), 2);

        app.start().unwrap();
        assert_eq!(counters.opens(), 1);
        assert_eq!(counters.closes(), 0);

        app.select_device(1).unwrap();
        assert_eq!(app.state(), RunState::Running);
        assert_eq!(counters.opens(), 2);
        assert_eq!(counters.closes(), 1);
        assert_eq!(app.selected_device().unwrap().id, "synthetic-1");

        app.stop().unwrap();
        assert_eq!(counters.closes(), 2);
    }

    #[test]
    fn test_resolution_change_while_stopped_keeps_camera_closed() {
        let provider = SyntheticProvider::new();
        let counters = provider.counters();
        let mut app = test_app(provider, "res");

        app.set_resolution(1920, 1080).unwrap();
        assert_eq!(app.state(), RunState::Stopped);
        assert_eq!(app.resolution_label(), "1920x1080 (Full HD)");
        assert_eq!(counters.opens(), 0);
    }

    #[test]
    fn test_resolution_change_while_running_reopens() {
        let provider = SyntheticProvider::new();
        let counters = provider.counters();
        let mut app = test_app(provider, "res-live");
        app.start().unwrap();

        app.set_resolution(640, 480).unwrap();
        assert_eq!(app.state(), RunState::Running);
        assert_eq!(counters.opens(), 2);
        assert_eq!(counters.closes(), 1);
        assert_eq!(app.session_format().unwrap().width, 640);

        app.stop().unwrap();
    }

    #[test]
    fn test_fps_drops_to_zero_on_pause() {
        let mut app = test_app(SyntheticProvider::new(), "fps");
        app.start().unwrap();

        let t0 = Instant::now();
        for k in 1..=10u64 {
            app.tick(t0 + Duration::from_millis(k * 100));
        }
        assert_eq!(app.current_fps(), 10);

        app.pause().unwrap();
        assert_eq!(app.current_fps(), 0);

        app.stop().unwrap();
        assert_eq!(app.current_fps(), 0);
    }

    #[test]
    fn test_failed_open_stays_stopped() {
        let provider = SyntheticProvider::failing(crate::errors::CameraError::PermissionDenied);
        let mut app = test_app(provider, "denied");

        let err = app.start().unwrap_err();
        assert!(matches!(
            err,
            AppError::Camera(crate::errors::CameraError::PermissionDenied)
        ));
        assert_eq!(app.state(), RunState::Stopped);
        assert_eq!(app.status().glyph, StatusGlyph::Error);
    }
}
