// SPDX-License-Identifier: GPL-3.0-only

//! Clip recording
//!
//! A [`ClipRecorder`] attaches to one video track, emits byte chunks while
//! it runs, and hands back the finalized clip on stop. The shipped
//! implementation encodes every new frame as a JPEG chunk; the finalized
//! clip is therefore a raw MJPEG stream, and its bytes are exactly the
//! accumulated chunks laid end to end.

use crate::capture::recording::Recording;
use crate::constants::capture::CLIP_JPEG_QUALITY;
use crate::constants::timing::FRAME_POLL_INTERVAL;
use crate::errors::CaptureError;
use crate::providers::pump::{CaptureLoop, LoopAction};
use crate::providers::{CameraFrame, VideoTrack};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A finalized recording
#[derive(Debug, Clone)]
pub struct RecordedClip {
    /// Concatenation of every emitted chunk, in order
    pub data: Vec<u8>,
    /// Number of non-empty chunks that went into `data`
    pub chunk_count: usize,
    /// Wall time between start and stop
    pub duration: Duration,
    /// File extension matching the clip container
    pub extension: &'static str,
}

/// Chunked recorder over one video track
pub trait ClipRecorder: Send {
    /// Begin recording from `track`
    ///
    /// # Returns
    /// * `Err(CaptureError::AlreadyRecording)` - a recording is in progress
    /// * `Err(CaptureError::NoActiveStream)` - the track is already stopped
    fn start(&mut self, track: &VideoTrack) -> Result<(), CaptureError>;

    /// Stop recording and finalize the accumulated chunks
    ///
    /// # Returns
    /// * `Err(CaptureError::NoActiveStream)` - no recording was started
    fn stop(&mut self) -> Result<RecordedClip, CaptureError>;

    /// Whether a recording is in progress
    fn is_active(&self) -> bool;
}

/// Recorder producing one JPEG chunk per captured frame
pub struct MotionJpegRecorder {
    worker: Option<CaptureLoop>,
    recording: Option<Arc<Mutex<Recording>>>,
    quality: u8,
}

impl MotionJpegRecorder {
    pub fn new() -> Self {
        Self::with_quality(CLIP_JPEG_QUALITY)
    }

    /// Recorder with a specific JPEG quality (1-100)
    pub fn with_quality(quality: u8) -> Self {
        Self {
            worker: None,
            recording: None,
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for MotionJpegRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipRecorder for MotionJpegRecorder {
    fn start(&mut self, track: &VideoTrack) -> Result<(), CaptureError> {
        if self.is_active() {
            return Err(CaptureError::AlreadyRecording);
        }
        if track.is_stopped() {
            return Err(CaptureError::NoActiveStream);
        }

        let recording = Arc::new(Mutex::new(Recording::new()));
        let sink = Arc::clone(&recording);
        let source = track.clone();
        let quality = self.quality;
        let mut last_seq: Option<u64> = None;

        info!("Recording started");

        let worker = CaptureLoop::spawn("clip-recorder", move || {
            if source.is_stopped() {
                return LoopAction::Stop;
            }
            if let Some(frame) = source.latest_frame()
                && last_seq != Some(frame.seq)
            {
                last_seq = Some(frame.seq);
                match encode_jpeg_chunk(&frame, quality) {
                    Ok(chunk) => sink.lock().unwrap().push_chunk(chunk),
                    Err(e) => debug!(error = %e, "Skipping unencodable frame"),
                }
            }
            thread::sleep(FRAME_POLL_INTERVAL);
            LoopAction::Continue
        });

        self.worker = Some(worker);
        self.recording = Some(recording);
        Ok(())
    }

    fn stop(&mut self) -> Result<RecordedClip, CaptureError> {
        let mut worker = self.worker.take().ok_or(CaptureError::NoActiveStream)?;
        let shared = self.recording.take().ok_or(CaptureError::NoActiveStream)?;

        // Join first so no chunk arrives after finalization
        worker.stop();

        let recording = match Arc::try_unwrap(shared) {
            Ok(mutex) => mutex.into_inner().unwrap(),
            Err(_) => {
                warn!("Recording still referenced after worker join");
                return Err(CaptureError::EncodingFailed(
                    "recording buffer still in use".to_string(),
                ));
            }
        };

        let chunk_count = recording.chunk_count();
        let duration = recording.elapsed();
        let data = recording.finalize();

        info!(
            chunks = chunk_count,
            bytes = data.len(),
            seconds = duration.as_secs_f32(),
            "Recording finalized"
        );

        Ok(RecordedClip {
            data,
            chunk_count,
            duration,
            extension: "mjpeg",
        })
    }

    fn is_active(&self) -> bool {
        self.worker.is_some()
    }
}

/// Encode one RGBA frame as a standalone JPEG
fn encode_jpeg_chunk(frame: &CameraFrame, quality: u8) -> Result<Vec<u8>, CaptureError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::NoFrameAvailable);
    }

    // JPEG carries no alpha channel
    let rgb: Vec<u8> = frame
        .data
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut chunk = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut chunk, quality)
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;
    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn rgba_frame(seq: u64) -> CameraFrame {
        CameraFrame {
            data: Arc::from(vec![200u8; 4 * 4 * 4].into_boxed_slice()),
            width: 4,
            height: 4,
            seq,
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_stop_without_start() {
        let mut recorder = MotionJpegRecorder::new();
        assert_eq!(recorder.stop().err(), Some(CaptureError::NoActiveStream));
    }

    #[test]
    fn test_double_start_rejected() {
        let track = VideoTrack::new();
        let mut recorder = MotionJpegRecorder::new();
        recorder.start(&track).unwrap();
        assert_eq!(
            recorder.start(&track).err(),
            Some(CaptureError::AlreadyRecording)
        );
        recorder.stop().unwrap();
    }

    #[test]
    fn test_stopped_track_rejected() {
        let track = VideoTrack::new();
        track.stop();
        let mut recorder = MotionJpegRecorder::new();
        assert_eq!(
            recorder.start(&track).err(),
            Some(CaptureError::NoActiveStream)
        );
    }

    #[test]
    fn test_chunks_accumulate_per_frame() {
        let track = VideoTrack::new();
        let mut recorder = MotionJpegRecorder::new();
        recorder.start(&track).unwrap();
        assert!(recorder.is_active());

        for seq in 0..5 {
            track.publish(rgba_frame(seq));
            thread::sleep(Duration::from_millis(25));
        }

        let clip = recorder.stop().unwrap();
        assert!(!recorder.is_active());
        assert!(clip.chunk_count >= 1, "at least one frame encoded");
        assert!(!clip.data.is_empty());
        // JPEG start-of-image marker opens the stream
        assert_eq!(&clip.data[..2], &[0xFF, 0xD8]);
        assert_eq!(clip.extension, "mjpeg");
    }

    #[test]
    fn test_encode_rejects_zero_sized_frame() {
        let frame = CameraFrame {
            data: Arc::from(Vec::new().into_boxed_slice()),
            width: 0,
            height: 0,
            seq: 0,
            captured_at: Instant::now(),
        };
        assert_eq!(
            encode_jpeg_chunk(&frame, 85).err(),
            Some(CaptureError::NoFrameAvailable)
        );
    }
}
