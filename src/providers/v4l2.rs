// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera provider (Linux)
//!
//! Scans `/dev/video*` for capture-capable nodes, negotiates MJPG or YUYV
//! at the requested size, and pumps frames off an mmap stream. The device
//! handle lives on the pump thread, so joining the pump is the guarantee
//! that the kernel device has been released.

use crate::errors::CameraError;
use crate::providers::convert;
use crate::providers::pump::{CaptureLoop, LoopAction};
use crate::providers::types::{CameraDevice, CameraFrame, StreamConstraints, StreamFormat};
use crate::providers::{CameraProvider, StreamHandle, VideoTrack};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::capability::Flags;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::video::capture::Parameters;
use v4l::{Device, Format, FourCC};

/// Pixel formats we can convert, in preference order
const PREFERRED_FOURCCS: [&[u8; 4]; 2] = [b"MJPG", b"YUYV"];

/// Buffer count for the mmap capture stream
const STREAM_BUFFERS: u32 = 4;

/// Camera provider backed by Video4Linux2
pub struct V4l2Provider;

impl V4l2Provider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for V4l2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraProvider for V4l2Provider {
    fn name(&self) -> &'static str {
        "v4l2"
    }

    fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError> {
        let entries = std::fs::read_dir("/dev")
            .map_err(|e| CameraError::EnumerationFailed(format!("cannot scan /dev: {}", e)))?;

        let mut nodes: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().starts_with("video"))
                    .unwrap_or(false)
            })
            .collect();
        nodes.sort();

        let mut devices = Vec::new();
        for path in nodes {
            match probe_capture_node(&path) {
                Some(device) => devices.push(device),
                None => debug!(path = %path.display(), "Skipping non-capture video node"),
            }
        }

        Ok(devices)
    }

    fn open(&self, constraints: &StreamConstraints) -> Result<StreamHandle, CameraError> {
        let path = match &constraints.device_id {
            Some(id) => PathBuf::from(id),
            None => {
                let devices = self.enumerate()?;
                let first = devices.into_iter().next().ok_or_else(|| {
                    CameraError::DeviceUnavailable("no capture devices found".to_string())
                })?;
                PathBuf::from(first.id)
            }
        };

        let device = Device::with_path(&path).map_err(|e| map_device_error(&path, e))?;
        let (format, framerate) = negotiate_format(&device, constraints)
            .map_err(|e| map_device_error(&path, e))?;

        let granted = StreamFormat {
            width: format.width,
            height: format.height,
            framerate,
        };
        if granted.width != constraints.width || granted.height != constraints.height {
            warn!(
                requested = format!("{}x{}", constraints.width, constraints.height),
                granted = %granted,
                "Camera granted a different format than requested"
            );
        }
        info!(path = %path.display(), format = %granted, fourcc = %format.fourcc, "Opening V4L2 stream");

        let track = VideoTrack::new();
        let publisher = track.clone();
        let fourcc = format.fourcc;
        let (width, height) = (granted.width, granted.height);
        let node = path.display().to_string();
        let mut seq = 0u64;

        // Device and stream are owned by the pump thread; when the loop is
        // joined they have been dropped and the kernel device is free again.
        let pump = CaptureLoop::spawn_with_setup(
            "v4l2-pump",
            move || {
                MmapStream::with_buffers(&device, Type::VideoCapture, STREAM_BUFFERS)
                    .map_err(|e| format!("mmap stream on {}: {}", node, e))
            },
            move |stream| {
                if publisher.is_stopped() {
                    return LoopAction::Stop;
                }
                let (buf, meta) = match stream.next() {
                    Ok(capture) => capture,
                    Err(e) => {
                        warn!(error = %e, "V4L2 capture failed, stopping pump");
                        return LoopAction::Stop;
                    }
                };
                let used = (meta.bytesused as usize).min(buf.len());
                match decode_frame(&buf[..used], fourcc, width, height, seq) {
                    Ok(frame) => {
                        publisher.publish(frame);
                        seq += 1;
                    }
                    // Corrupt frames happen right after stream start
                    Err(e) => debug!(error = %e, "Dropping undecodable frame"),
                }
                LoopAction::Continue
            },
        );

        Ok(StreamHandle::new(vec![track], granted, pump))
    }
}

/// Open a node and keep it only if it can actually capture video
fn probe_capture_node(path: &Path) -> Option<CameraDevice> {
    let device = Device::with_path(path).ok()?;
    let caps = device.query_caps().ok()?;
    if !caps.capabilities.contains(Flags::VIDEO_CAPTURE) {
        return None;
    }
    // Metadata nodes advertise capture but expose no image formats
    if device.enum_formats().map(|f| f.is_empty()).unwrap_or(true) {
        return None;
    }
    Some(CameraDevice {
        id: path.to_string_lossy().to_string(),
        name: caps.card,
    })
}

/// Apply the closest supported format and frame interval
fn negotiate_format(
    device: &Device,
    constraints: &StreamConstraints,
) -> io::Result<(Format, u32)> {
    let mut chosen: Option<Format> = None;
    for fourcc in PREFERRED_FOURCCS {
        let wanted = Format::new(constraints.width, constraints.height, FourCC::new(fourcc));
        let actual = device.set_format(&wanted)?;
        if actual.fourcc == wanted.fourcc {
            chosen = Some(actual);
            break;
        }
    }
    let format = chosen.ok_or_else(|| {
        io::Error::other("device supports neither MJPG nor YUYV")
    })?;

    let params = device.set_params(&Parameters::with_fps(constraints.framerate))?;
    let framerate = if params.interval.numerator > 0 {
        params.interval.denominator / params.interval.numerator
    } else {
        constraints.framerate
    };

    Ok((format, framerate))
}

/// Convert one driver buffer to an RGBA frame
fn decode_frame(
    data: &[u8],
    fourcc: FourCC,
    width: u32,
    height: u32,
    seq: u64,
) -> Result<CameraFrame, String> {
    let (rgba, width, height) = if fourcc == FourCC::new(b"MJPG") {
        convert::mjpg_to_rgba(data).map_err(|e| e.to_string())?
    } else {
        (convert::yuyv_to_rgba(data, width, height), width, height)
    };

    Ok(CameraFrame {
        data: Arc::from(rgba.into_boxed_slice()),
        width,
        height,
        seq,
        captured_at: Instant::now(),
    })
}

fn map_device_error(path: &Path, error: io::Error) -> CameraError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        CameraError::PermissionDenied
    } else {
        CameraError::DeviceUnavailable(format!("{}: {}", path.display(), error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Runs on machines without cameras: the scan itself must not fail
    #[test]
    fn test_enumerate_succeeds_without_hardware() {
        let provider = V4l2Provider::new();
        assert!(provider.enumerate().is_ok());
    }
}
