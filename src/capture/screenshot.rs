// SPDX-License-Identifier: GPL-3.0-only

//! Still capture
//!
//! Screenshots are encoded as PNG (lossless) from the most recent RGBA
//! frame. A frame with a zero dimension carries no image and is rejected
//! before any encoding work happens.

use crate::errors::CaptureError;
use crate::providers::CameraFrame;
use image::RgbaImage;
use tracing::debug;

/// An encoded screenshot ready for saving
#[derive(Debug, Clone)]
pub struct EncodedShot {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Encode one frame as a PNG screenshot
///
/// # Returns
/// * `Err(CaptureError::NoFrameAvailable)` - the frame has a zero dimension
/// * `Err(CaptureError::EncodingFailed)` - the pixel data could not be encoded
pub fn encode_png(frame: &CameraFrame) -> Result<EncodedShot, CaptureError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::NoFrameAvailable);
    }

    let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.to_vec()).ok_or_else(
        || CaptureError::EncodingFailed("frame buffer does not match dimensions".to_string()),
    )?;

    let mut buffer = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| CaptureError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    debug!(
        width = frame.width,
        height = frame.height,
        size = buffer.len(),
        "Screenshot encoded"
    );

    Ok(EncodedShot {
        data: buffer,
        width: frame.width,
        height: frame.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn frame(width: u32, height: u32, data: Vec<u8>) -> CameraFrame {
        CameraFrame {
            data: Arc::from(data.into_boxed_slice()),
            width,
            height,
            seq: 0,
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_zero_sized_frame_rejected() {
        let empty = frame(0, 0, Vec::new());
        assert_eq!(
            encode_png(&empty).err(),
            Some(CaptureError::NoFrameAvailable)
        );
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let short = frame(4, 4, vec![0u8; 8]);
        assert!(matches!(
            encode_png(&short),
            Err(CaptureError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let pixels: Vec<u8> = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 128, 64, 32, 255,
        ];
        let shot = encode_png(&frame(2, 2, pixels.clone())).unwrap();
        assert_eq!(shot.width, 2);
        assert_eq!(shot.height, 2);

        let decoded =
            image::load_from_memory_with_format(&shot.data, image::ImageFormat::Png).unwrap();
        assert_eq!(decoded.to_rgba8().into_raw(), pixels);
    }
}
