// SPDX-License-Identifier: GPL-3.0-only

//! Pixel format conversion for captured frames
//!
//! Webcams commonly deliver YUYV (YUV 4:2:2) or MJPG. The pump converts
//! everything to tightly packed RGBA at the edge so the rest of the crate
//! only ever sees one layout.

use crate::errors::CaptureError;

/// Convert YUYV (YUV 4:2:2) to RGBA
///
/// YUYV format: Y0 U0 Y1 V0 - each 4-byte group encodes 2 pixels.
/// Uses BT.601 coefficients for YUV to RGB conversion.
pub fn yuyv_to_rgba(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixel_count = (width * height) as usize;
    let mut rgba = Vec::with_capacity(pixel_count * 4);

    for chunk in data.chunks_exact(4) {
        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32 - 128.0;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32 - 128.0;

        for y in [y0, y1] {
            let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
            let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
            let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

            rgba.push(r);
            rgba.push(g);
            rgba.push(b);
            rgba.push(255);

            if rgba.len() >= pixel_count * 4 {
                break;
            }
        }
    }

    rgba
}

/// Decode one MJPG frame to RGBA
///
/// MJPG streams are a sequence of standalone JPEG images; the buffer
/// handed over by the driver holds exactly one of them.
pub fn mjpg_to_rgba(data: &[u8]) -> Result<(Vec<u8>, u32, u32), CaptureError> {
    let image = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuyv_white() {
        // Pure white in YUV (Y=255, U=128, V=128)
        let yuyv = vec![255u8, 128, 255, 128];
        let rgba = yuyv_to_rgba(&yuyv, 2, 1);

        assert_eq!(rgba.len(), 8);
        assert!(rgba[0] > 250); // R
        assert!(rgba[1] > 250); // G
        assert!(rgba[2] > 250); // B
        assert_eq!(rgba[3], 255); // A
    }

    #[test]
    fn test_yuyv_black() {
        let yuyv = vec![0u8, 128, 0, 128];
        let rgba = yuyv_to_rgba(&yuyv, 2, 1);

        assert_eq!(rgba.len(), 8);
        assert!(rgba[0] < 5);
        assert!(rgba[1] < 5);
        assert!(rgba[2] < 5);
    }

    #[test]
    fn test_mjpg_roundtrip() {
        // Encode a solid mid-gray 8x8 JPEG, then decode it back
        let pixels = image::RgbImage::from_pixel(8, 8, image::Rgb([128, 128, 128]));
        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut jpeg)
            .encode_image(&pixels)
            .unwrap();

        let (rgba, width, height) = mjpg_to_rgba(&jpeg).unwrap();
        assert_eq!((width, height), (8, 8));
        assert_eq!(rgba.len(), 8 * 8 * 4);
        // JPEG is lossy, allow a little drift
        assert!(rgba[0].abs_diff(128) < 8);
    }

    #[test]
    fn test_mjpg_garbage_rejected() {
        assert!(mjpg_to_rgba(&[0u8; 32]).is_err());
    }
}
