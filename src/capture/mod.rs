// SPDX-License-Identifier: GPL-3.0-only

//! Capture pipeline
//!
//! Turns video-track frames into artifacts on disk:
//!
//! ```text
//! VideoTrack ──> screenshot::encode_png ──> Gallery (ordered entries)
//!      │
//!      └──> ClipRecorder ──> Recording chunks ──> finalize() = one clip
//! ```
//!
//! Screenshots are lossless PNG stills. Clips are MJPEG streams built by
//! concatenating per-frame JPEG chunks, so the finalized clip length is
//! exactly the sum of the chunk lengths.

pub mod gallery;
pub mod recorder;
pub mod recording;
pub mod screenshot;

pub use gallery::{Gallery, GalleryEntry};
pub use recorder::{ClipRecorder, MotionJpegRecorder, RecordedClip};
pub use recording::Recording;
pub use screenshot::{EncodedShot, encode_png};
