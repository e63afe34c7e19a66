// SPDX-License-Identifier: GPL-3.0-only

//! Storage of captured artifacts
//!
//! Screenshots land under the user's pictures directory and clips under
//! the videos directory, both in a `Viewfinder` subfolder. Filenames carry
//! a capture timestamp. The directories are injectable so callers (and
//! tests) can redirect output elsewhere.

use crate::constants::capture::TIMESTAMP_FORMAT;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default folder name for saved screenshots and clips
const DEFAULT_SAVE_FOLDER: &str = "Viewfinder";

/// Where captured artifacts are written
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub screenshots: PathBuf,
    pub clips: PathBuf,
}

impl OutputPaths {
    /// The user's pictures and videos directories
    pub fn system_default() -> Self {
        Self {
            screenshots: default_screenshot_dir(),
            clips: default_clip_dir(),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::system_default()
    }
}

/// Default directory for screenshots
fn default_screenshot_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DEFAULT_SAVE_FOLDER)
}

/// Default directory for recorded clips
fn default_clip_dir() -> PathBuf {
    dirs::video_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DEFAULT_SAVE_FOLDER)
}

/// Generate a capture filename like `screenshot_20250824_153012.png`
pub fn timestamped_filename(prefix: &str, extension: &str) -> String {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
    format!("{}_{}.{}", prefix, timestamp, extension)
}

/// Write `bytes` to `dir/filename`, creating the directory if needed
pub fn write_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    debug!(path = %path.display(), size = bytes.len(), "Artifact written");
    Ok(path)
}
