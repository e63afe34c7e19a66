// SPDX-License-Identifier: GPL-3.0-only

//! Screenshot gallery
//!
//! The gallery is an append-only list of saved screenshots in capture
//! order. Entries are never reordered or removed while the application
//! runs, so index N always refers to the N-th screenshot taken.

use chrono::{DateTime, Local};
use std::path::PathBuf;

/// One saved screenshot
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    /// When the screenshot was taken
    pub taken_at: DateTime<Local>,
    /// Where the encoded PNG was written
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Encoded size on disk
    pub bytes: usize,
}

/// Ordered collection of captured screenshots
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a screenshot; entries stay in capture order
    pub fn push(&mut self, entry: GalleryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently captured entry
    pub fn latest(&self) -> Option<&GalleryEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, bytes: usize) -> GalleryEntry {
        GalleryEntry {
            taken_at: Local::now(),
            path: PathBuf::from(name),
            width: 1280,
            height: 720,
            bytes,
        }
    }

    #[test]
    fn test_gallery_starts_empty() {
        let gallery = Gallery::new();
        assert!(gallery.is_empty());
        assert!(gallery.latest().is_none());
    }

    #[test]
    fn test_entries_keep_capture_order() {
        let mut gallery = Gallery::new();
        gallery.push(entry("first.png", 100));
        gallery.push(entry("second.png", 200));
        gallery.push(entry("third.png", 300));

        assert_eq!(gallery.len(), 3);
        let names: Vec<_> = gallery
            .entries()
            .iter()
            .map(|e| e.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["first.png", "second.png", "third.png"]);
        assert_eq!(gallery.latest().unwrap().bytes, 300);
    }

    #[test]
    fn test_timestamps_do_not_decrease() {
        let mut gallery = Gallery::new();
        gallery.push(entry("a.png", 1));
        gallery.push(entry("b.png", 2));

        let entries = gallery.entries();
        assert!(entries[0].taken_at <= entries[1].taken_at);
    }
}
