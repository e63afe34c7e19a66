// SPDX-License-Identifier: GPL-3.0-only

//! Chunk accumulation for an in-progress recording

use std::time::{Duration, Instant};

/// Byte chunks collected while a recording runs
///
/// Chunks arrive in delivery order and empty ones are discarded.
/// Finalizing concatenates them unchanged, so the finalized clip is
/// byte-for-byte the chunks laid end to end.
#[derive(Debug)]
pub struct Recording {
    chunks: Vec<Vec<u8>>,
    started_at: Instant,
}

impl Recording {
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            started_at: Instant::now(),
        }
    }

    /// Append a chunk; empty chunks are dropped
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Sum of all accumulated chunk lengths
    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }

    /// Time since the recording started
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Concatenate every chunk, in order, into the final clip bytes
    pub fn finalize(self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.total_bytes());
        for chunk in self.chunks {
            data.extend_from_slice(&chunk);
        }
        data
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_is_concatenation() {
        let mut recording = Recording::new();
        recording.push_chunk(vec![1, 2, 3]);
        recording.push_chunk(vec![4, 5]);
        recording.push_chunk(vec![6]);

        let expected_len = recording.total_bytes();
        assert_eq!(recording.chunk_count(), 3);

        let data = recording.finalize();
        assert_eq!(data.len(), expected_len);
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_chunks_discarded() {
        let mut recording = Recording::new();
        recording.push_chunk(Vec::new());
        recording.push_chunk(vec![7]);
        recording.push_chunk(Vec::new());

        assert_eq!(recording.chunk_count(), 1);
        assert_eq!(recording.finalize(), vec![7]);
    }

    #[test]
    fn test_finalize_without_chunks() {
        let recording = Recording::new();
        assert_eq!(recording.total_bytes(), 0);
        assert!(recording.finalize().is_empty());
    }
}
