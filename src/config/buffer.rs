//! Scoped read buffer for configuration files.
//!
//! A [`ScratchBuffer`] borrows a caller-owned `Vec<u8>` for the duration of a
//! single load. Dropping the guard clears the bytes, so the file contents
//! never outlive the decode regardless of how the load returns. The backing
//! allocation stays with its owner and is reused by the next load.
//!
//! Every acquisition and release is counted in [`BufferStats`].

use std::cell::Cell;
use std::io::{self, Read};
use std::ops::Deref;

/// Counters for scratch buffer acquisitions and releases.
#[derive(Debug, Default)]
pub struct BufferStats {
    acquired: Cell<u64>,
    released: Cell<u64>,
}

impl BufferStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a buffer was acquired.
    pub fn acquired(&self) -> u64 {
        self.acquired.get()
    }

    /// Number of times a buffer was released.
    pub fn released(&self) -> u64 {
        self.released.get()
    }

    /// Buffers currently held.
    pub fn outstanding(&self) -> u64 {
        self.acquired() - self.released()
    }
}

/// Scoped handle on a reusable byte buffer.
///
/// Released exactly once, when the guard is dropped.
#[derive(Debug)]
pub struct ScratchBuffer<'a> {
    bytes: &'a mut Vec<u8>,
    stats: &'a BufferStats,
}

impl<'a> ScratchBuffer<'a> {
    /// Acquires `bytes` for one load. Any previous contents are discarded.
    pub fn acquire(bytes: &'a mut Vec<u8>, stats: &'a BufferStats) -> Self {
        bytes.clear();
        stats.acquired.set(stats.acquired.get() + 1);
        Self { bytes, stats }
    }

    /// Reads at most `limit` bytes from `reader`, appending to the buffer.
    ///
    /// Returns the number of bytes read.
    pub fn fill_from<R: Read>(&mut self, reader: R, limit: u64) -> io::Result<usize> {
        reader.take(limit).read_to_end(self.bytes)
    }
}

impl Deref for ScratchBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.bytes.clear();
        self.stats.released.set(self.stats.released.get() + 1);
    }
}
