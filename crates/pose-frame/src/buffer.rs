//! Bounded capture buffer for live streams

use std::collections::VecDeque;

use tracing::debug;

use crate::frame::Frame;

/// Default capture capacity (350 frames, ~35s at 10 fps)
pub const DEFAULT_CAPTURE_CAPACITY: usize = 350;

/// Append-only frame history that drops the oldest frame when full
#[derive(Debug, Clone)]
pub struct CaptureBuffer {
    /// Stored frames, oldest first
    frames: VecDeque<Frame>,
    /// Maximum number of frames kept
    capacity: usize,
    /// Total frames pushed (for statistics)
    total_pushed: usize,
}

impl CaptureBuffer {
    /// Create a new buffer with given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
            total_pushed: 0,
        }
    }

    /// Push a frame (evicts the oldest if full)
    pub fn push(&mut self, frame: Frame) {
        if self.frames.len() >= self.capacity {
            self.frames.pop_front();
            debug!("Capture buffer full, evicted oldest frame");
        }
        self.frames.push_back(frame);
        self.total_pushed += 1;
    }

    /// Number of frames currently held
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy out held frames, oldest first
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.iter().copied().collect()
    }

    /// Most recent frame
    pub fn latest(&self) -> Option<&Frame> {
        self.frames.back()
    }

    /// Total frames pushed since creation
    pub fn total_pushed(&self) -> usize {
        self.total_pushed
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_CAPACITY)
    }
}
