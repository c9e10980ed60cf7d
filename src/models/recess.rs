//! Recess ranges.
//!
//! A recess is a fixed non-teaching break written into every division
//! and day before any placement runs. Ranges are inclusive on both ends
//! and use 1-based slot indices.

use serde::{Deserialize, Serialize};

/// An inclusive slot interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecessRange {
    /// First recess slot (inclusive).
    pub start: i32,
    /// Last recess slot (inclusive).
    pub end: i32,
}

impl RecessRange {
    /// Creates a new range.
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Single-slot recess.
    pub fn single(slot: i32) -> Self {
        Self::new(slot, slot)
    }

    /// Clips to `[1, num_slots]`.
    ///
    /// Returns `None` when nothing remains after clipping.
    pub fn clip(&self, num_slots: usize) -> Option<(usize, usize)> {
        let start = self.start.max(1) as i64;
        let end = (self.end as i64).min(num_slots as i64);
        if start > end {
            return None;
        }
        Some((start as usize, end as usize))
    }
}
