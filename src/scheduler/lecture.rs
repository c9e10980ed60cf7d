//! Lecture placement.
//!
//! # Algorithm
//!
//! Each (division, subject) keeps a cursor `(day_start, slot_start)`,
//! starting at `(0, 1)`. For each lecture:
//! 1. Visit days from `day_start`, wrapping once through the week, skipping
//!    days where the faculty has no unit of capacity left.
//! 2. Within a day, scan slots `slot_start..=num_slots` for the first cell
//!    that is free, where the faculty is not busy, and whose preceding slot
//!    does not hold a session of the same faculty.
//! 3. Place, then advance the cursor: next day, and the slot after the one
//!    just used (wrapping to 1).
//!
//! The cursor spreads consecutive lectures across the week instead of
//! packing the earliest day. A full pass with no placement drops the
//! remaining lectures of that subject and records a shortfall.

use super::workspace::{Demand, Workspace};
use crate::error::GridError;
use crate::models::ShortfallKind;

/// Round-robin position for the next lecture of one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub day_start: usize,
    pub slot_start: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            day_start: 0,
            slot_start: 1,
        }
    }

    /// Moves past a placement at `slot`.
    pub fn advance(&mut self, slot: usize, days: usize, num_slots: usize) {
        self.day_start = (self.day_start + 1) % days;
        self.slot_start = (slot % num_slots) + 1;
    }
}

/// Places lectures for every division.
pub(crate) fn place_lectures(ws: &mut Workspace<'_>) -> Result<(), GridError> {
    for division in 0..ws.demands.len() {
        let demands = ws.demands[division].lectures.clone();
        for demand in demands.iter().filter(|d| d.count > 0) {
            place_subject(ws, division, demand)?;
        }
    }
    Ok(())
}

fn place_subject(ws: &mut Workspace<'_>, division: usize, demand: &Demand) -> Result<(), GridError> {
    let days = ws.day_count();
    let num_slots = ws.num_slots();
    let mut cursor = Cursor::new();
    let mut placed = 0;

    while placed < demand.count {
        let Some((day, slot)) = find_cell(ws, division, demand, cursor) else {
            ws.record_shortfall(ShortfallKind::Lecture, division, demand, placed);
            break;
        };
        ws.place_lecture(division, day, slot, &demand.subject, demand.faculty)?;
        placed += 1;
        cursor.advance(slot, days, num_slots);
    }
    Ok(())
}

fn find_cell(
    ws: &Workspace<'_>,
    division: usize,
    demand: &Demand,
    cursor: Cursor,
) -> Option<(usize, usize)> {
    let days = ws.day_count();
    let cap = ws.cap();

    for offset in 0..days {
        let day = (cursor.day_start + offset) % days;
        if !ws.ledger.has_capacity(demand.faculty, day, 1, cap) {
            continue;
        }
        let slot = (cursor.slot_start..=ws.num_slots())
            .find(|&s| ws.can_take_lecture(division, day, s, demand.faculty));
        if let Some(slot) = slot {
            return Some((day, slot));
        }
    }
    None
}
