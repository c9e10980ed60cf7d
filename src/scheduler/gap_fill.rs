//! Gap filling.
//!
//! Final sweep over every (division, day, slot) in order. Each free cell
//! gets a lecture from the first fill candidate of its division whose
//! faculty has capacity, is not busy in that slot, and did not teach the
//! preceding slot. Cells with no eligible candidate stay free. This pass
//! never creates labs.

use super::workspace::Workspace;
use crate::error::GridError;

/// Fills free cells with lectures. Returns the number placed.
pub(crate) fn fill_gaps(ws: &mut Workspace<'_>) -> Result<usize, GridError> {
    let cap = ws.cap();
    let mut filled = 0;

    for division in 0..ws.demands.len() {
        let candidates = ws.demands[division].fill.clone();
        if candidates.is_empty() {
            continue;
        }
        for day in 0..ws.day_count() {
            for slot in 1..=ws.num_slots() {
                if !ws.grid.is_free(division, day, slot) {
                    continue;
                }
                let choice = candidates.iter().find(|(_, faculty)| {
                    ws.ledger.has_capacity(*faculty, day, 1, cap)
                        && ws.can_take_lecture(division, day, slot, *faculty)
                });
                if let Some((subject, faculty)) = choice {
                    ws.place_lecture(division, day, slot, subject, *faculty)?;
                    filled += 1;
                }
            }
        }
    }
    Ok(filled)
}
