//! Assignment grid.
//!
//! Flat `division × day × slot` store of [`Session`]s. Divisions and days
//! are addressed by the indices fixed in
//! [`TimetableConfig`](super::TimetableConfig); slots are 1-based.
//!
//! # Invariants
//! - A cell holds at most one session; [`Grid::place`] refuses to overwrite.
//! - Recess cells are written once by [`Grid::with_recesses`] and never change.

use serde::{Deserialize, Serialize};

use super::{RecessRange, Session};
use crate::error::GridError;

/// Division → day → slot assignment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    divisions: usize,
    days: usize,
    num_slots: usize,
    cells: Vec<Option<Session>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(divisions: usize, days: usize, num_slots: usize) -> Self {
        Self {
            divisions,
            days,
            num_slots,
            cells: vec![None; divisions * days * num_slots],
        }
    }

    /// Creates a grid with every clipped recess range written into each
    /// division and day.
    pub fn with_recesses(
        divisions: usize,
        days: usize,
        num_slots: usize,
        recesses: &[RecessRange],
    ) -> Self {
        let mut grid = Self::new(divisions, days, num_slots);
        let spans: Vec<(usize, usize)> = recesses.iter().filter_map(|r| r.clip(num_slots)).collect();
        for division in 0..divisions {
            for day in 0..days {
                for &(start, end) in &spans {
                    for slot in start..=end {
                        let idx = grid.offset(division, day, slot);
                        grid.cells[idx] = Some(Session::recess());
                    }
                }
            }
        }
        grid
    }

    #[inline]
    pub fn division_count(&self) -> usize {
        self.divisions
    }

    #[inline]
    pub fn day_count(&self) -> usize {
        self.days
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Session in a cell. `None` if free or out of range.
    pub fn get(&self, division: usize, day: usize, slot: usize) -> Option<&Session> {
        self.index(division, day, slot)
            .ok()
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Whether a cell is in range and unoccupied.
    pub fn is_free(&self, division: usize, day: usize, slot: usize) -> bool {
        matches!(self.index(division, day, slot), Ok(idx) if self.cells[idx].is_none())
    }

    /// Whether a cell holds a recess.
    pub fn is_recess(&self, division: usize, day: usize, slot: usize) -> bool {
        self.get(division, day, slot).is_some_and(Session::is_recess)
    }

    /// Writes a session into a free cell.
    ///
    /// # Errors
    /// [`GridError::Occupied`] if the cell already holds a session (recess
    /// included), or a bounds error for an invalid address.
    pub fn place(
        &mut self,
        division: usize,
        day: usize,
        slot: usize,
        session: Session,
    ) -> Result<(), GridError> {
        let idx = self.index(division, day, slot)?;
        if self.cells[idx].is_some() {
            return Err(GridError::Occupied {
                division,
                day,
                slot,
            });
        }
        self.cells[idx] = Some(session);
        Ok(())
    }

    /// Slots `1..=num_slots` of one division/day.
    pub fn row(&self, division: usize, day: usize) -> &[Option<Session>] {
        if division >= self.divisions || day >= self.days {
            return &[];
        }
        let start = self.offset(division, day, 1);
        &self.cells[start..start + self.num_slots]
    }

    /// Iterates `(division, day, slot, session)` over occupied cells in
    /// division, day, slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, usize, &Session)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref().map(|session| {
                let slot = idx % self.num_slots + 1;
                let day = (idx / self.num_slots) % self.days;
                let division = idx / (self.num_slots * self.days);
                (division, day, slot, session)
            })
        })
    }

    fn index(&self, division: usize, day: usize, slot: usize) -> Result<usize, GridError> {
        if division >= self.divisions || day >= self.days {
            return Err(GridError::OutOfBounds { division, day });
        }
        if slot == 0 || slot > self.num_slots {
            return Err(GridError::SlotOutOfRange {
                slot,
                num_slots: self.num_slots,
            });
        }
        Ok(self.offset(division, day, slot))
    }

    #[inline]
    fn offset(&self, division: usize, day: usize, slot: usize) -> usize {
        (division * self.days + day) * self.num_slots + (slot - 1)
    }
}
