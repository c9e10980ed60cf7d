//! Faculty ledger.
//!
//! Tracks, for one generation run, how many slot-units each faculty
//! occupies per day and which `(day, slot)` pairs each faculty is busy in.
//! The busy key omits the division, so a faculty booked in
//! one division is unavailable to every other division in that slot.

use std::collections::{HashMap, HashSet};

/// Interned faculty handle, valid only for the ledger that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacultyId(u32);

/// Per-faculty daily load and slot-level busy state.
#[derive(Debug, Clone, Default)]
pub struct FacultyLedger {
    days: usize,
    names: Vec<String>,
    ids: HashMap<String, FacultyId>,
    /// `loads[faculty][day]` occupied slot-units.
    loads: Vec<Vec<u32>>,
    /// `(day, slot, faculty)` markers.
    busy: HashSet<(usize, usize, FacultyId)>,
}

impl FacultyLedger {
    /// Creates an empty ledger for `days` days.
    pub fn new(days: usize) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    /// Returns the id for a faculty name, registering it on first use.
    pub fn register(&mut self, name: &str) -> FacultyId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = FacultyId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.loads.push(vec![0; self.days]);
        id
    }

    /// Name of a registered faculty; `None` for an id from another ledger.
    pub fn name(&self, id: FacultyId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Number of registered faculty.
    pub fn faculty_count(&self) -> usize {
        self.names.len()
    }

    /// Occupied slot-units for a faculty on a day.
    pub fn load(&self, faculty: FacultyId, day: usize) -> u32 {
        self.loads
            .get(faculty.0 as usize)
            .and_then(|row| row.get(day))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `needed` more units fit under `cap` (`used + needed <= cap`).
    pub fn has_capacity(&self, faculty: FacultyId, day: usize, needed: u32, cap: u32) -> bool {
        self.load(faculty, day) + needed <= cap
    }

    /// Marks a faculty busy in a `(day, slot)`.
    pub fn mark_busy(&mut self, day: usize, slot: usize, faculty: FacultyId) {
        self.busy.insert((day, slot, faculty));
    }

    /// Whether a faculty is busy in a `(day, slot)`, in any division.
    pub fn is_busy(&self, day: usize, slot: usize, faculty: FacultyId) -> bool {
        self.busy.contains(&(day, slot, faculty))
    }

    /// Adds `delta` units to a faculty's load for a day.
    pub fn increment_count(&mut self, faculty: FacultyId, day: usize, delta: u32) {
        if let Some(cell) = self
            .loads
            .get_mut(faculty.0 as usize)
            .and_then(|row| row.get_mut(day))
        {
            *cell += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut ledger = FacultyLedger::new(5);
        let a = ledger.register("F1");
        let b = ledger.register("F2");
        assert_ne!(a, b);
        assert_eq!(ledger.register("F1"), a);
        assert_eq!(ledger.faculty_count(), 2);
        assert_eq!(ledger.name(b), Some("F2"));
    }

    #[test]
    fn test_foreign_id_has_no_name() {
        let mut other = FacultyLedger::new(1);
        other.register("X");
        let foreign = other.register("Y");

        let mut ledger = FacultyLedger::new(1);
        ledger.register("F1");
        assert_eq!(ledger.name(foreign), None);
        assert_eq!(ledger.load(foreign, 0), 0);
    }

    #[test]
    fn test_capacity() {
        let mut ledger = FacultyLedger::new(2);
        let f = ledger.register("F1");
        assert!(ledger.has_capacity(f, 0, 2, 2));
        ledger.increment_count(f, 0, 1);
        assert!(ledger.has_capacity(f, 0, 1, 2));
        assert!(!ledger.has_capacity(f, 0, 2, 2));
        assert!(ledger.has_capacity(f, 1, 2, 2));
        assert_eq!(ledger.load(f, 0), 1);
    }

    #[test]
    fn test_zero_cap() {
        let mut ledger = FacultyLedger::new(1);
        let f = ledger.register("F1");
        assert!(!ledger.has_capacity(f, 0, 1, 0));
    }

    #[test]
    fn test_busy_is_per_faculty() {
        let mut ledger = FacultyLedger::new(2);
        let f1 = ledger.register("F1");
        let f2 = ledger.register("F2");
        ledger.mark_busy(1, 3, f1);
        assert!(ledger.is_busy(1, 3, f1));
        assert!(!ledger.is_busy(1, 3, f2));
        assert!(!ledger.is_busy(0, 3, f1));
        assert!(!ledger.is_busy(1, 4, f1));
    }
}
