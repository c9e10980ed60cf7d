//! Timetable (solution) model.
//!
//! The read-only result of one generation run: the filled grid, the
//! names behind its indices, and any placement shortfalls.

use serde::{Deserialize, Serialize};

use super::{Grid, Session};

/// A generated weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Day names; position is the day index.
    pub days: Vec<String>,
    /// Division names; position is the division index.
    pub divisions: Vec<String>,
    /// The filled grid.
    pub grid: Grid,
    /// Requirements that could not be fully placed.
    pub shortfalls: Vec<Shortfall>,
}

/// A lab or lecture requirement that was only partly satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// What could not be placed.
    pub kind: ShortfallKind,
    /// Division name.
    pub division: String,
    /// Subject name.
    pub subject: String,
    /// Faculty the sessions were assigned to.
    pub faculty: String,
    /// Sessions (or lab blocks) requested.
    pub requested: u32,
    /// Sessions (or lab blocks) placed.
    pub placed: u32,
}

/// Classification of shortfalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortfallKind {
    /// Two-slot lab blocks.
    Lab,
    /// Single-slot lectures.
    Lecture,
}

/// One cell of the timetable, addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a> {
    pub division: &'a str,
    pub day: &'a str,
    pub slot: usize,
    pub session: &'a Session,
}

impl Shortfall {
    /// Sessions requested but not placed.
    #[inline]
    pub fn missing(&self) -> u32 {
        self.requested.saturating_sub(self.placed)
    }
}

impl Timetable {
    /// Slots per day.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.grid.num_slots()
    }

    /// Session at a named cell.
    pub fn session(&self, division: &str, day: &str, slot: usize) -> Option<&Session> {
        let d = self.divisions.iter().position(|x| x == division)?;
        let t = self.days.iter().position(|x| x == day)?;
        self.grid.get(d, t, slot)
    }

    /// Occupied cells in division, day, slot order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef<'_>> + '_ {
        self.grid
            .occupied()
            .map(move |(division, day, slot, session)| CellRef {
                division: &self.divisions[division],
                day: &self.days[day],
                slot,
                session,
            })
    }

    /// Whether every requirement was fully placed.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timetable {
        let mut grid = Grid::new(2, 2, 3);
        grid.place(0, 0, 1, Session::lecture("Math", "F1")).unwrap();
        grid.place(1, 1, 3, Session::lab("Chem", "F2")).unwrap();
        Timetable {
            days: vec!["Mon".into(), "Tue".into()],
            divisions: vec!["A".into(), "B".into()],
            grid,
            shortfalls: Vec::new(),
        }
    }

    #[test]
    fn test_session_by_name() {
        let t = sample();
        assert_eq!(
            t.session("A", "Mon", 1).unwrap().faculty.as_deref(),
            Some("F1")
        );
        assert!(t.session("A", "Mon", 2).is_none());
        assert!(t.session("C", "Mon", 1).is_none());
        assert!(t.session("A", "Sun", 1).is_none());
    }

    #[test]
    fn test_cells() {
        let t = sample();
        let cells: Vec<_> = t.cells().map(|c| (c.division, c.day, c.slot)).collect();
        assert_eq!(cells, vec![("A", "Mon", 1), ("B", "Tue", 3)]);
    }

    #[test]
    fn test_shortfall_missing() {
        let s = Shortfall {
            kind: ShortfallKind::Lab,
            division: "A".into(),
            subject: "Chem".into(),
            faculty: "F2".into(),
            requested: 3,
            placed: 1,
        };
        assert_eq!(s.missing(), 2);
        let mut t = sample();
        assert!(t.is_complete());
        t.shortfalls.push(s);
        assert!(!t.is_complete());
    }
}
