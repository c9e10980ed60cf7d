//! Timetable quality metrics.
//!
//! Summarizes a generated timetable for reporting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | Occupied teaching cells / non-recess cells |
//! | Lab Blocks | Lab cells / 2 |
//! | Faculty Load | Slot-units per faculty across the week |
//! | Missing Sessions | Requested minus placed, summed over shortfalls |

use std::collections::BTreeMap;

use crate::models::{SessionKind, Timetable};

/// Timetable summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableStats {
    /// All cells (divisions × days × slots).
    pub total_cells: usize,
    pub recess_cells: usize,
    pub lecture_cells: usize,
    pub lab_cells: usize,
    /// Non-recess cells left empty.
    pub free_cells: usize,
    /// Number of two-slot lab blocks.
    pub lab_blocks: usize,
    /// Teaching cells / non-recess cells (1.0 when there are none).
    pub fill_rate: f64,
    /// Weekly slot-units per faculty.
    pub faculty_load: BTreeMap<String, u32>,
    /// Sessions requested but not placed.
    pub missing_sessions: u32,
}

impl TimetableStats {
    /// Computes metrics from a timetable.
    pub fn calculate(timetable: &Timetable) -> Self {
        let total_cells = timetable.grid.len();
        let mut recess_cells = 0;
        let mut lecture_cells = 0;
        let mut lab_cells = 0;
        let mut faculty_load: BTreeMap<String, u32> = BTreeMap::new();

        for cell in timetable.cells() {
            match cell.session.kind {
                SessionKind::Recess => recess_cells += 1,
                SessionKind::Lecture => lecture_cells += 1,
                SessionKind::Lab => lab_cells += 1,
            }
            if let Some(faculty) = &cell.session.faculty {
                *faculty_load.entry(faculty.clone()).or_insert(0) += 1;
            }
        }

        let teaching_cells = lecture_cells + lab_cells;
        let available = total_cells - recess_cells;
        let fill_rate = if available == 0 {
            1.0
        } else {
            teaching_cells as f64 / available as f64
        };

        Self {
            total_cells,
            recess_cells,
            lecture_cells,
            lab_cells,
            free_cells: available - teaching_cells,
            lab_blocks: lab_cells / 2,
            fill_rate,
            faculty_load,
            missing_sessions: timetable.shortfalls.iter().map(|s| s.missing()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grid, RecessRange, Session, Shortfall, ShortfallKind};

    fn sample() -> Timetable {
        let mut grid = Grid::with_recesses(1, 2, 4, &[RecessRange::single(3)]);
        grid.place(0, 0, 1, Session::lab("Chem", "F")).unwrap();
        grid.place(0, 0, 2, Session::lab("Chem", "F")).unwrap();
        grid.place(0, 1, 1, Session::lecture("Math", "G")).unwrap();
        Timetable {
            days: vec!["Mon".into(), "Tue".into()],
            divisions: vec!["A".into()],
            grid,
            shortfalls: vec![Shortfall {
                kind: ShortfallKind::Lecture,
                division: "A".into(),
                subject: "Math".into(),
                faculty: "G".into(),
                requested: 4,
                placed: 1,
            }],
        }
    }

    #[test]
    fn test_counts() {
        let s = TimetableStats::calculate(&sample());
        assert_eq!(s.total_cells, 8);
        assert_eq!(s.recess_cells, 2);
        assert_eq!(s.lab_cells, 2);
        assert_eq!(s.lecture_cells, 1);
        assert_eq!(s.free_cells, 3);
        assert_eq!(s.lab_blocks, 1);
        assert!((s.fill_rate - 0.5).abs() < 1e-10);
        assert_eq!(s.missing_sessions, 3);
    }

    #[test]
    fn test_faculty_load() {
        let s = TimetableStats::calculate(&sample());
        assert_eq!(s.faculty_load.get("F"), Some(&2));
        assert_eq!(s.faculty_load.get("G"), Some(&1));
        assert_eq!(s.faculty_load.len(), 2);
    }

    #[test]
    fn test_all_recess() {
        let grid = Grid::with_recesses(1, 1, 2, &[RecessRange::new(1, 2)]);
        let t = Timetable {
            days: vec!["Mon".into()],
            divisions: vec!["A".into()],
            grid,
            shortfalls: Vec::new(),
        };
        let s = TimetableStats::calculate(&t);
        assert!((s.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(s.free_cells, 0);
    }
}
