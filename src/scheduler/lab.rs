//! Lab block placement.
//!
//! # Algorithm
//!
//! For each division, for each subject with lab blocks requested:
//! 1. Scan days in configured order, skipping days where the division
//!    already has a lab or the lab faculty lacks 2 units of capacity.
//! 2. Within a day, take the first pair `(s, s+1)` where both cells are
//!    free (so neither is recess) and the faculty is free in both slots.
//! 3. Write both cells as Lab, book the faculty for 2 units, flag the day.
//!
//! First fit, no backtracking. When a block cannot be placed the remaining
//! blocks for that subject are dropped and a shortfall is recorded.
//!
//! # Complexity
//! O(b * d * s) per division where b=blocks, d=days, s=slots.

use super::workspace::{Demand, Workspace};
use crate::error::GridError;
use crate::models::{Session, ShortfallKind};

/// Units a lab block charges against the daily cap.
pub const LAB_BLOCK_UNITS: u32 = 2;

/// Places lab blocks for every division.
pub(crate) fn place_labs(ws: &mut Workspace<'_>) -> Result<(), GridError> {
    for division in 0..ws.demands.len() {
        let demands = ws.demands[division].labs.clone();
        for demand in demands.iter().filter(|d| d.count > 0) {
            let mut placed = 0;
            while placed < demand.count {
                if !place_block(ws, division, demand)? {
                    ws.record_shortfall(ShortfallKind::Lab, division, demand, placed);
                    break;
                }
                placed += 1;
            }
        }
    }
    Ok(())
}

/// Places one block. Returns `false` if no day has a usable pair.
fn place_block(ws: &mut Workspace<'_>, division: usize, demand: &Demand) -> Result<bool, GridError> {
    let faculty = demand.faculty;
    let cap = ws.cap();

    for day in 0..ws.day_count() {
        if ws.has_lab(division, day) {
            continue;
        }
        if !ws.ledger.has_capacity(faculty, day, LAB_BLOCK_UNITS, cap) {
            continue;
        }
        let Some(slot) = first_free_pair(ws, division, day, demand) else {
            continue;
        };

        let name = ws.faculty_name(faculty).to_string();
        for s in [slot, slot + 1] {
            ws.grid
                .place(division, day, s, Session::lab(demand.subject.as_str(), name.as_str()))?;
            ws.ledger.mark_busy(day, s, faculty);
        }
        ws.ledger.increment_count(faculty, day, LAB_BLOCK_UNITS);
        ws.set_lab(division, day);
        tracing::debug!(
            division = %ws.config.divisions[division],
            day = %ws.config.days[day],
            slot,
            subject = %demand.subject,
            "placed lab block"
        );
        return Ok(true);
    }
    Ok(false)
}

fn first_free_pair(ws: &Workspace<'_>, division: usize, day: usize, demand: &Demand) -> Option<usize> {
    (1..ws.num_slots()).find(|&s| {
        ws.grid.is_free(division, day, s)
            && ws.grid.is_free(division, day, s + 1)
            && !ws.ledger.is_busy(day, s, demand.faculty)
            && !ws.ledger.is_busy(day, s + 1, demand.faculty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanEntry, RecessRange, SessionKind, TimetableConfig, TimetableInput};

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn config(days: &[&str], slots: i32, divisions: &[&str], cap: i32) -> TimetableInput {
        TimetableInput::new(names(days), slots, names(divisions)).with_max_per_day(cap)
    }

    fn run(input: TimetableInput) -> (TimetableConfig, Vec<(usize, usize, usize, String)>, usize) {
        let config = TimetableConfig::from_input(&input).unwrap();
        let (labs, shortfalls) = {
            let mut ws = Workspace::new(&config);
            ws.setup_demands();
            place_labs(&mut ws).unwrap();
            let labs = ws
                .grid
                .occupied()
                .filter(|(_, _, _, s)| s.kind == SessionKind::Lab)
                .map(|(d, t, s, sess)| (d, t, s, sess.faculty.clone().unwrap_or_default()))
                .collect();
            (labs, ws.shortfalls.len())
        };
        (config, labs, shortfalls)
    }

    #[test]
    fn test_first_pair_first_day() {
        let input = config(&["Mon", "Tue"], 6, &["A"], 6)
            .with_plan_entry(PlanEntry::new("A", "Chem").with_labs(1).with_lecture_faculty("F"));
        let (_, labs, shortfalls) = run(input);
        assert_eq!(
            labs,
            vec![(0, 0, 1, "F".to_string()), (0, 0, 2, "F".to_string())]
        );
        assert_eq!(shortfalls, 0);
    }

    #[test]
    fn test_one_block_per_division_day() {
        let input = config(&["Mon", "Tue"], 6, &["A"], 6).with_plan(vec![
            PlanEntry::new("A", "Chem").with_labs(1).with_lecture_faculty("F"),
            PlanEntry::new("A", "Phys").with_labs(1).with_lecture_faculty("G"),
        ]);
        let (_, labs, _) = run(input);
        let days: Vec<_> = labs.iter().map(|(_, t, s, _)| (*t, *s)).collect();
        // second subject moves to Tuesday even though Monday 3-4 is free
        assert_eq!(days, vec![(0, 1), (0, 2), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_skips_recess_pairs() {
        let input = config(&["Mon"], 5, &["A"], 6)
            .with_recess(RecessRange::single(2))
            .with_plan_entry(PlanEntry::new("A", "Chem").with_labs(1));
        let (_, labs, _) = run(input);
        let slots: Vec<_> = labs.iter().map(|(_, _, s, _)| *s).collect();
        assert_eq!(slots, vec![3, 4]);
    }

    #[test]
    fn test_faculty_busy_across_divisions() {
        let input = config(&["Mon"], 4, &["A", "B"], 6).with_plan(vec![
            PlanEntry::new("A", "Chem").with_labs(1).with_lab_faculty("F"),
            PlanEntry::new("B", "Chem").with_labs(1).with_lab_faculty("F"),
        ]);
        let (_, labs, shortfalls) = run(input);
        let cells: Vec<_> = labs.iter().map(|(d, _, s, _)| (*d, *s)).collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 3), (1, 4)]);
        assert_eq!(shortfalls, 0);
    }

    #[test]
    fn test_capacity_blocks_day() {
        // cap 1 < 2 units: no lab can ever be placed
        let input = config(&["Mon", "Tue"], 4, &["A"], 1)
            .with_plan_entry(PlanEntry::new("A", "Chem").with_labs(1));
        let (_, labs, shortfalls) = run(input);
        assert!(labs.is_empty());
        assert_eq!(shortfalls, 1);
    }

    #[test]
    fn test_shortfall_abandons_remaining() {
        let input = config(&["Mon", "Tue"], 4, &["A"], 6)
            .with_plan_entry(PlanEntry::new("A", "Chem").with_labs(5).with_lecture_faculty("F"));
        let config = TimetableConfig::from_input(&input).unwrap();
        let mut ws = Workspace::new(&config);
        ws.setup_demands();
        place_labs(&mut ws).unwrap();

        assert_eq!(ws.shortfalls.len(), 1);
        let s = &ws.shortfalls[0];
        assert_eq!(s.kind, ShortfallKind::Lab);
        assert_eq!(s.requested, 5);
        assert_eq!(s.placed, 2);
        assert_eq!(s.faculty, "F");
    }

    #[test]
    fn test_single_slot_day_has_no_pair() {
        let input = config(&["Mon"], 1, &["A"], 6)
            .with_plan_entry(PlanEntry::new("A", "Chem").with_labs(1));
        let (_, labs, shortfalls) = run(input);
        assert!(labs.is_empty());
        assert_eq!(shortfalls, 1);
    }
}
