//! Flat export of a timetable.
//!
//! Columns are fixed: Division, Day, Slot, Type, Faculty, Subject.
//! Only occupied cells are exported, in division, day, slot order.

use std::collections::BTreeMap;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, GridError};
use crate::models::{Grid, Session, SessionKind, Timetable};
use crate::validation::MAX_GRID_CELLS;

/// Export header, in column order.
pub const CSV_HEADER: [&str; 6] = ["Division", "Day", "Slot", "Type", "Faculty", "Subject"];

/// One exported (or persisted) allocation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub division: String,
    pub day: String,
    pub slot: usize,
    pub kind: SessionKind,
    /// Empty for recess.
    pub faculty: String,
    /// Empty for recess.
    pub subject: String,
}

/// Flattens the occupied cells of a timetable.
pub fn records(timetable: &Timetable) -> Vec<AllocationRecord> {
    timetable
        .cells()
        .map(|cell| AllocationRecord {
            division: cell.division.to_string(),
            day: cell.day.to_string(),
            slot: cell.slot,
            kind: cell.session.kind,
            faculty: cell.session.faculty.clone().unwrap_or_default(),
            subject: cell.session.subject.clone().unwrap_or_default(),
        })
        .collect()
}

/// Rebuilds a timetable from allocation rows.
///
/// Divisions and days keep their first-seen order and the slot count is
/// the highest slot seen (at least 1). Cells without a row are free, and
/// for a repeated cell the last row wins. Shortfalls are not part of the
/// rows, so the result has none.
///
/// # Errors
/// - [`GridError::TooLarge`] if the rows span more than
///   [`MAX_GRID_CELLS`] cells.
/// - [`GridError::SlotOutOfRange`] for a row with slot 0.
pub fn timetable_from_records(rows: &[AllocationRecord]) -> Result<Timetable, GridError> {
    let mut divisions: Vec<String> = Vec::new();
    let mut days: Vec<String> = Vec::new();
    let mut cells: BTreeMap<(usize, usize, usize), &AllocationRecord> = BTreeMap::new();
    for row in rows {
        let division = index_of(&mut divisions, &row.division);
        let day = index_of(&mut days, &row.day);
        cells.insert((division, day, row.slot), row);
    }

    let num_slots = rows.iter().map(|r| r.slot).max().unwrap_or(0).max(1);
    let too_large = GridError::TooLarge {
        divisions: divisions.len(),
        days: days.len(),
        slots: num_slots,
    };
    let total = num_slots
        .checked_mul(days.len())
        .and_then(|c| c.checked_mul(divisions.len()))
        .ok_or_else(|| too_large.clone())?;
    if total > MAX_GRID_CELLS {
        return Err(too_large);
    }

    let mut grid = Grid::new(divisions.len(), days.len(), num_slots);
    for ((division, day, slot), row) in cells {
        grid.place(division, day, slot, session_of(row))?;
    }
    Ok(Timetable {
        days,
        divisions,
        grid,
        shortfalls: Vec::new(),
    })
}

fn index_of(names: &mut Vec<String>, name: &str) -> usize {
    match names.iter().position(|n| n == name) {
        Some(i) => i,
        None => {
            names.push(name.to_string());
            names.len() - 1
        }
    }
}

fn session_of(row: &AllocationRecord) -> Session {
    let non_empty = |v: &str| (!v.is_empty()).then(|| v.to_string());
    match row.kind {
        SessionKind::Recess => Session::recess(),
        kind => Session {
            subject: non_empty(row.subject.as_str()),
            faculty: non_empty(row.faculty.as_str()),
            kind,
        },
    }
}

/// Writes the timetable as CSV text. An empty timetable yields an empty string.
pub fn to_csv(timetable: &Timetable) -> Result<String, ExportError> {
    if timetable.grid.is_empty() {
        return Ok(String::new());
    }
    records_to_csv(&records(timetable))
}

/// Writes allocation rows as CSV text, header included.
///
/// Fields holding a delimiter, quote, or line break are quoted.
pub fn records_to_csv(rows: &[AllocationRecord]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grid, RecessRange, Session};

    fn sample() -> Timetable {
        let mut grid = Grid::with_recesses(1, 2, 3, &[RecessRange::single(2)]);
        grid.place(0, 0, 1, Session::lecture("Math", "Dr. M")).unwrap();
        grid.place(0, 1, 3, Session::lecture("Art, History", "Ms. \"Q\"")).unwrap();
        Timetable {
            days: vec!["Mon".into(), "Tue".into()],
            divisions: vec!["A".into()],
            grid,
            shortfalls: Vec::new(),
        }
    }

    #[test]
    fn test_records_order() {
        let rows = records(&sample());
        let keys: Vec<_> = rows.iter().map(|r| (r.day.as_str(), r.slot)).collect();
        assert_eq!(keys, vec![("Mon", 1), ("Mon", 2), ("Tue", 2), ("Tue", 3)]);
        assert_eq!(rows[1].kind, SessionKind::Recess);
        assert_eq!(rows[1].faculty, "");
    }

    #[test]
    fn test_to_csv() {
        let csv = to_csv(&sample()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Division,Day,Slot,Type,Faculty,Subject");
        assert_eq!(lines[1], "A,Mon,1,Lecture,Dr. M,Math");
        assert_eq!(lines[2], "A,Mon,2,Recess,,");
        assert_eq!(lines[4], "A,Tue,3,Lecture,\"Ms. \"\"Q\"\"\",\"Art, History\"");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_line_breaks_are_quoted() {
        let row = AllocationRecord {
            division: "A".into(),
            day: "Mon".into(),
            slot: 1,
            kind: SessionKind::Lecture,
            faculty: "Dr.\rM".into(),
            subject: "Two\nLines".into(),
        };
        let csv = records_to_csv(&[row]).unwrap();
        assert_eq!(
            csv,
            "Division,Day,Slot,Type,Faculty,Subject\nA,Mon,1,Lecture,\"Dr.\rM\",\"Two\nLines\"\n"
        );
    }

    #[test]
    fn test_header_only_for_no_rows() {
        assert_eq!(
            records_to_csv(&[]).unwrap(),
            "Division,Day,Slot,Type,Faculty,Subject\n"
        );
    }

    #[test]
    fn test_empty_timetable() {
        let t = Timetable {
            days: vec![],
            divisions: vec![],
            grid: Grid::new(0, 0, 0),
            shortfalls: Vec::new(),
        };
        assert_eq!(to_csv(&t).unwrap(), "");
    }

    #[test]
    fn test_rebuild_from_records() {
        let original = sample();
        let rebuilt = timetable_from_records(&records(&original)).unwrap();
        assert_eq!(rebuilt.divisions, vec!["A"]);
        assert_eq!(rebuilt.days, vec!["Mon", "Tue"]);
        assert_eq!(rebuilt.num_slots(), 3);
        assert_eq!(rebuilt.session("A", "Mon", 1), original.session("A", "Mon", 1));
        assert_eq!(rebuilt.session("A", "Tue", 2).unwrap().kind, SessionKind::Recess);
        assert_eq!(rebuilt.session("A", "Mon", 3), None);
        assert_eq!(records(&rebuilt), records(&original));
    }

    #[test]
    fn test_rebuild_last_row_wins() {
        let row = |subject: &str| AllocationRecord {
            division: "A".into(),
            day: "Mon".into(),
            slot: 2,
            kind: SessionKind::Lecture,
            faculty: "F".into(),
            subject: subject.into(),
        };
        let t = timetable_from_records(&[row("Math"), row("Art")]).unwrap();
        assert_eq!(t.num_slots(), 2);
        assert_eq!(t.session("A", "Mon", 2).unwrap().subject.as_deref(), Some("Art"));
        assert_eq!(t.session("A", "Mon", 1), None);
    }

    #[test]
    fn test_rebuild_rejects_bad_slots() {
        let mut row = records(&sample()).remove(0);
        row.slot = 0;
        assert!(matches!(
            timetable_from_records(&[row.clone()]),
            Err(GridError::SlotOutOfRange { slot: 0, .. })
        ));
        row.slot = usize::MAX;
        assert!(matches!(
            timetable_from_records(&[row]),
            Err(GridError::TooLarge { .. })
        ));
    }
}
