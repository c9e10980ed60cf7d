//! Error types.
//!
//! Placement shortfalls are not errors: they are recorded on the
//! [`Timetable`](crate::models::Timetable) and logged as warnings.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failure of a generation run.
///
/// Either variant means the caller has no usable grid.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Input rejected before any grid was built.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),
    /// Internal fault while placing sessions.
    #[error("generation failed: {0}")]
    Unexpected(#[from] GridError),
}

/// Fault raised by the grid when a write would break one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell (division {division}, day {day}, slot {slot}) is already occupied")]
    Occupied {
        division: usize,
        day: usize,
        slot: usize,
    },
    #[error("slot {slot} outside 1..={num_slots}")]
    SlotOutOfRange { slot: usize, num_slots: usize },
    #[error("cell (division {division}, day {day}) outside grid bounds")]
    OutOfBounds { division: usize, day: usize },
    #[error("{divisions} divisions x {days} days x {slots} slots exceeds the grid cell limit")]
    TooLarge {
        divisions: usize,
        days: usize,
        slots: usize,
    },
}

/// Error parsing raw form fields.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid recess range '{0}' (expected start-end)")]
    InvalidRecess(String),
    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Error writing allocation rows as CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output is not utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Error from the in-memory run history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no timetable data to save")]
    EmptyTimetable,
    #[error("run '{0}' already exists")]
    DuplicateRun(String),
    #[error("run '{0}' not found")]
    NotFound(String),
    #[error("run name must not be blank")]
    BlankName,
    #[error("saved run is corrupt: {0}")]
    Corrupt(#[from] GridError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
