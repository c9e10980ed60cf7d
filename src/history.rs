//! In-memory run history.
//!
//! Stores generated timetables as flat allocation rows tagged with an
//! externally generated run id, a monotonically increasing version, and
//! the time the run was saved. A save is all-or-nothing: rows are built
//! first and the record is inserted only when every check passes.
//!
//! A saved run can be rebuilt into a [`Timetable`] and rendered with the
//! same tables as a fresh generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::export::{records, records_to_csv, timetable_from_records, AllocationRecord};
use crate::models::Timetable;
use crate::render::render_html;

/// A saved generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Caller-supplied run identifier.
    pub run_id: String,
    /// Version assigned at save time (1-based).
    pub version: u32,
    /// Display name.
    pub run_name: String,
    /// When the run was saved.
    pub generated_at: DateTime<Utc>,
    /// Allocation rows.
    pub rows: Vec<AllocationRecord>,
}

/// Listing entry for a saved run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub version: u32,
    pub run_name: String,
    pub generated_at: DateTime<Utc>,
    pub row_count: usize,
}

/// Saved runs, in save order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    runs: Vec<RunRecord>,
}

impl RunHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Version the next saved run will receive.
    pub fn next_version(&self) -> u32 {
        self.runs.iter().map(|r| r.version).max().unwrap_or(0) + 1
    }

    /// Saves a timetable under `run_id`, stamped with the current time.
    ///
    /// See [`save_at`](Self::save_at).
    pub fn save(
        &mut self,
        run_id: impl Into<String>,
        run_name: &str,
        timetable: &Timetable,
    ) -> Result<&RunRecord, HistoryError> {
        self.save_at(run_id, run_name, timetable, Utc::now())
    }

    /// Saves a timetable under `run_id` with an explicit timestamp.
    ///
    /// A blank `run_name` defaults to `Run <yyyy-MM-dd HH:mm>`.
    ///
    /// # Errors
    /// - [`HistoryError::EmptyTimetable`] if the timetable has no cells.
    /// - [`HistoryError::DuplicateRun`] if `run_id` is already stored.
    pub fn save_at(
        &mut self,
        run_id: impl Into<String>,
        run_name: &str,
        timetable: &Timetable,
        generated_at: DateTime<Utc>,
    ) -> Result<&RunRecord, HistoryError> {
        let run_id = run_id.into();
        if timetable.grid.is_empty() {
            return Err(HistoryError::EmptyTimetable);
        }
        if self.get(&run_id).is_some() {
            return Err(HistoryError::DuplicateRun(run_id));
        }

        let run_name = match run_name.trim() {
            "" => format!("Run {}", generated_at.format("%Y-%m-%d %H:%M")),
            name => name.to_string(),
        };
        let record = RunRecord {
            run_id,
            version: self.next_version(),
            run_name,
            generated_at,
            rows: records(timetable),
        };
        tracing::info!(
            run_id = %record.run_id,
            version = record.version,
            rows = record.rows.len(),
            "timetable run saved"
        );
        self.runs.push(record);
        Ok(&self.runs[self.runs.len() - 1])
    }

    /// Saved runs, newest `generated_at` first. Runs saved at the same
    /// instant list the later save first.
    pub fn list(&self) -> Vec<RunSummary> {
        let mut runs: Vec<&RunRecord> = self.runs.iter().rev().collect();
        runs.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        runs
            .into_iter()
            .map(|r| RunSummary {
                run_id: r.run_id.clone(),
                version: r.version,
                run_name: r.run_name.clone(),
                generated_at: r.generated_at,
                row_count: r.rows.len(),
            })
            .collect()
    }

    /// Looks up a run.
    pub fn get(&self, run_id: &str) -> Option<&RunRecord> {
        self.runs.iter().find(|r| r.run_id == run_id)
    }

    /// Renames a run.
    ///
    /// # Errors
    /// - [`HistoryError::BlankName`] if `run_name` is blank.
    /// - [`HistoryError::NotFound`] if no run has `run_id`.
    pub fn rename(&mut self, run_id: &str, run_name: &str) -> Result<&RunRecord, HistoryError> {
        let run_name = run_name.trim();
        if run_name.is_empty() {
            return Err(HistoryError::BlankName);
        }
        let run = self
            .runs
            .iter_mut()
            .find(|r| r.run_id == run_id)
            .ok_or_else(|| HistoryError::NotFound(run_id.to_string()))?;
        tracing::info!(
            run_id = %run.run_id,
            from = %run.run_name,
            to = %run_name,
            "timetable run renamed"
        );
        run.run_name = run_name.to_string();
        Ok(&*run)
    }

    /// Removes a run and its rows.
    pub fn delete(&mut self, run_id: &str) -> Result<RunRecord, HistoryError> {
        let idx = self
            .runs
            .iter()
            .position(|r| r.run_id == run_id)
            .ok_or_else(|| HistoryError::NotFound(run_id.to_string()))?;
        Ok(self.runs.remove(idx))
    }

    /// Rebuilds the timetable of a saved run from its rows.
    ///
    /// # Errors
    /// - [`HistoryError::NotFound`] if no run has `run_id`.
    /// - [`HistoryError::EmptyTimetable`] if the run has no rows.
    /// - [`HistoryError::Corrupt`] if the rows do not fit a grid.
    pub fn timetable(&self, run_id: &str) -> Result<Timetable, HistoryError> {
        let run = self
            .get(run_id)
            .ok_or_else(|| HistoryError::NotFound(run_id.to_string()))?;
        if run.rows.is_empty() {
            return Err(HistoryError::EmptyTimetable);
        }
        Ok(timetable_from_records(&run.rows)?)
    }

    /// Renders a saved run as one HTML table per division.
    pub fn render_html(&self, run_id: &str) -> Result<Vec<(String, String)>, HistoryError> {
        let timetable = self.timetable(run_id)?;
        Ok(render_html(&timetable))
    }

    /// Exports a saved run as CSV.
    pub fn export_csv(&self, run_id: &str) -> Result<String, HistoryError> {
        let run = self
            .get(run_id)
            .ok_or_else(|| HistoryError::NotFound(run_id.to_string()))?;
        Ok(records_to_csv(&run.rows)?)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
