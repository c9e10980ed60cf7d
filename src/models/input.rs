//! Generation input and its normalized configuration.
//!
//! [`TimetableInput`] mirrors the raw parameters collected by the intake
//! form. [`TimetableConfig::from_input`] validates it and produces the
//! canonical configuration the scheduler runs on: trimmed names with
//! stable indices, clamped counts, and exactly one [`GenerationMode`].
//!
//! # Mode Precedence
//! Plan mode wins whenever the input carries at least one usable plan
//! row; otherwise the uniform subject lists apply to every division.

use serde::{Deserialize, Serialize};

use super::{PlanEntry, RecessRange, SubjectPlan};
use crate::error::{ParseError, TimetableError};
use crate::validation::validate_input;

/// Raw generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableInput {
    /// Teaching days in display order.
    pub days: Vec<String>,
    /// Slots per day.
    pub num_slots: i32,
    /// Division (class section) names.
    pub divisions: Vec<String>,
    /// Recess ranges applied to every division and day.
    pub recesses: Vec<RecessRange>,
    /// Daily cap on occupied slot-units per faculty.
    pub max_lectures_per_day: i32,
    /// Uniform mode: lecture subjects.
    pub subjects: Vec<String>,
    /// Uniform mode: subjects that also get lab blocks.
    pub lab_subjects: Vec<String>,
    /// Uniform mode: lectures per subject per division.
    pub total_lectures: i32,
    /// Uniform mode: lab blocks per lab subject per division.
    pub total_labs: i32,
    /// Plan mode rows.
    pub plan: Vec<PlanEntry>,
}

/// Validated, normalized configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Day names; position is the day index.
    pub days: Vec<String>,
    /// Slots per day (`>= 1`).
    pub num_slots: usize,
    /// Division names; position is the division index.
    pub divisions: Vec<String>,
    /// Recess ranges, clipped at grid initialization.
    pub recesses: Vec<RecessRange>,
    /// Daily cap on occupied slot-units per faculty.
    pub max_lectures_per_day: u32,
    /// Subject requirements.
    pub mode: GenerationMode,
}

/// How subject requirements are expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Explicit requirements per division, aligned with `TimetableConfig::divisions`.
    Plan {
        /// `by_division[d]` lists division `d`'s subjects in enumeration order.
        by_division: Vec<Vec<SubjectPlan>>,
    },
    /// Same requirements replicated for every division.
    Uniform {
        /// Ordered union of lecture subjects and lab subjects.
        subjects: Vec<String>,
        /// Lab subjects in the order given.
        lab_subjects: Vec<String>,
        /// Lectures per subject per division.
        lectures_per_subject: u32,
        /// Lab blocks per lab subject per division.
        labs_per_subject: u32,
    },
}

impl TimetableInput {
    /// Creates an input with the grid shape set and no subjects.
    pub fn new(days: Vec<String>, num_slots: i32, divisions: Vec<String>) -> Self {
        Self {
            days,
            num_slots,
            divisions,
            ..Default::default()
        }
    }

    /// Loads an input from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a recess range.
    pub fn with_recess(mut self, range: RecessRange) -> Self {
        self.recesses.push(range);
        self
    }

    /// Sets the per-faculty daily cap.
    pub fn with_max_per_day(mut self, max: i32) -> Self {
        self.max_lectures_per_day = max;
        self
    }

    /// Sets the uniform-mode subject lists and counts.
    pub fn with_uniform(
        mut self,
        subjects: Vec<String>,
        lab_subjects: Vec<String>,
        total_lectures: i32,
        total_labs: i32,
    ) -> Self {
        self.subjects = subjects;
        self.lab_subjects = lab_subjects;
        self.total_lectures = total_lectures;
        self.total_labs = total_labs;
        self
    }

    /// Adds a plan row.
    pub fn with_plan_entry(mut self, entry: PlanEntry) -> Self {
        self.plan.push(entry);
        self
    }

    /// Adds several plan rows.
    pub fn with_plan(mut self, entries: impl IntoIterator<Item = PlanEntry>) -> Self {
        self.plan.extend(entries);
        self
    }

    /// Whether plan mode applies.
    pub fn is_plan_mode(&self) -> bool {
        self.plan.iter().any(|e| !e.subject.trim().is_empty())
    }
}

impl TimetableConfig {
    /// Validates and normalizes raw input.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfiguration`] listing every problem found.
    pub fn from_input(input: &TimetableInput) -> Result<Self, TimetableError> {
        validate_input(input).map_err(TimetableError::InvalidConfiguration)?;

        let days = clean_names(&input.days);
        let divisions = clean_names(&input.divisions);
        let mode = if input.is_plan_mode() {
            GenerationMode::Plan {
                by_division: group_plan(&divisions, &input.plan),
            }
        } else {
            let lab_subjects = clean_names(&input.lab_subjects);
            let mut subjects = clean_names(&input.subjects);
            for lab in &lab_subjects {
                if !subjects.contains(lab) {
                    subjects.push(lab.clone());
                }
            }
            GenerationMode::Uniform {
                subjects,
                lab_subjects,
                lectures_per_subject: input.total_lectures.max(0) as u32,
                labs_per_subject: input.total_labs.max(0) as u32,
            }
        };

        Ok(Self {
            days,
            num_slots: input.num_slots as usize,
            divisions,
            recesses: input.recesses.clone(),
            max_lectures_per_day: input.max_lectures_per_day.max(0) as u32,
            mode,
        })
    }

    /// Index of a day by name.
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// Index of a division by name.
    pub fn division_index(&self, division: &str) -> Option<usize> {
        self.divisions.iter().position(|d| d == division)
    }

    /// Subject universe: every subject any division may be taught.
    pub fn subjects(&self) -> Vec<String> {
        match &self.mode {
            GenerationMode::Uniform { subjects, .. } => subjects.clone(),
            GenerationMode::Plan { by_division } => {
                let mut out: Vec<String> = Vec::new();
                for sp in by_division.iter().flatten() {
                    if !out.contains(&sp.subject) {
                        out.push(sp.subject.clone());
                    }
                }
                out
            }
        }
    }
}

/// Trims names and drops blank entries, keeping order.
pub(crate) fn clean_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Groups plan rows by division index.
///
/// Rows for unknown divisions are ignored. A repeated subject within a
/// division replaces the earlier row in place.
fn group_plan(divisions: &[String], entries: &[PlanEntry]) -> Vec<Vec<SubjectPlan>> {
    let mut by_division: Vec<Vec<SubjectPlan>> = vec![Vec::new(); divisions.len()];
    for entry in entries {
        let Some(d) = divisions.iter().position(|d| d == entry.division.trim()) else {
            continue;
        };
        let Some(sp) = entry.to_subject_plan() else {
            continue;
        };
        let subjects = &mut by_division[d];
        match subjects.iter_mut().find(|s| s.subject == sp.subject) {
            Some(existing) => *existing = sp,
            None => subjects.push(sp),
        }
    }
    by_division
}
