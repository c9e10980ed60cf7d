//! Timetable generator.
//!
//! # Algorithm
//!
//! Strictly sequential, one pass per run:
//!
//! `Validate → InitGrid → ModeSetup → PlaceLabs → PlaceLectures → FillGaps → Done`
//!
//! 1. Validate and normalize the input (no state is built on failure).
//! 2. Build the grid and write recess cells.
//! 3. Resolve subject requirements for plan or uniform mode.
//! 4. Place two-slot lab blocks (first fit).
//! 5. Place lectures with a round-robin cursor per subject.
//! 6. Fill remaining free cells with eligible lectures.
//!
//! Placement shortfalls are warnings: the run still succeeds and the
//! shortfalls are reported on the [`Timetable`].
//!
//! # Complexity
//! O(v * d * s) where v=divisions × subjects × requested sessions,
//! d=days, s=slots.

use std::fmt;

use super::gap_fill::fill_gaps;
use super::lab::place_labs;
use super::lecture::place_lectures;
use super::workspace::Workspace;
use crate::error::TimetableError;
use crate::models::{Timetable, TimetableConfig, TimetableInput};
use crate::validation::validate_config;

/// Stage of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validate,
    InitGrid,
    ModeSetup,
    PlaceLabs,
    PlaceLectures,
    FillGaps,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Validate => "validate",
            Phase::InitGrid => "init-grid",
            Phase::ModeSetup => "mode-setup",
            Phase::PlaceLabs => "place-labs",
            Phase::PlaceLectures => "place-lectures",
            Phase::FillGaps => "fill-gaps",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Greedy, first-fit timetable generator.
///
/// Holds no state between runs; every call builds its own grid and
/// faculty ledger, so one generator can serve concurrent callers.
///
/// # Example
///
/// ```
/// use u_timetable::models::{PlanEntry, RecessRange, SessionKind, TimetableInput};
/// use u_timetable::scheduler::TimetableGenerator;
///
/// let input = TimetableInput::new(vec!["Mon".into(), "Tue".into()], 4, vec!["A".into()])
///     .with_max_per_day(4)
///     .with_recess(RecessRange::single(3))
///     .with_plan_entry(PlanEntry::new("A", "X").with_lectures(3).with_lecture_faculty("F"));
///
/// let timetable = TimetableGenerator::new().generate(&input).unwrap();
/// assert_eq!(timetable.session("A", "Mon", 3).unwrap().kind, SessionKind::Recess);
/// assert_eq!(timetable.session("A", "Mon", 1).unwrap().kind, SessionKind::Lecture);
/// assert!(timetable.is_complete());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimetableGenerator;

impl TimetableGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Validates raw input and generates a timetable.
    ///
    /// # Errors
    /// - [`TimetableError::InvalidConfiguration`] if validation fails.
    /// - [`TimetableError::Unexpected`] on an internal placement fault.
    pub fn generate(&self, input: &TimetableInput) -> Result<Timetable, TimetableError> {
        let config = TimetableConfig::from_input(input).inspect_err(|err| {
            tracing::warn!(error = %err, "timetable generation rejected");
        })?;
        self.generate_config(&config)
    }

    /// Generates a timetable from a configuration.
    ///
    /// The configuration is re-checked first, so one built by hand or
    /// deserialized directly is held to the same rules as
    /// [`TimetableConfig::from_input`].
    ///
    /// # Errors
    /// Same as [`generate`](Self::generate).
    pub fn generate_config(&self, config: &TimetableConfig) -> Result<Timetable, TimetableError> {
        tracing::debug!(phase = %Phase::Validate, "timetable generation");
        validate_config(config)
            .map_err(TimetableError::InvalidConfiguration)
            .inspect_err(|err| {
                tracing::warn!(error = %err, "timetable generation rejected");
            })?;
        self.run(config).inspect_err(|err| {
            tracing::error!(error = %err, "timetable generation failed");
        })
    }

    fn run(&self, config: &TimetableConfig) -> Result<Timetable, TimetableError> {
        tracing::debug!(phase = %Phase::InitGrid, "timetable generation");
        let mut ws = Workspace::new(config);

        tracing::debug!(phase = %Phase::ModeSetup, "timetable generation");
        ws.setup_demands();

        tracing::debug!(phase = %Phase::PlaceLabs, "timetable generation");
        place_labs(&mut ws)?;

        tracing::debug!(phase = %Phase::PlaceLectures, "timetable generation");
        place_lectures(&mut ws)?;

        tracing::debug!(phase = %Phase::FillGaps, "timetable generation");
        let filled = fill_gaps(&mut ws)?;

        tracing::debug!(phase = %Phase::Done, "timetable generation");
        let faculty = ws.ledger.faculty_count();
        let timetable = ws.into_timetable();
        tracing::info!(
            divisions = timetable.divisions.len(),
            days = timetable.days.len(),
            slots = timetable.num_slots(),
            faculty,
            gap_filled = filled,
            shortfalls = timetable.shortfalls.len(),
            "timetable generated"
        );
        Ok(timetable)
    }
}

/// Generates a timetable with a default [`TimetableGenerator`].
pub fn generate(input: &TimetableInput) -> Result<Timetable, TimetableError> {
    TimetableGenerator::new().generate(input)
}
