//! Per-run scheduling state.
//!
//! A [`Workspace`] owns everything one generation run mutates: the grid,
//! the faculty ledger, and the division-day lab flags. It is created at
//! the start of a run, consumed into a [`Timetable`] at the end, and never
//! shared between runs.
//!
//! Subject requirements are flattened into [`Demand`]s here so the
//! placers run identically for plan and uniform mode.

use super::ledger::{FacultyId, FacultyLedger};
use crate::error::GridError;
use crate::models::{
    GenerationMode, Grid, Session, Shortfall, ShortfallKind, SubjectPlan, Timetable,
    TimetableConfig,
};

/// One subject requirement for one division, with its faculty resolved.
#[derive(Debug, Clone)]
pub(crate) struct Demand {
    pub subject: String,
    pub faculty: FacultyId,
    pub count: u32,
}

/// Requirements of one division, in placement order.
#[derive(Debug, Clone, Default)]
pub(crate) struct DivisionDemands {
    /// Lab blocks to place.
    pub labs: Vec<Demand>,
    /// Lectures to place.
    pub lectures: Vec<Demand>,
    /// Gap-fill candidates (subject, lecture faculty), tried in order.
    pub fill: Vec<(String, FacultyId)>,
}

/// Mutable state of one generation run.
#[derive(Debug)]
pub(crate) struct Workspace<'a> {
    pub config: &'a TimetableConfig,
    pub grid: Grid,
    pub ledger: FacultyLedger,
    /// `lab_days[division * days + day]`
    lab_days: Vec<bool>,
    pub demands: Vec<DivisionDemands>,
    pub shortfalls: Vec<Shortfall>,
}

impl<'a> Workspace<'a> {
    /// Builds the grid with recesses written in.
    pub fn new(config: &'a TimetableConfig) -> Self {
        let divisions = config.divisions.len();
        let days = config.days.len();
        Self {
            config,
            grid: Grid::with_recesses(divisions, days, config.num_slots, &config.recesses),
            ledger: FacultyLedger::new(days),
            lab_days: vec![false; divisions * days],
            demands: Vec::new(),
            shortfalls: Vec::new(),
        }
    }

    /// Resolves subject requirements and registers every faculty.
    pub fn setup_demands(&mut self) {
        let divisions = self.config.divisions.len();
        self.demands = match &self.config.mode {
            GenerationMode::Plan { by_division } => by_division
                .iter()
                .map(|subjects| plan_demands(&mut self.ledger, subjects))
                .collect(),
            GenerationMode::Uniform {
                subjects,
                lab_subjects,
                lectures_per_subject,
                labs_per_subject,
            } => {
                let lecture_plans: Vec<SubjectPlan> = subjects
                    .iter()
                    .map(|s| SubjectPlan::uniform(s.as_str(), *lectures_per_subject, 0))
                    .collect();
                let lab_plans: Vec<SubjectPlan> = lab_subjects
                    .iter()
                    .map(|s| SubjectPlan::uniform(s.as_str(), 0, *labs_per_subject))
                    .collect();
                let shared = uniform_demands(&mut self.ledger, &lecture_plans, &lab_plans);
                vec![shared; divisions]
            }
        };
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.config.num_slots
    }

    #[inline]
    pub fn day_count(&self) -> usize {
        self.config.days.len()
    }

    #[inline]
    pub fn cap(&self) -> u32 {
        self.config.max_lectures_per_day
    }

    /// Name of a faculty registered in this run's ledger.
    pub fn faculty_name(&self, faculty: FacultyId) -> &str {
        self.ledger.name(faculty).unwrap_or_default()
    }

    pub fn has_lab(&self, division: usize, day: usize) -> bool {
        self.lab_days[division * self.day_count() + day]
    }

    pub fn set_lab(&mut self, division: usize, day: usize) {
        let idx = division * self.day_count() + day;
        self.lab_days[idx] = true;
    }

    /// Whether the slot before `slot` holds a teaching session of `faculty`.
    ///
    /// Only the preceding slot is checked; the following slot never is.
    pub fn follows_same_faculty(
        &self,
        division: usize,
        day: usize,
        slot: usize,
        faculty: FacultyId,
    ) -> bool {
        if slot <= 1 {
            return false;
        }
        let name = self.faculty_name(faculty);
        self.grid
            .get(division, day, slot - 1)
            .is_some_and(|prev| prev.is_taught_by(name))
    }

    /// Whether a lecture of `faculty` may go into a cell.
    pub fn can_take_lecture(
        &self,
        division: usize,
        day: usize,
        slot: usize,
        faculty: FacultyId,
    ) -> bool {
        self.grid.is_free(division, day, slot)
            && !self.ledger.is_busy(day, slot, faculty)
            && !self.follows_same_faculty(division, day, slot, faculty)
    }

    /// Writes a lecture and books the faculty for one unit.
    pub fn place_lecture(
        &mut self,
        division: usize,
        day: usize,
        slot: usize,
        subject: &str,
        faculty: FacultyId,
    ) -> Result<(), GridError> {
        let session = Session::lecture(subject, self.faculty_name(faculty));
        self.grid.place(division, day, slot, session)?;
        self.ledger.mark_busy(day, slot, faculty);
        self.ledger.increment_count(faculty, day, 1);
        Ok(())
    }

    /// Records a partly placed requirement.
    pub fn record_shortfall(
        &mut self,
        kind: ShortfallKind,
        division: usize,
        demand: &Demand,
        placed: u32,
    ) {
        let shortfall = Shortfall {
            kind,
            division: self.config.divisions[division].clone(),
            subject: demand.subject.clone(),
            faculty: self.faculty_name(demand.faculty).to_string(),
            requested: demand.count,
            placed,
        };
        tracing::warn!(
            kind = ?shortfall.kind,
            division = %shortfall.division,
            subject = %shortfall.subject,
            faculty = %shortfall.faculty,
            requested = shortfall.requested,
            placed = shortfall.placed,
            "could not place all sessions"
        );
        self.shortfalls.push(shortfall);
    }

    /// Finishes the run.
    pub fn into_timetable(self) -> Timetable {
        Timetable {
            days: self.config.days.clone(),
            divisions: self.config.divisions.clone(),
            grid: self.grid,
            shortfalls: self.shortfalls,
        }
    }
}

fn plan_demands(ledger: &mut FacultyLedger, subjects: &[SubjectPlan]) -> DivisionDemands {
    let mut out = DivisionDemands::default();
    for sp in subjects {
        let lecture_faculty = ledger.register(&sp.lecture_faculty);
        let lab_faculty = ledger.register(&sp.lab_faculty);
        out.labs.push(Demand {
            subject: sp.subject.clone(),
            faculty: lab_faculty,
            count: sp.labs_per_week,
        });
        out.lectures.push(Demand {
            subject: sp.subject.clone(),
            faculty: lecture_faculty,
            count: sp.lectures_per_week,
        });
        out.fill.push((sp.subject.clone(), lecture_faculty));
    }
    out
}

fn uniform_demands(
    ledger: &mut FacultyLedger,
    lecture_plans: &[SubjectPlan],
    lab_plans: &[SubjectPlan],
) -> DivisionDemands {
    let mut out = DivisionDemands::default();
    for sp in lecture_plans {
        let faculty = ledger.register(&sp.lecture_faculty);
        out.lectures.push(Demand {
            subject: sp.subject.clone(),
            faculty,
            count: sp.lectures_per_week,
        });
        out.fill.push((sp.subject.clone(), faculty));
    }
    for sp in lab_plans {
        out.labs.push(Demand {
            subject: sp.subject.clone(),
            faculty: ledger.register(&sp.lab_faculty),
            count: sp.labs_per_week,
        });
    }
    out
}
