//! Subject plan model.
//!
//! In plan mode every division lists its subjects explicitly with weekly
//! lecture/lab counts and the faculty teaching each part. Raw rows
//! ([`PlanEntry`]) come from the intake form; [`SubjectPlan`] is the
//! normalized per-division value the scheduler consumes.

use serde::{Deserialize, Serialize};

/// Prefix for faculty names synthesized from a subject name.
pub const SYNTHESIZED_FACULTY_PREFIX: &str = "Faculty-";

/// Deterministic faculty name for a subject with no explicit faculty.
pub fn synthesized_faculty(subject: &str) -> String {
    format!("{SYNTHESIZED_FACULTY_PREFIX}{}", subject.trim())
}

/// One raw plan row: a subject requirement for one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Division the row applies to.
    pub division: String,
    /// Subject name.
    pub subject: String,
    /// Lectures per week (negative values clamp to 0).
    #[serde(default)]
    pub lectures_per_week: i32,
    /// Lab blocks per week (negative values clamp to 0).
    #[serde(default)]
    pub labs_per_week: i32,
    /// Lecture faculty. Blank = synthesized from the subject.
    #[serde(default)]
    pub lecture_faculty: Option<String>,
    /// Lab faculty. Blank = same as the lecture faculty.
    #[serde(default)]
    pub lab_faculty: Option<String>,
}

/// Normalized per-division subject requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPlan {
    /// Subject name.
    pub subject: String,
    /// Lectures per week.
    pub lectures_per_week: u32,
    /// Two-slot lab blocks per week.
    pub labs_per_week: u32,
    /// Faculty teaching lectures.
    pub lecture_faculty: String,
    /// Faculty supervising labs.
    pub lab_faculty: String,
}

impl PlanEntry {
    /// Creates a row with zero counts and default faculty.
    pub fn new(division: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            division: division.into(),
            subject: subject.into(),
            lectures_per_week: 0,
            labs_per_week: 0,
            lecture_faculty: None,
            lab_faculty: None,
        }
    }

    /// Sets lectures per week.
    pub fn with_lectures(mut self, lectures: i32) -> Self {
        self.lectures_per_week = lectures;
        self
    }

    /// Sets lab blocks per week.
    pub fn with_labs(mut self, labs: i32) -> Self {
        self.labs_per_week = labs;
        self
    }

    /// Sets the lecture faculty.
    pub fn with_lecture_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.lecture_faculty = Some(faculty.into());
        self
    }

    /// Sets the lab faculty.
    pub fn with_lab_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.lab_faculty = Some(faculty.into());
        self
    }

    /// Normalizes this row. Returns `None` for a blank subject.
    pub fn to_subject_plan(&self) -> Option<SubjectPlan> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return None;
        }
        let lecture_faculty =
            non_blank(self.lecture_faculty.as_deref()).unwrap_or_else(|| synthesized_faculty(subject));
        let lab_faculty =
            non_blank(self.lab_faculty.as_deref()).unwrap_or_else(|| lecture_faculty.clone());

        Some(SubjectPlan {
            subject: subject.to_string(),
            lectures_per_week: self.lectures_per_week.max(0) as u32,
            labs_per_week: self.labs_per_week.max(0) as u32,
            lecture_faculty,
            lab_faculty,
        })
    }
}

impl SubjectPlan {
    /// Uniform-mode requirement with synthesized faculty.
    pub fn uniform(subject: impl Into<String>, lectures_per_week: u32, labs_per_week: u32) -> Self {
        let subject = subject.into();
        let faculty = synthesized_faculty(&subject);
        Self {
            subject,
            lectures_per_week,
            labs_per_week,
            lecture_faculty: faculty.clone(),
            lab_faculty: faculty,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
