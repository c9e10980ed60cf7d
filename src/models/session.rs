//! Session model.
//!
//! A session is one scheduled unit occupying a single grid cell.
//! A lab block is two Lab sessions in adjacent cells.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled unit (lecture, lab, or recess).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Subject taught. `None` for recess.
    pub subject: Option<String>,
    /// Faculty teaching. `None` for recess.
    pub faculty: Option<String>,
    /// Session classification.
    pub kind: SessionKind,
}

/// Session classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// Single-slot lecture.
    Lecture,
    /// One half of a two-slot lab block.
    Lab,
    /// Fixed non-teaching break.
    Recess,
}

impl Session {
    /// Creates a lecture session.
    pub fn lecture(subject: impl Into<String>, faculty: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            faculty: Some(faculty.into()),
            kind: SessionKind::Lecture,
        }
    }

    /// Creates a lab session.
    pub fn lab(subject: impl Into<String>, faculty: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            faculty: Some(faculty.into()),
            kind: SessionKind::Lab,
        }
    }

    /// Creates a recess session.
    pub fn recess() -> Self {
        Self {
            subject: None,
            faculty: None,
            kind: SessionKind::Recess,
        }
    }

    #[inline]
    pub fn is_recess(&self) -> bool {
        self.kind == SessionKind::Recess
    }

    /// Whether this is a teaching session taught by `faculty`.
    pub fn is_taught_by(&self, faculty: &str) -> bool {
        !self.is_recess() && self.faculty.as_deref() == Some(faculty)
    }
}

impl SessionKind {
    /// Label used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "Lecture",
            SessionKind::Lab => "Lab",
            SessionKind::Recess => "Recess",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_recess() {
            return f.write_str("[RECESS]");
        }
        let subject = self.subject.as_deref().unwrap_or("---");
        let faculty = self.faculty.as_deref().unwrap_or("---");
        write!(f, "{faculty} ({subject}) - {}", self.kind)
    }
}
