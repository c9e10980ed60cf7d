//! Timetabling domain models.
//!
//! Provides the data types for describing a weekly timetabling problem
//! and its solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | Division | Class section receiving a timetable |
//! | Faculty | Instructor, limited to a number of slot-units per day |
//! | Session | One occupied (division, day, slot) cell |
//! | Timetable | Complete weekly grid for all divisions |
//! | Shortfall | Requirement only partly placed |

mod grid;
mod input;
mod plan;
mod recess;
mod session;
mod timetable;

pub use grid::Grid;
pub(crate) use input::clean_names;
pub use input::{GenerationMode, TimetableConfig, TimetableInput};
pub use plan::{synthesized_faculty, PlanEntry, SubjectPlan, SYNTHESIZED_FACULTY_PREFIX};
pub use recess::RecessRange;
pub use session::{Session, SessionKind};
pub use timetable::{CellRef, Shortfall, ShortfallKind, Timetable};
