//! Weekly timetable allocation for the U-Engine ecosystem.
//!
//! Assigns lectures and two-slot lab blocks to a grid of
//! (division, day, slot) cells while honoring faculty availability,
//! daily load caps, lab contiguity, and fixed recess breaks.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimetableInput`, `TimetableConfig`,
//!   `PlanEntry`, `SubjectPlan`, `RecessRange`, `Session`, `Grid`, `Timetable`
//! - **`validation`**: Input integrity checks (empty lists, slot count, duplicates)
//! - **`scheduler`**: Greedy generator (labs, lectures, gap fill), faculty
//!   ledger, and timetable metrics
//! - **`parse`**: Intake-form field parsing (lists, recess ranges, plan CSV/JSON)
//! - **`export`**: Flat allocation rows and CSV output
//! - **`render`**: Display categories and per-division HTML tables
//! - **`history`**: In-memory run history with versioning
//!
//! # Example
//!
//! ```
//! use u_timetable::models::TimetableInput;
//! use u_timetable::scheduler::generate;
//!
//! let input = TimetableInput::new(vec!["Mon".into()], 3, vec!["A".into()])
//!     .with_max_per_day(3)
//!     .with_uniform(vec!["Math".into(), "Art".into()], vec![], 1, 0);
//!
//! let timetable = generate(&input).unwrap();
//! let csv = u_timetable::export::to_csv(&timetable).unwrap();
//! assert!(csv.starts_with("Division,Day,Slot,Type,Faculty,Subject\n"));
//! ```
//!
//! # Scope
//!
//! The generator is best-effort, first-fit, and single-pass. It does not
//! search for an optimal schedule, does not backtrack, and reports
//! requirements it could not place instead of failing.

pub mod error;
pub mod export;
pub mod history;
pub mod models;
pub mod parse;
pub mod render;
pub mod scheduler;
pub mod validation;

pub use error::TimetableError;
