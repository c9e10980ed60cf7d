//! Greedy timetable allocation and summary metrics.
//!
//! # Algorithm
//!
//! `TimetableGenerator` runs a single greedy pass: lab blocks first, then
//! lectures with a round-robin day/slot cursor, then a gap-filling sweep.
//! It never backtracks and does not guarantee every requested session is
//! placed; unplaced requirements are reported as shortfalls.
//!
//! # Constraints
//!
//! - Recess cells are immovable.
//! - A faculty teaches at most one cell per (day, slot) across all divisions.
//! - A faculty occupies at most `max_lectures_per_day` slot-units per day
//!   (a lab block costs 2).
//! - At most one lab block per division per day.
//! - A lecture never directly follows a session of the same faculty.
//!
//! # Metrics
//!
//! `TimetableStats` computes fill rate, lab block count, per-faculty load,
//! and missing sessions.

mod gap_fill;
mod generator;
mod lab;
mod lecture;
mod ledger;
mod stats;
mod workspace;

pub use generator::{generate, Phase, TimetableGenerator};
pub use lab::LAB_BLOCK_UNITS;
pub use ledger::{FacultyId, FacultyLedger};
pub use stats::TimetableStats;
