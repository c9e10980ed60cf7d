//! Input validation for timetable generation.
//!
//! Checks the structural integrity of the raw input before any grid is
//! built. Detects:
//! - Empty day or division lists
//! - Non-positive slot counts
//! - Duplicate day or division names
//! - Grids larger than [`MAX_GRID_CELLS`]
//! - Plan lists that do not line up with the divisions (configs only)
//!
//! Every problem is collected so the caller can report them together.

use std::collections::HashSet;

use crate::models::{clean_names, GenerationMode, TimetableConfig, TimetableInput};

/// Upper bound on `divisions × days × slots`. The grid is allocated up
/// front, so anything larger is rejected before allocation.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No (non-blank) days configured.
    EmptyDays,
    /// No (non-blank) divisions configured.
    EmptyDivisions,
    /// Slot count is zero or negative.
    NonPositiveSlots,
    /// Two days or two divisions share a name.
    DuplicateId,
    /// `divisions × days × slots` exceeds [`MAX_GRID_CELLS`].
    GridTooLarge,
    /// Plan mode carries a subject list count different from the division count.
    PlanMismatch,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the raw input for a generation run.
///
/// Checks:
/// 1. At least one day after trimming blanks
/// 2. At least one division after trimming blanks
/// 3. `num_slots > 0`
/// 4. No duplicate day names
/// 5. No duplicate division names
/// 6. Grid size within [`MAX_GRID_CELLS`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &TimetableInput) -> ValidationResult {
    let days = clean_names(&input.days);
    let divisions = clean_names(&input.divisions);
    let errors = check_shape(&days, &divisions, i64::from(input.num_slots));
    finish(errors)
}

/// Validates an already normalized configuration.
///
/// Runs the same shape checks as [`validate_input`] on the config's own
/// fields and, in plan mode, requires one subject list per division.
pub fn validate_config(config: &TimetableConfig) -> ValidationResult {
    let slots = i64::try_from(config.num_slots).unwrap_or(i64::MAX);
    let mut errors = check_shape(&config.days, &config.divisions, slots);

    if let GenerationMode::Plan { by_division } = &config.mode {
        if by_division.len() != config.divisions.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::PlanMismatch,
                format!(
                    "Plan has {} division lists for {} divisions",
                    by_division.len(),
                    config.divisions.len()
                ),
            ));
        }
    }
    finish(errors)
}

fn check_shape(days: &[String], divisions: &[String], num_slots: i64) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDays,
            "No days configured",
        ));
    }
    if divisions.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDivisions,
            "No divisions configured",
        ));
    }
    if num_slots <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveSlots,
            format!("numSlots must be positive, got {num_slots}"),
        ));
    } else {
        let cells = usize::try_from(num_slots)
            .ok()
            .and_then(|s| s.checked_mul(days.len()))
            .and_then(|c| c.checked_mul(divisions.len()));
        if cells.map_or(true, |c| c > MAX_GRID_CELLS) {
            errors.push(ValidationError::new(
                ValidationErrorKind::GridTooLarge,
                format!(
                    "{} divisions x {} days x {num_slots} slots exceeds {MAX_GRID_CELLS} cells",
                    divisions.len(),
                    days.len()
                ),
            ));
        }
    }

    check_duplicates("day", days, &mut errors);
    check_duplicates("division", divisions, &mut errors);
    errors
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_duplicates(label: &str, names: &[String], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label}: {name}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectPlan;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_input() {
        let input = TimetableInput::new(names(&["Mon", "Tue"]), 6, names(&["A"]));
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_empty_days() {
        let input = TimetableInput::new(vec![], 6, names(&["A"]));
        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDays));
    }

    #[test]
    fn test_blank_days_count_as_empty() {
        let input = TimetableInput::new(names(&[" ", ""]), 6, names(&["A"]));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyDays);
    }

    #[test]
    fn test_empty_divisions() {
        let input = TimetableInput::new(names(&["Mon"]), 6, vec![]);
        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDivisions));
    }

    #[test]
    fn test_non_positive_slots() {
        for slots in [0, -4] {
            let input = TimetableInput::new(names(&["Mon"]), slots, names(&["A"]));
            let errors = validate_input(&input).unwrap_err();
            assert!(errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::NonPositiveSlots));
        }
    }

    #[test]
    fn test_duplicate_names() {
        let input = TimetableInput::new(names(&["Mon", " Mon"]), 6, names(&["A", "B", "A"]));
        let errors = validate_input(&input).unwrap_err();
        let dups: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dups.len(), 2);
        assert!(dups[0].message.contains("day"));
        assert!(dups[1].message.contains("division"));
    }

    #[test]
    fn test_multiple_errors() {
        let input = TimetableInput::new(vec![], 0, vec![]);
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_oversized_grid() {
        let input = TimetableInput::new(names(&["Mon"]), i32::MAX, names(&["A"]));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::GridTooLarge);

        let at_limit = TimetableInput::new(names(&["Mon", "Tue"]), 1 << 19, names(&["A"]));
        assert!(validate_input(&at_limit).is_ok());
        let over = TimetableInput::new(names(&["Mon", "Tue"]), (1 << 19) + 1, names(&["A"]));
        assert!(validate_input(&over).is_err());
    }

    #[test]
    fn test_config_rechecked() {
        let input = TimetableInput::new(names(&["Mon"]), 4, names(&["A"]));
        let mut config = TimetableConfig::from_input(&input).unwrap();
        assert!(validate_config(&config).is_ok());

        config.days.clear();
        config.num_slots = 0;
        let kinds: Vec<_> = validate_config(&config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![ValidationErrorKind::EmptyDays, ValidationErrorKind::NonPositiveSlots]
        );
    }

    #[test]
    fn test_config_plan_mismatch() {
        let input = TimetableInput::new(names(&["Mon"]), 4, names(&["A"]));
        let mut config = TimetableConfig::from_input(&input).unwrap();
        config.mode = GenerationMode::Plan {
            by_division: vec![vec![], vec![SubjectPlan::uniform("X", 1, 0)]],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::PlanMismatch);
        assert!(errors[0].message.contains("2 division lists for 1 divisions"));
    }

    #[test]
    fn test_config_huge_slot_count() {
        let input = TimetableInput::new(names(&["Mon"]), 4, names(&["A"]));
        let mut config = TimetableConfig::from_input(&input).unwrap();
        config.num_slots = usize::MAX;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::GridTooLarge);
    }
}
