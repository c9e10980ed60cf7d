//! Parsing of raw intake-form fields.
//!
//! The intake form submits comma-separated lists, recess ranges written
//! as `start-end`, and an optional subject plan either as CSV text or as
//! a JSON array of table rows.

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::error::ParseError;
use crate::models::{PlanEntry, RecessRange};

/// Splits a comma-separated field into trimmed, non-empty entries.
pub fn parse_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `"3-3, 5-6"` into recess ranges. A blank field yields none.
pub fn parse_recess_ranges(field: &str) -> Result<Vec<RecessRange>, ParseError> {
    if field.trim().is_empty() {
        return Ok(Vec::new());
    }
    field
        .split(',')
        .map(|token| {
            let token = token.trim();
            let invalid = || ParseError::InvalidRecess(token.to_string());
            let (start, end) = token.split_once('-').ok_or_else(invalid)?;
            let start = start.trim().parse::<i32>().map_err(|_| invalid())?;
            let end = end.trim().parse::<i32>().map_err(|_| invalid())?;
            Ok(RecessRange::new(start, end))
        })
        .collect()
}

/// Parses plan CSV text.
///
/// Each record is `division,subject,lectures,labs,lectureFaculty,labFaculty`.
/// Fields are trimmed and may be quoted. Blank lines and lines starting
/// with `#` are skipped; records with fewer than six columns are ignored.
pub fn parse_plan_csv(text: &str) -> Result<Vec<PlanEntry>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cols: Vec<&str> = record.iter().collect();
        if cols.len() < 6 {
            continue;
        }
        let mut entry = PlanEntry::new(cols[0], cols[1])
            .with_lectures(parse_count("lectures", cols[2])?)
            .with_labs(parse_count("labs", cols[3])?);
        if !cols[4].is_empty() {
            entry = entry.with_lecture_faculty(cols[4]);
        }
        if !cols[5].is_empty() {
            entry = entry.with_lab_faculty(cols[5]);
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Parses the plan table rows sent by the form as JSON.
///
/// Counts may be numbers or numeric strings; anything else counts as 0.
/// A blank field yields no rows.
///
/// # Errors
/// [`ParseError::Json`] if the text is not a JSON array of row objects.
pub fn parse_plan_json(text: &str) -> Result<Vec<PlanEntry>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<PlanRow> = serde_json::from_str(text)?;
    Ok(rows.into_iter().map(PlanRow::into_entry).collect())
}

fn parse_count(field: &'static str, value: &str) -> Result<i32, ParseError> {
    value.parse::<i32>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct PlanRow {
    #[serde(default)]
    division: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    lectures: Count,
    #[serde(default)]
    labs: Count,
    #[serde(default, rename = "lecFac")]
    lec_fac: String,
    #[serde(default, rename = "labFac")]
    lab_fac: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Number(i64),
    Text(String),
}

impl Default for Count {
    fn default() -> Self {
        Count::Number(0)
    }
}

impl Count {
    fn value(&self) -> i32 {
        match self {
            Count::Number(n) => i32::try_from(*n).unwrap_or(0),
            Count::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

impl PlanRow {
    fn into_entry(self) -> PlanEntry {
        let mut entry = PlanEntry::new(self.division.trim(), self.subject.trim())
            .with_lectures(self.lectures.value())
            .with_labs(self.labs.value());
        if !self.lec_fac.trim().is_empty() {
            entry = entry.with_lecture_faculty(self.lec_fac.trim());
        }
        if !self.lab_fac.trim().is_empty() {
            entry = entry.with_lab_faculty(self.lab_fac.trim());
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" Mon, Tue,, Wed "), vec!["Mon", "Tue", "Wed"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_recess_ranges() {
        let ranges = parse_recess_ranges("3-3, 5 - 6").unwrap();
        assert_eq!(ranges, vec![RecessRange::new(3, 3), RecessRange::new(5, 6)]);
        assert!(parse_recess_ranges("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_recess_invalid() {
        assert!(matches!(
            parse_recess_ranges("3"),
            Err(ParseError::InvalidRecess(t)) if t == "3"
        ));
        assert!(matches!(
            parse_recess_ranges("3-x"),
            Err(ParseError::InvalidRecess(_))
        ));
    }

    #[test]
    fn test_parse_plan_csv() {
        let text = "\
# division,subject,lectures,labs,lecFac,labFac
A, Math, 4, 0, Dr. M,

A,Chem,2,1,Dr. C,Mr. L
B,Bio,3
B,Art,-1,0,,
";
        let entries = parse_plan_csv(text).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].division, "A");
        assert_eq!(entries[0].subject, "Math");
        assert_eq!(entries[0].lectures_per_week, 4);
        assert_eq!(entries[0].lecture_faculty.as_deref(), Some("Dr. M"));
        assert_eq!(entries[0].lab_faculty, None);

        assert_eq!(entries[1].lab_faculty.as_deref(), Some("Mr. L"));

        let art = entries[2].to_subject_plan().unwrap();
        assert_eq!(art.lectures_per_week, 0);
        assert_eq!(art.lecture_faculty, "Faculty-Art");
    }

    #[test]
    fn test_parse_plan_csv_quoted_fields() {
        let text = "A,Chem,2,1,\"Dr. C, PhD\",\n  B ,\"Art \"\"History\"\"\", 1 , 0 ,,\"Ms. Q\"\n";
        let entries = parse_plan_csv(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].lecture_faculty.as_deref(), Some("Dr. C, PhD"));
        assert_eq!(entries[0].lab_faculty, None);
        assert_eq!(entries[1].division, "B");
        assert_eq!(entries[1].subject, "Art \"History\"");
        assert_eq!(entries[1].lab_faculty.as_deref(), Some("Ms. Q"));
    }

    #[test]
    fn test_parse_plan_csv_bad_number() {
        let err = parse_plan_csv("A,Math,four,0,,").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidNumber { field: "lectures", .. }
        ));
    }

    #[test]
    fn test_parse_plan_json() {
        let text = r#"[
            {"division": "A", "subject": "Math", "lectures": "4", "labs": "0", "lecFac": "Dr. M", "labFac": ""},
            {"division": "A", "subject": "Chem", "lectures": 2, "labs": 1},
            {"division": "B", "subject": "Art", "lectures": "lots"}
        ]"#;
        let entries = parse_plan_json(text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].lectures_per_week, 4);
        assert_eq!(entries[0].lecture_faculty.as_deref(), Some("Dr. M"));
        assert_eq!(entries[0].lab_faculty, None);
        assert_eq!(entries[1].labs_per_week, 1);
        assert_eq!(entries[2].lectures_per_week, 0);
    }

    #[test]
    fn test_parse_plan_json_empty_and_invalid() {
        assert!(parse_plan_json("").unwrap().is_empty());
        assert!(matches!(parse_plan_json("{"), Err(ParseError::Json(_))));
    }
}
