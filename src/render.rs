//! Per-division table rendering.
//!
//! Maps every cell to a display category and renders one HTML table per
//! division: one row per slot (`S1..Sn`), one column per day.

use std::fmt::Write;

use crate::models::{Session, SessionKind, Timetable};

/// Display category of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCategory {
    Lecture,
    Lab,
    Recess,
    Free,
}

impl CellCategory {
    /// Category for an optional session.
    pub fn of(session: Option<&Session>) -> Self {
        match session.map(|s| s.kind) {
            Some(SessionKind::Lecture) => CellCategory::Lecture,
            Some(SessionKind::Lab) => CellCategory::Lab,
            Some(SessionKind::Recess) => CellCategory::Recess,
            None => CellCategory::Free,
        }
    }

    /// CSS class for the cell.
    pub fn css_class(&self) -> &'static str {
        match self {
            CellCategory::Lecture => "lec",
            CellCategory::Lab => "lab",
            CellCategory::Recess => "recess",
            CellCategory::Free => "free",
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            CellCategory::Lecture => "LECTURE",
            CellCategory::Lab => "LAB",
            CellCategory::Recess => "RECESS",
            CellCategory::Free => "Free",
        }
    }
}

/// Renders one HTML table per division, in division order.
pub fn render_html(timetable: &Timetable) -> Vec<(String, String)> {
    timetable
        .divisions
        .iter()
        .enumerate()
        .map(|(d, name)| (name.clone(), render_division(timetable, d)))
        .collect()
}

fn render_division(timetable: &Timetable, division: usize) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<table data-division=\"{}\"><thead><tr><th>Slot</th>",
        escape_html(&timetable.divisions[division])
    );
    for day in &timetable.days {
        let _ = write!(html, "<th>{}</th>", escape_html(day));
    }
    html.push_str("</tr></thead><tbody>");

    for slot in 1..=timetable.num_slots() {
        let _ = write!(html, "<tr><td>S{slot}</td>");
        for day in 0..timetable.days.len() {
            let session = timetable.grid.get(division, day, slot);
            let category = CellCategory::of(session);
            let _ = write!(
                html,
                "<td class=\"{cls}\"><div class=\"cell\"><span class=\"pill {cls}\">{label}</span>",
                cls = category.css_class(),
                label = category.label()
            );
            if let Some(s) = session.filter(|s| !s.is_recess()) {
                let _ = write!(
                    html,
                    "<span>{} ({})</span>",
                    escape_html(s.faculty.as_deref().unwrap_or("---")),
                    escape_html(s.subject.as_deref().unwrap_or("---"))
                );
            }
            html.push_str("</div></td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Escapes `&`, `<`, `>`, and `"`.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
