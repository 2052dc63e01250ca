//! Rendering of store results for the terminal.
//!
//! Text output is a padded table for listings and a key/value block for single
//! records. Column widths use display width, so Cyrillic names line up. JSON
//! output is the record wire shape, pretty printed.

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use medcenter::model::status;
use medcenter::{seed, Appointment, ValidationError};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::setup::OutputFormat;

const HEADERS: [&str; 7] = [
    "ID",
    "CREATED",
    "VISIT",
    "STATUS",
    "SPECIALIZATION",
    "AUTHOR",
    "DESCRIPTION",
];

pub fn render_list(apps: &[Appointment], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(apps)?),
        OutputFormat::Text => Ok(render_table(apps)),
    }
}

pub fn render_one(app: &Appointment, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(app)?),
        OutputFormat::Text => Ok(render_detail(app)),
    }
}

fn render_table(apps: &[Appointment]) -> String {
    if apps.is_empty() {
        return "No appointments.".to_string();
    }

    let rows: Vec<[String; 7]> = apps.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.width());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_padded(&HEADERS.map(String::from), &widths, |_, s| {
        style(s).bold().to_string()
    }));
    for r in &rows {
        lines.push(join_padded(r, &widths, |col, s| {
            if col == 3 {
                styled_status(s)
            } else {
                s.to_string()
            }
        }));
    }
    lines.join("\n")
}

fn row(app: &Appointment) -> [String; 7] {
    [
        app.id().to_string(),
        fmt_time(app.created_at()),
        fmt_time(app.appointment_date()),
        app.status().to_string(),
        app.specialization().unwrap_or("-").to_string(),
        app.author().to_string(),
        app.description().to_string(),
    ]
}

/// Pads every cell to its column width, then styles it. Padding happens on the
/// plain text so escape codes never count toward the width.
fn join_padded<F>(cells: &[String; 7], widths: &[usize; 7], paint: F) -> String
where
    F: Fn(usize, &str) -> String,
{
    let last = cells.len() - 1;
    cells
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let painted = paint(col, cell);
            if col == last {
                painted
            } else {
                let fill = widths[col].saturating_sub(cell.width());
                format!("{}{}", painted, " ".repeat(fill))
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn styled_status(s: &str) -> String {
    match s {
        status::COMPLETED => style(s).green().to_string(),
        status::CANCELLED => style(s).red().to_string(),
        status::SCHEDULED => style(s).cyan().to_string(),
        _ => s.to_string(),
    }
}

fn render_detail(app: &Appointment) -> String {
    let fields = [
        ("id", app.id().to_string()),
        ("description", app.description().to_string()),
        ("created", fmt_time(app.created_at())),
        ("author", app.author().to_string()),
        ("photo", app.photo_link().unwrap_or("-").to_string()),
        ("patient", app.patient_id().to_string()),
        ("doctor", doctor_label(app.doctor_id())),
        ("visit", fmt_time(app.appointment_date())),
        ("status", styled_status(app.status())),
        ("specialization", app.specialization().unwrap_or("-").to_string()),
    ];

    fields
        .iter()
        .map(|(k, v)| format!("{:<15} {}", style(format!("{}:", k)).dim(), v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn doctor_label(doctor_id: u64) -> String {
    match seed::doctor_name(doctor_id) {
        Some(name) => format!("{} ({})", doctor_id, name),
        None => doctor_id.to_string(),
    }
}

fn fmt_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// Outcome of checking one record from a file.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub index: usize,
    pub id: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    pub fn new(index: usize, id: Option<String>, outcome: Result<(), ValidationError>) -> Self {
        let error = outcome.err().map(|e| e.to_string());
        Self {
            index,
            id,
            valid: error.is_none(),
            error,
        }
    }
}

pub fn render_checks(reports: &[CheckReport], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(reports)?);
    }

    let mut lines: Vec<String> = reports
        .iter()
        .map(|r| {
            let label = r
                .id
                .clone()
                .unwrap_or_else(|| format!("#{}", r.index + 1));
            match &r.error {
                None => format!("{} {}", style("ok").green(), label),
                Some(e) => format!("{} {}: {}", style("invalid").red(), label, e),
            }
        })
        .collect();

    let valid = reports.iter().filter(|r| r.valid).count();
    lines.push(format!(
        "{} valid, {} invalid",
        valid,
        reports.len() - valid
    ));
    Ok(lines.join("\n"))
}
