//! # Query Pipeline
//!
//! Listing appointments always goes through the same fixed pipeline:
//!
//! ```text
//! snapshot ─▶ author ─▶ status ─▶ specialization ─▶ date range ─▶ sort ─▶ page
//! ```
//!
//! 1. **Snapshot**: the records are cloned; nothing done to the result reaches the store.
//! 2. **Author**: case-insensitive substring match.
//! 3. **Status**: exact match.
//! 4. **Specialization**: exact match. Records without a specialization never match.
//! 5. **Date range**: `appointment_date` within `[date_from, date_to]`, inclusive.
//!    Applied only when *both* bounds are given; a single bound is ignored.
//! 6. **Sort**: `created_at` descending. Unconditional, and stable for ties.
//! 7. **Page**: skip `skip`, take at most `top`. Out-of-range offsets give an empty page.
//!
//! Empty strings in the filter count as "not set", same as `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Appointment;

pub const DEFAULT_TOP: usize = 10;

/// Which appointments to keep. Every criterion is optional; all set criteria
/// must match (AND logic).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentFilter {
    pub author: Option<String>,
    pub status: Option<String>,
    pub specialization: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl AppointmentFilter {
    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Default::default()
        }
    }

    pub fn by_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    pub fn by_specialization(specialization: impl Into<String>) -> Self {
        Self {
            specialization: Some(specialization.into()),
            ..Default::default()
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Default::default()
        }
    }

    /// Check if an appointment satisfies every set criterion.
    pub fn matches(&self, app: &Appointment) -> bool {
        if let Some(needle) = set(&self.author) {
            if !app.author().to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(status) = set(&self.status) {
            if app.status() != status {
                return false;
            }
        }

        if let Some(specialization) = set(&self.specialization) {
            if app.specialization() != Some(specialization) {
                return false;
            }
        }

        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            let date = app.appointment_date();
            if date < from || date > to {
                return false;
            }
        }

        true
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: usize,
    pub top: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            top: DEFAULT_TOP,
        }
    }
}

impl Page {
    pub fn new(skip: usize, top: usize) -> Self {
        Self { skip, top }
    }
}

/// Runs the full pipeline over `records` and returns an owned page.
pub fn run<'a, I>(records: I, filter: &AppointmentFilter, page: Page) -> Vec<Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut result: Vec<Appointment> = records
        .into_iter()
        .filter(|app| filter.matches(app))
        .cloned()
        .collect();

    result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    result.into_iter().skip(page.skip).take(page.top).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentDraft;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, day, 10, 0, 0).unwrap()
    }

    fn app(id: &str, author: &str, status: &str, spec: Option<&str>, day: u32) -> Appointment {
        Appointment::try_from(AppointmentDraft {
            id: Some(id.into()),
            description: Some("Плановый осмотр".into()),
            created_at: Some(at(day)),
            author: Some(author.into()),
            patient_id: Some(1),
            doctor_id: Some(1),
            appointment_date: Some(at(day) + Duration::days(3)),
            status: Some(status.into()),
            specialization: spec.map(String::from),
            ..Default::default()
        })
        .unwrap()
    }

    fn sample() -> Vec<Appointment> {
        vec![
            app("1", "Иванов И.И.", "Завершен", Some("Терапевт"), 1),
            app("2", "Петрова А.С.", "Отменен", Some("Хирург"), 2),
            app("3", "иванова Е.А.", "Завершен", None, 3),
            app("4", "Сидоров В.В.", "Запланирован", Some("Терапевт"), 4),
        ]
    }

    fn ids(apps: &[Appointment]) -> Vec<&str> {
        apps.iter().map(|a| a.id()).collect()
    }

    #[test]
    fn default_filter_sorts_newest_first() {
        let records = sample();
        let result = run(&records, &AppointmentFilter::default(), Page::default());
        assert_eq!(ids(&result), vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn author_is_case_insensitive_substring() {
        let records = sample();
        let result = run(&records, &AppointmentFilter::by_author("ИВАНОВ"), Page::default());
        assert_eq!(ids(&result), vec!["3", "1"]);
    }

    #[test]
    fn status_is_exact() {
        let records = sample();
        let result = run(&records, &AppointmentFilter::by_status("Завершен"), Page::default());
        assert_eq!(ids(&result), vec!["3", "1"]);

        let result = run(&records, &AppointmentFilter::by_status("завершен"), Page::default());
        assert!(result.is_empty());
    }

    #[test]
    fn specialization_skips_records_without_one() {
        let records = sample();
        let result = run(
            &records,
            &AppointmentFilter::by_specialization("Терапевт"),
            Page::default(),
        );
        assert_eq!(ids(&result), vec!["4", "1"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let records = sample();
        // Appointment dates are creation + 3 days: Nov 4, 5, 6, 7
        let filter = AppointmentFilter::between(at(5), at(6));
        let result = run(&records, &filter, Page::default());
        assert_eq!(ids(&result), vec!["3", "2"]);
    }

    #[test]
    fn single_date_bound_is_ignored() {
        let records = sample();
        let filter = AppointmentFilter {
            date_from: Some(at(30)),
            ..Default::default()
        };
        assert_eq!(run(&records, &filter, Page::default()).len(), 4);

        let filter = AppointmentFilter {
            date_to: Some(at(1)),
            ..Default::default()
        };
        assert_eq!(run(&records, &filter, Page::default()).len(), 4);
    }

    #[test]
    fn empty_strings_do_not_filter() {
        let records = sample();
        let filter = AppointmentFilter {
            author: Some(String::new()),
            status: Some(String::new()),
            specialization: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(run(&records, &filter, Page::default()).len(), 4);
    }

    #[test]
    fn criteria_combine_with_and() {
        let records = sample();
        let filter = AppointmentFilter {
            author: Some("иван".into()),
            specialization: Some("Терапевт".into()),
            ..Default::default()
        };
        assert_eq!(ids(&run(&records, &filter, Page::default())), vec!["1"]);
    }

    #[test]
    fn pagination_windows() {
        let records = sample();
        let filter = AppointmentFilter::default();

        assert_eq!(ids(&run(&records, &filter, Page::new(0, 2))), vec!["4", "3"]);
        assert_eq!(ids(&run(&records, &filter, Page::new(2, 2))), vec!["2", "1"]);
        assert_eq!(ids(&run(&records, &filter, Page::new(3, 10))), vec!["1"]);
        assert!(run(&records, &filter, Page::new(10, 5)).is_empty());
        assert!(run(&records, &filter, Page::new(0, 0)).is_empty());
    }

    #[test]
    fn equal_creation_times_keep_insertion_order() {
        let records = vec![
            app("a", "X", "S", None, 5),
            app("b", "X", "S", None, 5),
            app("c", "X", "S", None, 6),
        ];
        let result = run(&records, &AppointmentFilter::default(), Page::default());
        assert_eq!(ids(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn filter_decodes_from_json() {
        let filter: AppointmentFilter =
            serde_json::from_value(serde_json::json!({ "status": "Завершен" })).unwrap();
        assert_eq!(filter, AppointmentFilter::by_status("Завершен"));
    }
}
