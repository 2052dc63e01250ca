use chrono::{DateTime, Duration, TimeZone, Utc};

use super::AppointmentStore;
use crate::model::{status, AppointmentDraft};
use crate::seed;

/// A complete, valid draft. Creation time grows with a numeric `id`, so the
/// newest-first order of a query is the reverse of the ids.
pub fn draft(id: &str) -> AppointmentDraft {
    let created = created_at(id.parse().unwrap_or(0));
    AppointmentDraft {
        id: Some(id.to_string()),
        description: Some("Плановый осмотр".to_string()),
        created_at: Some(created),
        author: Some("Иванов И.И.".to_string()),
        photo_link: None,
        patient_id: Some(1),
        doctor_id: Some(1),
        appointment_date: Some(created + Duration::days(3)),
        status: Some(status::SCHEDULED.to_string()),
        specialization: Some("Терапевт".to_string()),
    }
}

fn created_at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap() + Duration::minutes(offset_minutes)
}

pub struct StoreFixture {
    pub store: AppointmentStore,
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreFixture {
    pub fn new() -> Self {
        Self {
            store: AppointmentStore::new(),
        }
    }

    /// Adds `count` uniform drafts with ids "1".."count".
    pub fn with_drafts(mut self, count: usize) -> Self {
        for i in 1..=count {
            assert!(self.store.insert(draft(&i.to_string())));
        }
        self
    }

    /// Adds the clinic sample data set (see [`crate::seed`]).
    pub fn with_sample(mut self, count: usize) -> Self {
        self.store.insert_all(seed::sample_appointments(count));
        self
    }

    pub fn with_draft(mut self, draft: AppointmentDraft) -> Self {
        assert!(self.store.insert(draft));
        self
    }
}
