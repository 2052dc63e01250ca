//! Sample clinic data.
//!
//! Deterministic drafts for demos and tests. Record `i` (1-based) is created on
//! 2025-11-`i` at `10 + i` o'clock (hours past 23 roll into the next day) and
//! `30 * (i % 2)` minutes, with the visit three days later. Names, descriptions,
//! statuses and specializations cycle through fixed lists by `i`.
//!
//! Nothing here runs on its own; callers seed a store explicitly.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::model::{status, AppointmentDraft};

pub const PATIENT_NAMES: [&str; 8] = [
    "Иванов И.И.",
    "Петрова А.С.",
    "Сидоров В.В.",
    "Кузнецова О.П.",
    "Михайлов Д.Е.",
    "Васильева Е.А.",
    "Новиков С.Н.",
    "Морозова И.В.",
];

pub const DOCTOR_NAMES: [&str; 4] = [
    "Петров П.П.",
    "Смирнова Л.И.",
    "Волков А.Б.",
    "Зайцева М.Г.",
];

pub const SPECIALIZATIONS: [&str; 4] = ["Терапевт", "Невролог", "Хирург", "Окулист"];

pub const DESCRIPTIONS: [&str; 7] = [
    "Плановый осмотр",
    "Острая боль",
    "Консультация по результатам анализов",
    "Вторичный прием",
    "Оформление справки",
    "Процедура",
    "Жалобы на самочувствие",
];

/// Builds `count` sample drafts with ids "1".."count".
pub fn sample_appointments(count: usize) -> Vec<AppointmentDraft> {
    (1..=count).map(sample_appointment).collect()
}

/// The `i`-th sample draft (1-based).
pub fn sample_appointment(i: usize) -> AppointmentDraft {
    let created = creation_time(i);

    AppointmentDraft {
        id: Some(i.to_string()),
        description: Some(DESCRIPTIONS[i % DESCRIPTIONS.len()].to_string()),
        created_at: Some(created),
        // The patient books the visit, so they are also the author
        author: Some(PATIENT_NAMES[i % PATIENT_NAMES.len()].to_string()),
        photo_link: None,
        patient_id: Some((i % PATIENT_NAMES.len()) as u64 + 1),
        doctor_id: Some((i % DOCTOR_NAMES.len()) as u64 + 1),
        appointment_date: Some(created + Duration::days(3)),
        status: Some(status::ALL[i % status::ALL.len()].to_string()),
        specialization: Some(SPECIALIZATIONS[i % SPECIALIZATIONS.len()].to_string()),
    }
}

fn creation_time(i: usize) -> DateTime<Utc> {
    let month_start = NaiveDate::from_ymd_opt(2025, 11, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_default();

    let i = i as i64;
    month_start + Duration::days(i - 1) + Duration::hours(10 + i) + Duration::minutes(30 * (i % 2))
}

/// Name of the doctor behind a sample `doctor_id`, used when showing a record.
pub fn doctor_name(doctor_id: u64) -> Option<&'static str> {
    let index = usize::try_from(doctor_id).ok()?.checked_sub(1)?;
    DOCTOR_NAMES.get(index).copied()
}
