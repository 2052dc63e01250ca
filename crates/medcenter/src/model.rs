//! # Domain Model: Appointments, Drafts and Patches
//!
//! This module defines the three shapes an appointment takes on its way through
//! the store: [`AppointmentDraft`], [`Appointment`] and [`AppointmentPatch`].
//!
//! ## The Problem
//!
//! Records arrive from callers that do not share our type system: seeding
//! scripts, JSON files, other front ends. They can be partial, have empty
//! strings where values are required, or carry fields the caller must not be
//! allowed to change. The store must never hold such a record.
//!
//! ## Three Shapes
//!
//! ```text
//! AppointmentDraft   every field optional, may be invalid
//!        │  validation::check
//!        ▼
//! Appointment        validated, fields private, owned by the store
//!        ▲
//!        │  AppointmentPatch::apply_to  (then re-validated)
//! AppointmentPatch   partial change-set for update
//! ```
//!
//! - **Draft**: what callers hand to `insert`. Deserializes from the camelCase
//!   wire shape (`createdAt`, `patientId`, ...). Missing keys become `None`.
//! - **Appointment**: only constructible through `TryFrom<AppointmentDraft>`,
//!   which runs the full validation. Accessors are read-only, so a value of this
//!   type always satisfies the record invariants.
//! - **Patch**: what callers hand to `update`. It may name protected fields
//!   (`id`, `author`, `createdAt`); those are stripped by
//!   [`AppointmentPatch::without_protected`] before the overlay.
//!
//! ## Truthiness on Input
//!
//! `photoLink` is optional and unconstrained, but a present truthy value must be
//! a string. On decode, `null`, `false` and `0` all read as "no photo link";
//! any other non-string value is a decode error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::validation::{self, ValidationError};

/// Well-known status values used by the clinic front end and the seed data.
///
/// The store treats status as free-form text; these are conventions only.
pub mod status {
    pub const SCHEDULED: &str = "Запланирован";
    pub const COMPLETED: &str = "Завершен";
    pub const CANCELLED: &str = "Отменен";

    pub const ALL: [&str; 3] = [SCHEDULED, COMPLETED, CANCELLED];
}

/// A validated appointment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    id: String,
    description: String,
    created_at: DateTime<Utc>,
    author: String,
    photo_link: Option<String>,
    /// Non-zero numeric id. String and negative ids do not decode.
    patient_id: u64,
    /// Non-zero numeric id, same rules as `patient_id`.
    doctor_id: u64,
    appointment_date: DateTime<Utc>,
    status: String,
    specialization: Option<String>,
}

impl Appointment {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn photo_link(&self) -> Option<&str> {
        self.photo_link.as_deref()
    }

    pub fn patient_id(&self) -> u64 {
        self.patient_id
    }

    pub fn doctor_id(&self) -> u64 {
        self.doctor_id
    }

    pub fn appointment_date(&self) -> DateTime<Utc> {
        self.appointment_date
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }
}

impl TryFrom<AppointmentDraft> for Appointment {
    type Error = ValidationError;

    fn try_from(draft: AppointmentDraft) -> Result<Self, Self::Error> {
        validation::check(&draft)?;

        Ok(Appointment {
            id: required(draft.id, "id")?,
            description: required(draft.description, "description")?,
            created_at: required(draft.created_at, "createdAt")?,
            author: required(draft.author, "author")?,
            photo_link: draft.photo_link,
            patient_id: required(draft.patient_id, "patientId")?,
            doctor_id: required(draft.doctor_id, "doctorId")?,
            appointment_date: required(draft.appointment_date, "appointmentDate")?,
            status: required(draft.status, "status")?,
            specialization: draft.specialization,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingFields(vec![field]))
}

/// A candidate appointment, possibly partial or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_link: Option<String>,
    /// Numeric only: a string or negative id in JSON is a decode error, and
    /// `0` counts as missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl AppointmentDraft {
    /// True when no field is set at all.
    pub fn is_empty(&self) -> bool {
        *self == AppointmentDraft::default()
    }
}

impl From<&Appointment> for AppointmentDraft {
    fn from(app: &Appointment) -> Self {
        Self {
            id: Some(app.id.clone()),
            description: Some(app.description.clone()),
            created_at: Some(app.created_at),
            author: Some(app.author.clone()),
            photo_link: app.photo_link.clone(),
            patient_id: Some(app.patient_id),
            doctor_id: Some(app.doctor_id),
            appointment_date: Some(app.appointment_date),
            status: Some(app.status.clone()),
            specialization: app.specialization.clone(),
        }
    }
}

/// Partial change-set for `AppointmentStore::update`.
///
/// `None` leaves a field untouched. Every field except the write-once ones is
/// doubly optional: `Some(None)` clears the stored value, which in JSON is an
/// explicit `null`. Clearing a required field makes the candidate invalid, so
/// the update is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "nullable_truthy_string")]
    pub photo_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub patient_id: Option<Option<u64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub doctor_id: Option<Option<u64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub appointment_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub specialization: Option<Option<String>>,
}

impl AppointmentPatch {
    /// True if the patch names any of the write-once fields.
    pub fn touches_protected(&self) -> bool {
        self.id.is_some() || self.author.is_some() || self.created_at.is_some()
    }

    /// Returns a copy of this patch with `id`, `author` and `created_at` dropped.
    ///
    /// The caller's patch is left as it was.
    pub fn without_protected(&self) -> AppointmentPatch {
        AppointmentPatch {
            id: None,
            author: None,
            created_at: None,
            ..self.clone()
        }
    }

    /// Overlays the set fields of this patch onto `base`, producing a full
    /// candidate draft. Nothing is validated here.
    pub fn apply_to(&self, base: &Appointment) -> AppointmentDraft {
        let mut draft = AppointmentDraft::from(base);

        if let Some(id) = &self.id {
            draft.id = Some(id.clone());
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(created_at) = self.created_at {
            draft.created_at = Some(created_at);
        }
        if let Some(author) = &self.author {
            draft.author = Some(author.clone());
        }
        if let Some(photo_link) = &self.photo_link {
            draft.photo_link = photo_link.clone();
        }
        if let Some(patient_id) = self.patient_id {
            draft.patient_id = patient_id;
        }
        if let Some(doctor_id) = self.doctor_id {
            draft.doctor_id = doctor_id;
        }
        if let Some(appointment_date) = self.appointment_date {
            draft.appointment_date = appointment_date;
        }
        if let Some(status) = &self.status {
            draft.status = status.clone();
        }
        if let Some(specialization) = &self.specialization {
            draft.specialization = specialization.clone();
        }

        draft
    }
}

fn truthy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "photoLink must be a string, found {}",
            other
        ))),
    }
}

fn nullable_truthy_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    truthy_string(deserializer).map(Some)
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn full_draft() -> AppointmentDraft {
        let now = Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap();
        AppointmentDraft {
            id: Some("3".into()),
            description: Some("Плановый осмотр".into()),
            created_at: Some(now),
            author: Some("Сидоров В.В.".into()),
            photo_link: None,
            patient_id: Some(4),
            doctor_id: Some(2),
            appointment_date: Some(now),
            status: Some(status::SCHEDULED.into()),
            specialization: Some("Хирург".into()),
        }
    }

    #[test]
    fn empty_draft_is_empty() {
        assert!(AppointmentDraft::default().is_empty());
        assert!(!full_draft().is_empty());
    }

    #[test]
    fn try_from_valid_draft_keeps_every_field() {
        let draft = full_draft();
        let app = Appointment::try_from(draft.clone()).unwrap();

        assert_eq!(app.id(), "3");
        assert_eq!(app.author(), "Сидоров В.В.");
        assert_eq!(app.patient_id(), 4);
        assert_eq!(app.specialization(), Some("Хирург"));
        assert_eq!(AppointmentDraft::from(&app), draft);
    }

    #[test]
    fn try_from_invalid_draft_fails() {
        let draft = AppointmentDraft {
            status: None,
            ..full_draft()
        };
        assert!(matches!(
            Appointment::try_from(draft),
            Err(ValidationError::MissingFields(fields)) if fields == vec!["status"]
        ));
    }

    #[test]
    fn draft_decodes_camel_case() {
        let draft: AppointmentDraft = serde_json::from_value(json!({
            "id": "21",
            "description": "x",
            "createdAt": "2025-11-21T10:00:00Z",
            "author": "A",
            "patientId": 1,
            "doctorId": 1,
            "appointmentDate": "2025-11-24T10:00:00Z",
            "status": "S",
            "unknownKey": true
        }))
        .unwrap();

        assert_eq!(draft.id.as_deref(), Some("21"));
        assert_eq!(draft.patient_id, Some(1));
        assert!(draft.photo_link.is_none());
        assert!(draft.specialization.is_none());
    }

    #[test]
    fn non_numeric_person_ids_do_not_decode() {
        for value in [json!("4"), json!(-1), json!(1.5)] {
            let res = serde_json::from_value::<AppointmentDraft>(json!({ "patientId": value }));
            assert!(res.is_err());
        }
    }

    #[test]
    fn photo_link_falsy_values_read_as_absent() {
        for value in [json!(null), json!(false), json!(0)] {
            let draft: AppointmentDraft =
                serde_json::from_value(json!({ "photoLink": value })).unwrap();
            assert!(draft.photo_link.is_none());
        }
    }

    #[test]
    fn photo_link_truthy_non_string_is_rejected() {
        for value in [json!(true), json!(7), json!({"url": "x"})] {
            let res = serde_json::from_value::<AppointmentDraft>(json!({ "photoLink": value }));
            assert!(res.is_err());
        }
    }

    #[test]
    fn appointment_serializes_wire_shape() {
        let app = Appointment::try_from(full_draft()).unwrap();
        let value = serde_json::to_value(&app).unwrap();

        assert_eq!(value["id"], "3");
        assert_eq!(value["patientId"], 4);
        assert!(value["photoLink"].is_null());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("appointmentDate").is_some());
    }

    #[test]
    fn without_protected_drops_write_once_fields_only() {
        let patch = AppointmentPatch {
            id: Some("x".into()),
            author: Some("Someone".into()),
            created_at: Some(Utc::now()),
            status: Some(Some("X".into())),
            ..Default::default()
        };
        assert!(patch.touches_protected());

        let filtered = patch.without_protected();
        assert!(!filtered.touches_protected());
        assert_eq!(filtered.status, Some(Some("X".to_string())));
        // Source patch untouched
        assert_eq!(patch.id.as_deref(), Some("x"));
    }

    #[test]
    fn apply_to_overlays_set_fields() {
        let app = Appointment::try_from(full_draft()).unwrap();
        let patch = AppointmentPatch {
            status: Some(Some(status::COMPLETED.into())),
            specialization: Some(None),
            photo_link: Some(Some("https://img/1.png".into())),
            ..Default::default()
        };

        let draft = patch.apply_to(&app);
        assert_eq!(draft.status.as_deref(), Some(status::COMPLETED));
        assert_eq!(draft.specialization, None);
        assert_eq!(draft.photo_link.as_deref(), Some("https://img/1.png"));
        assert_eq!(draft.description.as_deref(), Some("Плановый осмотр"));
    }

    #[test]
    fn patch_decodes_null_as_clear() {
        let patch: AppointmentPatch =
            serde_json::from_value(json!({ "specialization": null })).unwrap();
        assert_eq!(patch.specialization, Some(None));

        let patch: AppointmentPatch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(patch.specialization, None);
        assert_eq!(patch.photo_link, None);
        assert_eq!(patch.status, None);
    }

    #[test]
    fn patch_null_required_field_clears_it() {
        let app = Appointment::try_from(full_draft()).unwrap();
        let patch: AppointmentPatch = serde_json::from_value(json!({ "status": null })).unwrap();
        assert_eq!(patch.status, Some(None));

        let draft = patch.apply_to(&app);
        assert_eq!(draft.status, None);
        assert!(matches!(
            Appointment::try_from(draft),
            Err(ValidationError::MissingFields(fields)) if fields == vec!["status"]
        ));
    }
}
