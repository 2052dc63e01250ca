//! Appointment validation.
//!
//! A draft is valid when, checked in this order:
//! - it is not empty
//! - every required field is present and truthy (no empty strings, no zero ids)
//! - `description` is shorter than [`MAX_DESCRIPTION_LEN`] characters
//!
//! The truthiness check also covers a non-empty `id` and `author`; an empty
//! one is reported as missing.
//!
//! Timestamp and `photoLink` type checks are carried by the draft's field types:
//! a malformed timestamp or a non-string photo link never decodes into a draft.

use thiserror::Error;

use crate::model::AppointmentDraft;

/// Descriptions must be strictly shorter than this many characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Wire names of the fields every appointment must carry.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "id",
    "description",
    "createdAt",
    "author",
    "patientId",
    "doctorId",
    "appointmentDate",
    "status",
];

/// Why a candidate appointment was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("appointment is empty")]
    Empty,

    #[error("required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("description must be shorter than 200 characters, found {len}")]
    DescriptionTooLong { len: usize },

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("malformed appointment: {0}")]
    Malformed(String),
}

/// Runs every check against `draft`, stopping at the first failure.
///
/// # Examples
/// ```
/// use medcenter::model::AppointmentDraft;
/// use medcenter::validation::{check, ValidationError};
///
/// assert_eq!(check(&AppointmentDraft::default()), Err(ValidationError::Empty));
///
/// let partial = AppointmentDraft {
///     id: Some("22".into()),
///     description: Some("y".into()),
///     ..Default::default()
/// };
/// assert!(matches!(check(&partial), Err(ValidationError::MissingFields(_))));
/// ```
pub fn check(draft: &AppointmentDraft) -> Result<(), ValidationError> {
    if draft.is_empty() {
        return Err(ValidationError::Empty);
    }

    let missing = missing_fields(draft);
    if !missing.is_empty() {
        // Side channel only; the caller still just sees the Err.
        tracing::warn!(
            id = draft.id.as_deref().unwrap_or_default(),
            missing = %missing.join(", "),
            "appointment rejected: required fields missing"
        );
        return Err(ValidationError::MissingFields(missing));
    }

    let len = draft
        .description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0);
    if len >= MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong { len });
    }

    Ok(())
}

/// Boolean face of [`check`].
pub fn is_valid(draft: &AppointmentDraft) -> bool {
    check(draft).is_ok()
}

/// Lists the required fields that are absent or falsy, by wire name.
pub fn missing_fields(draft: &AppointmentDraft) -> Vec<&'static str> {
    let present = [
        truthy_str(&draft.id),
        truthy_str(&draft.description),
        draft.created_at.is_some(),
        truthy_str(&draft.author),
        truthy_id(draft.patient_id),
        truthy_id(draft.doctor_id),
        draft.appointment_date.is_some(),
        truthy_str(&draft.status),
    ];

    REQUIRED_FIELDS
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect()
}

fn truthy_str(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn truthy_id(value: Option<u64>) -> bool {
    value.is_some_and(|v| v != 0)
}
