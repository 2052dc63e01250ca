//! # JSON Boundary
//!
//! The typed store API cannot be called with the wrong shapes. Callers that hold
//! untrusted JSON (files, other front ends) come through here instead. Every
//! function fails closed on a wrong shape:
//!
//! | Input | Wrong shape | Outcome |
//! |-------|-------------|---------|
//! | record | not an object, or fields of the wrong type | invalid |
//! | batch | not an array | empty result, store untouched |
//! | id | not a string | `false` / `None` |
//! | changes | missing, `null`, not an object | `false` |
//!
//! A wrong shape is never an error the caller has to handle; it reads the same
//! as "not valid" or "not found".

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::model::{Appointment, AppointmentDraft, AppointmentPatch};
use crate::store::AppointmentStore;
use crate::validation::{self, ValidationError};

const PROTECTED_KEYS: [&str; 3] = ["id", "author", "createdAt"];

/// Decodes a single record.
pub fn draft_from_value(value: &Value) -> Result<AppointmentDraft, ValidationError> {
    if !value.is_object() {
        return Err(ValidationError::NotAnObject);
    }
    decode(value)
}

/// Decodes a change-set. `null` and non-objects are rejected.
///
/// The write-once keys are dropped before decoding, so their values are never
/// looked at and a wrongly typed `id` cannot sink the rest of the change-set.
pub fn patch_from_value(value: &Value) -> Result<AppointmentPatch, ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    let mut changes = map.clone();
    for key in PROTECTED_KEYS {
        changes.remove(key);
    }
    decode(&Value::Object(changes))
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ValidationError> {
    serde_json::from_value(value.clone()).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// Full validation of an untyped record: shape first, then the record rules.
pub fn check_value(value: &Value) -> Result<(), ValidationError> {
    let draft = draft_from_value(value)?;
    validation::check(&draft)
}

pub fn validate_value(value: &Value) -> bool {
    check_value(value).is_ok()
}

pub fn insert_value(store: &mut AppointmentStore, value: &Value) -> bool {
    match draft_from_value(value) {
        Ok(draft) => store.insert(draft),
        Err(e) => {
            debug!("insert rejected: {e}");
            false
        }
    }
}

/// Inserts every element of a JSON array, returning the accepted records.
///
/// Anything other than an array yields an empty result and leaves the store as
/// it was. Elements that fail to decode are skipped like invalid records.
pub fn insert_all_values(store: &mut AppointmentStore, value: &Value) -> Vec<Appointment> {
    let Some(items) = value.as_array() else {
        debug!("bulk insert ignored: input is not an array");
        return Vec::new();
    };

    let drafts: Vec<AppointmentDraft> = items
        .iter()
        .filter_map(|item| match draft_from_value(item) {
            Ok(draft) => Some(draft),
            Err(e) => {
                debug!("bulk insert skipped a record: {e}");
                None
            }
        })
        .collect();

    store.insert_all(drafts)
}

pub fn update_value(store: &mut AppointmentStore, id: &Value, changes: &Value) -> bool {
    let Some(id) = id.as_str() else {
        return false;
    };
    match patch_from_value(changes) {
        Ok(patch) => store.update(id, &patch),
        Err(e) => {
            debug!(id, "update rejected: {e}");
            false
        }
    }
}

pub fn remove_value(store: &mut AppointmentStore, id: &Value) -> bool {
    id.as_str().is_some_and(|id| store.remove(id))
}

pub fn get_value<'a>(store: &'a AppointmentStore, id: &Value) -> Option<&'a Appointment> {
    id.as_str().and_then(|id| store.get_by_id(id))
}
