//! # Appointment Store
//!
//! [`AppointmentStore`] owns an ordered sequence of validated appointments and is
//! the only way records enter, change or leave it.
//!
//! ## Gatekeeping
//!
//! - **Insert**: a draft is accepted only if it passes validation and its `id`
//!   is not already taken. Accepted records are appended, so insertion order is
//!   preserved.
//! - **Update**: the patch is stripped of `id`, `author` and `createdAt`, laid
//!   over the stored record, and the *whole* result is validated again. Only a
//!   valid candidate replaces the original, in place. Nothing is half-applied.
//! - **Remove**: by exact `id`. Since ids are unique at most one record goes.
//!
//! ## Two Faces
//!
//! Each mutation comes in two flavors:
//!
//! | Boolean | Detailed | Failure reasons |
//! |---------|----------|-----------------|
//! | `insert` | `try_insert` | `Invalid`, `DuplicateId` |
//! | `update` | `try_update` | `NotFound`, `Invalid` |
//! | `remove` | `try_remove` | `NotFound` |
//!
//! The boolean methods are what front ends normally use: a rejected record is
//! an expected outcome, not a fault. The `try_*` methods carry the reason for
//! callers that want to report it.
//!
//! ## Ownership
//!
//! Lookups hand out `&Appointment`, which has no mutators, and queries return
//! owned snapshots. Either way the stored records can only change through
//! the store's own methods.
//!
//! ## Concurrency
//!
//! None. Mutation takes `&mut self`; callers that need sharing wrap the store
//! themselves.

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::model::{Appointment, AppointmentDraft, AppointmentPatch};
use crate::query::{self, AppointmentFilter, Page};
use crate::validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures;

#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an initial batch. Invalid or duplicate drafts are
    /// skipped, exactly as [`insert_all`](Self::insert_all) does.
    pub fn with_appointments<I>(drafts: I) -> Self
    where
        I: IntoIterator<Item = AppointmentDraft>,
    {
        let mut store = Self::new();
        store.insert_all(drafts);
        store
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Read-only iteration in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    pub fn validate(&self, draft: &AppointmentDraft) -> bool {
        validation::is_valid(draft)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|app| app.id() == id)
    }

    pub fn try_insert(&mut self, draft: AppointmentDraft) -> Result<&Appointment> {
        let app = Appointment::try_from(draft)?;
        if self.contains(app.id()) {
            return Err(StoreError::DuplicateId(app.id().to_string()));
        }

        debug!(id = app.id(), "appointment added");
        let index = self.appointments.len();
        self.appointments.push(app);
        Ok(&self.appointments[index])
    }

    pub fn insert(&mut self, draft: AppointmentDraft) -> bool {
        match self.try_insert(draft) {
            Ok(_) => true,
            Err(e) => {
                debug!("insert rejected: {e}");
                false
            }
        }
    }

    /// Inserts each draft in order and returns the ones that were accepted.
    ///
    /// Each draft is judged on its own; a rejection does not stop the batch.
    pub fn insert_all<I>(&mut self, drafts: I) -> Vec<Appointment>
    where
        I: IntoIterator<Item = AppointmentDraft>,
    {
        let mut added = Vec::new();
        let mut rejected = 0usize;

        for draft in drafts {
            match self.try_insert(draft) {
                Ok(app) => added.push(app.clone()),
                Err(e) => {
                    debug!("bulk insert skipped a record: {e}");
                    rejected += 1;
                }
            }
        }

        info!(added = added.len(), rejected, "bulk insert finished");
        added
    }

    pub fn try_update(&mut self, id: &str, patch: &AppointmentPatch) -> Result<&Appointment> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if patch.touches_protected() {
            debug!(id, "ignoring protected fields in update");
        }

        let candidate = patch.without_protected().apply_to(&self.appointments[index]);
        let updated = Appointment::try_from(candidate)?;

        debug!(id, "appointment updated");
        self.appointments[index] = updated;
        Ok(&self.appointments[index])
    }

    pub fn update(&mut self, id: &str, patch: &AppointmentPatch) -> bool {
        match self.try_update(id, patch) {
            Ok(_) => true,
            Err(e) => {
                debug!("update rejected: {e}");
                false
            }
        }
    }

    pub fn try_remove(&mut self, id: &str) -> Result<Appointment> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        debug!(id, "appointment removed");
        Ok(self.appointments.remove(index))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.try_remove(id).is_ok()
    }

    /// Filtered, sorted, paginated snapshot. See [`crate::query`] for the pipeline.
    pub fn query(&self, skip: usize, top: usize, filter: &AppointmentFilter) -> Vec<Appointment> {
        query::run(&self.appointments, filter, Page::new(skip, top))
    }

    /// [`query`](Self::query) with a [`Page`] value.
    pub fn query_page(&self, page: Page, filter: &AppointmentFilter) -> Vec<Appointment> {
        query::run(&self.appointments, filter, page)
    }

    pub fn clear(&mut self) {
        debug!(count = self.appointments.len(), "store cleared");
        self.appointments.clear();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.appointments.iter().position(|app| app.id() == id)
    }
}
