//! # medcenter
//!
//! The record layer of a clinic scheduling system: an in-memory collection of
//! appointments with validated insertion, partial update, removal, lookup by id,
//! and filtered, sorted, paginated listing.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  ingest     untyped JSON in, fail-closed on wrong shapes  │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  store      AppointmentStore: the only owner of records   │
//! │  ├─ validation   what a valid record is                   │
//! │  └─ query        filter → sort → page                     │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  model      Appointment, AppointmentDraft, ...Patch       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! `seed` builds sample data and `config` loads settings; neither runs unless a
//! caller asks for it.
//!
//! Everything here is UI agnostic: no stdout, no process exits. The
//! `medcenter` binary is the front end.
//!
//! ## Example
//!
//! ```
//! use medcenter::query::AppointmentFilter;
//! use medcenter::seed;
//! use medcenter::store::AppointmentStore;
//!
//! let store = AppointmentStore::with_appointments(seed::sample_appointments(20));
//! let done = store.query(0, 5, &AppointmentFilter::by_status("Завершен"));
//!
//! assert_eq!(done.len(), 5);
//! assert!(done.iter().all(|a| a.status() == "Завершен"));
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod query;
pub mod seed;
pub mod store;
pub mod validation;

pub use error::{Result, StoreError};
pub use model::{Appointment, AppointmentDraft, AppointmentPatch};
pub use query::{AppointmentFilter, Page};
pub use store::AppointmentStore;
pub use validation::ValidationError;
