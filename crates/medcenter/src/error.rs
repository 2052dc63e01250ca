use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Appointment id already in use: {0}")]
    DuplicateId(String),

    #[error("Invalid appointment: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
