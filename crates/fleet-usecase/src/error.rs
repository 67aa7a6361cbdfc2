//! Handler errors

use fleet_domain::{FleetError, RepositoryError};
use thiserror::Error;

/// Outcome of a failed use case.
///
/// Domain errors are passed through untouched; the handlers add only
/// the "not found" / "already exists" outcomes, which are themselves
/// [`FleetError`] variants.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Domain(#[from] FleetError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl HandlerError {
    /// The domain error behind this failure, if any
    pub fn as_domain(&self) -> Option<&FleetError> {
        match self {
            HandlerError::Domain(err) => Some(err),
            HandlerError::Repository(RepositoryError::Domain(err)) => Some(err),
            HandlerError::Repository(_) => None,
        }
    }
}
