//! # Repository Layer
//!
//! Repositories encapsulate SeaORM operations for customers and pets. They are
//! generic over [`sea_orm::ConnectionTrait`], so the same code runs against
//! the shared pool for reads and against a request-scoped transaction for
//! writes.

pub mod customer;
pub mod pet;

pub use customer::CustomerRepository;
pub use pet::PetRepository;

use crate::error::RepositoryError;

/// Rejects blank values for mandatory text fields.
pub(crate) fn require_non_blank(value: &str, label: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::validation_error(format!(
            "{} is required",
            label
        )));
    }
    Ok(())
}
