//! Clinic domain records.
//!
//! # Responsibility
//! - Define the persisted records (`Pet`, `Vet`, `Visit`) and their creation
//!   and update inputs.
//! - Own field-level validation shared by managers and request mapping.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never set by callers on create.
//! - Names are non-blank and ages are non-negative before any write.

use thiserror::Error;

pub mod pet;
pub mod vet;
pub mod visit;

/// Field-level validation failure, detected before any storage call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be blank")]
    EmptyName,
    #[error("age must not be negative, got {0}")]
    NegativeAge(i32),
    #[error("unknown species `{0}`")]
    UnknownSpecies(String),
    #[error("unknown specialty `{0}`")]
    UnknownSpecialty(String),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub(crate) fn validate_age(age: i32) -> Result<(), ValidationError> {
    if age < 0 {
        return Err(ValidationError::NegativeAge(age));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_age, validate_name, ValidationError};

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(validate_name("  \t"), Err(ValidationError::EmptyName));
        assert!(validate_name("Sofi").is_ok());
    }

    #[test]
    fn zero_age_is_allowed_but_negative_is_not() {
        assert!(validate_age(0).is_ok());
        assert_eq!(validate_age(-1), Err(ValidationError::NegativeAge(-1)));
    }
}
