//! Vet domain model.

use super::{validate_name, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned vet identifier.
pub type VetId = i64;

/// Clinical specialty of a vet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    General,
    Surgery,
    Dentistry,
    Radiology,
}

impl Specialty {
    pub const ALL: [Specialty; 4] = [
        Self::General,
        Self::Surgery,
        Self::Dentistry,
        Self::Radiology,
    ];

    /// Stable lowercase value used in the `vets.specialty` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Surgery => "surgery",
            Self::Dentistry => "dentistry",
            Self::Radiology => "radiology",
        }
    }

    pub(crate) fn from_db_str(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|specialty| specialty.as_db_str() == value)
    }
}

impl Display for Specialty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_db_str().to_ascii_uppercase())
    }
}

impl FromStr for Specialty {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::from_db_str(&normalized)
            .ok_or_else(|| ValidationError::UnknownSpecialty(value.trim().to_string()))
    }
}

/// Persisted vet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vet {
    pub id: VetId,
    pub name: String,
    pub specialty: Specialty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVet {
    pub name: String,
    pub specialty: Specialty,
}

impl CreateVet {
    pub fn new(name: impl Into<String>, specialty: Specialty) -> Self {
        Self {
            name: name.into(),
            specialty,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateVet {
    pub id: VetId,
    pub name: String,
    pub specialty: Specialty,
}

impl UpdateVet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}
