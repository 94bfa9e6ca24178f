//! Pet domain model.
//!
//! # Invariants
//! - `name` is unique across all pets (enforced by storage).
//! - `id` is assigned once by storage and never changes.

use super::{validate_age, validate_name, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned pet identifier.
pub type PetId = i64;

/// Species accepted by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Cat,
    Dog,
    Parrot,
    Rabbit,
}

impl Species {
    pub const ALL: [Species; 4] = [Self::Cat, Self::Dog, Self::Parrot, Self::Rabbit];

    /// Stable lowercase value used in the `pets.species` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Parrot => "parrot",
            Self::Rabbit => "rabbit",
        }
    }

    pub(crate) fn from_db_str(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|species| species.as_db_str() == value)
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_db_str().to_ascii_uppercase())
    }
}

/// Case-insensitive parse, so `cat`, `Cat` and `CAT` are all accepted.
impl FromStr for Species {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::from_db_str(&normalized)
            .ok_or_else(|| ValidationError::UnknownSpecies(value.trim().to_string()))
    }
}

/// Persisted pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub age: i32,
    pub species: Species,
}

/// Input for creating a pet. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePet {
    pub name: String,
    pub age: i32,
    pub species: Species,
}

impl CreatePet {
    pub fn new(name: impl Into<String>, age: i32, species: Species) -> Self {
        Self {
            name: name.into(),
            age,
            species,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_age(self.age)
    }
}

/// Full replacement of a pet's mutable fields, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePet {
    pub id: PetId,
    pub name: String,
    pub age: i32,
    pub species: Species,
}

impl UpdatePet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_age(self.age)
    }
}
