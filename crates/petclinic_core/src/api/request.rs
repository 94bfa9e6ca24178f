//! Transport-facing request bodies.
//!
//! Every field is optional on the wire so a missing value surfaces as a
//! `ValidationError` (unprocessable input) instead of a decode failure.

use crate::model::pet::{CreatePet, PetId, Species, UpdatePet};
use crate::model::vet::{CreateVet, Specialty, UpdateVet, VetId};
use crate::model::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePetRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub species: Option<String>,
}

impl CreatePetRequest {
    pub fn into_create_pet(self) -> Result<CreatePet, ValidationError> {
        let pet = CreatePet {
            name: required(self.name, "name")?,
            age: required(self.age, "age")?,
            species: required(self.species, "species")?.parse::<Species>()?,
        };
        pet.validate()?;
        Ok(pet)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub species: Option<String>,
}

impl UpdatePetRequest {
    pub fn into_update_pet(self, id: PetId) -> Result<UpdatePet, ValidationError> {
        let pet = UpdatePet {
            id,
            name: required(self.name, "name")?,
            age: required(self.age, "age")?,
            species: required(self.species, "species")?.parse::<Species>()?,
        };
        pet.validate()?;
        Ok(pet)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVetRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
}

impl CreateVetRequest {
    pub fn into_create_vet(self) -> Result<CreateVet, ValidationError> {
        let vet = CreateVet {
            name: required(self.name, "name")?,
            specialty: required(self.specialty, "specialty")?.parse::<Specialty>()?,
        };
        vet.validate()?;
        Ok(vet)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVetRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
}

impl UpdateVetRequest {
    pub fn into_update_vet(self, id: VetId) -> Result<UpdateVet, ValidationError> {
        let vet = UpdateVet {
            id,
            name: required(self.name, "name")?,
            specialty: required(self.specialty, "specialty")?.parse::<Specialty>()?,
        };
        vet.validate()?;
        Ok(vet)
    }
}

/// Visit body; pet and vet ids travel in the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeVisitRequest {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}
