//! Pet use-case manager.
//!
//! # Responsibility
//! - Validate pet inputs and persist them through `PetRepository`.
//! - Tell duplicate names apart from other write failures.
//!
//! # Invariants
//! - Names are trimmed before validation and storage.
//! - Create/update return the row as read back from storage.

use super::PetLookup;
use crate::model::pet::{CreatePet, Pet, PetId, UpdatePet};
use crate::model::ValidationError;
use crate::repo::pet_repo::PetRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use thiserror::Error;

/// Errors from pet create/update.
#[derive(Debug, Error)]
pub enum PetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("pet name already in use: `{0}`")]
    DuplicateName(String),
    #[error("pet not found: {0}")]
    NotFound(PetId),
    #[error("{0}")]
    Storage(RepoError),
    #[error("inconsistent pet state: {0}")]
    InconsistentState(&'static str),
}

impl From<RepoError> for PetError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Pet manager over a repository implementation.
pub struct PetManager<R: PetRepository> {
    repo: R,
}

impl<R: PetRepository> PetManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one pet by id; `None` when no row matches.
    pub fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        self.repo.get_pet(id)
    }

    /// Lists all pets in insertion order.
    pub fn get_all_pets(&self) -> RepoResult<Vec<Pet>> {
        self.repo.list_pets()
    }

    /// Exact-name lookup.
    pub fn find_pet_by_name(&self, name: &str) -> RepoResult<Option<Pet>> {
        self.repo.find_pet_by_name(name.trim())
    }

    /// Validates and inserts a pet.
    ///
    /// # Errors
    /// - `Validation` for blank names or negative ages; storage is not touched.
    /// - `DuplicateName` when another pet already uses the name.
    /// - `Storage` for any other write failure.
    pub fn create_pet(&self, pet: CreatePet) -> Result<Pet, PetError> {
        let pet = CreatePet {
            name: pet.name.trim().to_string(),
            ..pet
        };
        if let Err(err) = pet.validate() {
            warn!("event=pet_create module=service status=rejected reason=validation error={err}");
            return Err(err.into());
        }

        let id = self
            .repo
            .insert_pet(&pet)
            .map_err(|err| write_failure("pet_create", &pet.name, err))?;
        let created = self
            .repo
            .get_pet(id)?
            .ok_or(PetError::InconsistentState("created pet not found in read-back"))?;

        info!(
            "event=pet_create module=service status=ok pet_id={} species={}",
            id, created.species
        );
        Ok(created)
    }

    /// Replaces name, age and species of an existing pet.
    ///
    /// # Errors
    /// - `NotFound` when no pet has `pet.id`; storage is left unchanged.
    /// - `Validation`, `DuplicateName` and `Storage` as in `create_pet`.
    pub fn update_pet(&self, pet: UpdatePet) -> Result<Pet, PetError> {
        let pet = UpdatePet {
            name: pet.name.trim().to_string(),
            ..pet
        };
        if let Err(err) = pet.validate() {
            warn!(
                "event=pet_update module=service status=rejected reason=validation pet_id={} error={}",
                pet.id, err
            );
            return Err(err.into());
        }

        self.repo
            .update_pet(&pet)
            .map_err(|err| write_failure("pet_update", &pet.name, err))?;
        let updated = self
            .repo
            .get_pet(pet.id)?
            .ok_or(PetError::InconsistentState("updated pet not found in read-back"))?;

        info!(
            "event=pet_update module=service status=ok pet_id={} species={}",
            pet.id, updated.species
        );
        Ok(updated)
    }
}

impl<R: PetRepository> PetLookup for PetManager<R> {
    fn lookup_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        self.get_pet(id)
    }
}

fn write_failure(event: &str, name: &str, err: RepoError) -> PetError {
    match err {
        RepoError::UniqueViolation(_) => {
            warn!("event={event} module=service status=rejected reason=duplicate_name");
            PetError::DuplicateName(name.to_string())
        }
        RepoError::NotFound { id, .. } => {
            warn!("event={event} module=service status=rejected reason=not_found pet_id={id}");
            PetError::NotFound(id)
        }
        other => {
            error!("event={event} module=service status=error error={other}");
            PetError::Storage(other)
        }
    }
}
