//! Vet use-case manager. Same contract as the pet manager, without a
//! uniqueness rule on names.

use super::VetLookup;
use crate::model::vet::{CreateVet, UpdateVet, Vet, VetId};
use crate::model::ValidationError;
use crate::repo::vet_repo::VetRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("vet not found: {0}")]
    NotFound(VetId),
    #[error("{0}")]
    Storage(RepoError),
    #[error("inconsistent vet state: {0}")]
    InconsistentState(&'static str),
}

impl From<RepoError> for VetError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

pub struct VetManager<R: VetRepository> {
    repo: R,
}

impl<R: VetRepository> VetManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
        self.repo.get_vet(id)
    }

    pub fn get_all_vets(&self) -> RepoResult<Vec<Vet>> {
        self.repo.list_vets()
    }

    pub fn create_vet(&self, vet: CreateVet) -> Result<Vet, VetError> {
        let vet = CreateVet {
            name: vet.name.trim().to_string(),
            ..vet
        };
        if let Err(err) = vet.validate() {
            warn!("event=vet_create module=service status=rejected reason=validation error={err}");
            return Err(err.into());
        }

        let id = self.repo.insert_vet(&vet).map_err(|err| {
            error!("event=vet_create module=service status=error error={err}");
            VetError::from(err)
        })?;
        let created = self
            .repo
            .get_vet(id)?
            .ok_or(VetError::InconsistentState("created vet not found in read-back"))?;

        info!(
            "event=vet_create module=service status=ok vet_id={} specialty={}",
            id, created.specialty
        );
        Ok(created)
    }

    /// Replaces name and specialty; `NotFound` when no vet has `vet.id`.
    pub fn update_vet(&self, vet: UpdateVet) -> Result<Vet, VetError> {
        let vet = UpdateVet {
            name: vet.name.trim().to_string(),
            ..vet
        };
        if let Err(err) = vet.validate() {
            warn!(
                "event=vet_update module=service status=rejected reason=validation vet_id={} error={}",
                vet.id, err
            );
            return Err(err.into());
        }

        if let Err(err) = self.repo.update_vet(&vet) {
            let err = VetError::from(err);
            match &err {
                VetError::NotFound(id) => warn!(
                    "event=vet_update module=service status=rejected reason=not_found vet_id={id}"
                ),
                other => error!("event=vet_update module=service status=error error={other}"),
            }
            return Err(err);
        }
        let updated = self
            .repo
            .get_vet(vet.id)?
            .ok_or(VetError::InconsistentState("updated vet not found in read-back"))?;

        info!("event=vet_update module=service status=ok vet_id={}", vet.id);
        Ok(updated)
    }
}

impl<R: VetRepository> VetLookup for VetManager<R> {
    fn lookup_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
        self.get_vet(id)
    }
}
