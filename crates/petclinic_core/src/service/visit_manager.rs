//! Visit use-case manager.
//!
//! # Responsibility
//! - Record visits after checking that the referenced pet and vet exist.
//! - List a pet's visits.
//!
//! # Invariants
//! - No visit row is written unless both references resolve.
//! - Visits are append-only; there is no update path.

use super::visit_mapper::{MapperError, VisitMapper};
use super::{PetLookup, VetLookup};
use crate::model::pet::PetId;
use crate::model::vet::VetId;
use crate::model::visit::{MakeVisit, Visit, VisitView};
use crate::repo::visit_repo::VisitRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisitError {
    #[error("pet does not exist: {0}")]
    PetNotFound(PetId),
    #[error("vet does not exist: {0}")]
    VetNotFound(VetId),
    #[error("{0}")]
    Storage(#[from] RepoError),
    #[error("inconsistent visit state: {0}")]
    InconsistentState(&'static str),
}

/// Visit manager with injected pet/vet existence checks.
pub struct VisitManager<R, P, V>
where
    R: VisitRepository,
    P: PetLookup,
    V: VetLookup,
{
    repo: R,
    pets: P,
    vets: V,
}

impl<R, P, V> VisitManager<R, P, V>
where
    R: VisitRepository,
    P: PetLookup,
    V: VetLookup,
{
    pub fn new(repo: R, pets: P, vets: V) -> Self {
        Self { repo, pets, vets }
    }

    /// Records a visit.
    ///
    /// # Errors
    /// - `PetNotFound`/`VetNotFound` when a reference does not resolve; no
    ///   row is written.
    /// - `Storage` for lookup or write failures.
    pub fn make_visit(&self, visit: MakeVisit) -> Result<Visit, VisitError> {
        if self.pets.lookup_pet(visit.pet_id)?.is_none() {
            warn!(
                "event=visit_make module=service status=rejected reason=pet_not_found pet_id={}",
                visit.pet_id
            );
            return Err(VisitError::PetNotFound(visit.pet_id));
        }
        if self.vets.lookup_vet(visit.vet_id)?.is_none() {
            warn!(
                "event=visit_make module=service status=rejected reason=vet_not_found vet_id={}",
                visit.vet_id
            );
            return Err(VisitError::VetNotFound(visit.vet_id));
        }

        let id = self.repo.insert_visit(&visit).map_err(|err| {
            error!("event=visit_make module=service status=error error={err}");
            VisitError::from(err)
        })?;
        let created = self
            .repo
            .get_visit(id)?
            .ok_or(VisitError::InconsistentState("created visit not found in read-back"))?;

        info!(
            "event=visit_make module=service status=ok visit_id={} pet_id={} vet_id={}",
            id, visit.pet_id, visit.vet_id
        );
        Ok(created)
    }

    /// Lists visits of one pet in insertion order.
    ///
    /// Does not check that the pet exists; an unknown id yields an empty list.
    pub fn get_pet_visits(&self, pet_id: PetId) -> RepoResult<Vec<Visit>> {
        self.repo.list_pet_visits(pet_id)
    }

    /// Resolves a visit into its transport view through this manager's lookups.
    pub fn view(&self, visit: &Visit) -> Result<VisitView, MapperError> {
        VisitMapper::to_view(visit, &self.pets, &self.vets)
    }
}
