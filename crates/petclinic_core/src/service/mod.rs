//! Entity managers and cross-entity mapping.
//!
//! # Responsibility
//! - Validate inputs before any storage call.
//! - Orchestrate repository calls into typed, use-case level results.
//! - Resolve visit references through read-only lookup capabilities.
//!
//! # Invariants
//! - Managers hold no state besides their repository handle.
//! - Lookups used by `VisitManager` and `VisitMapper` never mutate.

use crate::model::pet::{Pet, PetId};
use crate::model::vet::{Vet, VetId};
use crate::repo::RepoResult;

pub mod pet_manager;
pub mod vet_manager;
pub mod visit_manager;
pub mod visit_mapper;

/// Read-only pet resolution by id.
pub trait PetLookup {
    fn lookup_pet(&self, id: PetId) -> RepoResult<Option<Pet>>;
}

/// Read-only vet resolution by id.
pub trait VetLookup {
    fn lookup_vet(&self, id: VetId) -> RepoResult<Option<Vet>>;
}

impl<T: PetLookup + ?Sized> PetLookup for &T {
    fn lookup_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        (**self).lookup_pet(id)
    }
}

impl<T: VetLookup + ?Sized> VetLookup for &T {
    fn lookup_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
        (**self).lookup_vet(id)
    }
}
