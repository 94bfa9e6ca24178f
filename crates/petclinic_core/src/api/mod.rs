//! Request handlers for transport front ends.
//!
//! # Responsibility
//! - Turn request bodies into validated domain inputs.
//! - Invoke managers and translate their typed errors into status classes.
//!
//! # Invariants
//! - Body validation runs before any storage call.
//! - Visit listing for an unknown pet is a bad request, not an empty list.

use crate::model::pet::{Pet, PetId};
use crate::model::vet::{Vet, VetId};
use crate::model::visit::VisitView;
use crate::model::ValidationError;
use crate::repo::pet_repo::SqlitePetRepository;
use crate::repo::vet_repo::SqliteVetRepository;
use crate::repo::visit_repo::SqliteVisitRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::pet_manager::{PetError, PetManager};
use crate::service::vet_manager::{VetError, VetManager};
use crate::service::visit_manager::{VisitError, VisitManager};
use crate::service::visit_mapper::{MapperError, VisitMapper};
use log::error;
use rusqlite::Connection;
use thiserror::Error;

pub mod request;

use request::{
    CreatePetRequest, CreateVetRequest, MakeVisitRequest, UpdatePetRequest, UpdateVetRequest,
};

/// Handler outcome, one variant per transport status class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Unprocessable(_) => 422,
            Self::Internal(_) => 500,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Unprocessable(value.to_string())
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        error!("event=api_storage_failure module=api status=error error={value}");
        Self::Internal("storage failure".to_string())
    }
}

impl From<PetError> for ApiError {
    fn from(value: PetError) -> Self {
        match value {
            PetError::Validation(err) => err.into(),
            PetError::DuplicateName(name) => {
                Self::Conflict(format!("pet name `{name}` is already in use"))
            }
            PetError::NotFound(_) => Self::NotFound("Pet not found".to_string()),
            PetError::Storage(err) => err.into(),
            PetError::InconsistentState(_) => Self::Internal("Pet could not be saved".to_string()),
        }
    }
}

impl From<VetError> for ApiError {
    fn from(value: VetError) -> Self {
        match value {
            VetError::Validation(err) => err.into(),
            VetError::NotFound(_) => Self::NotFound("Vet not found".to_string()),
            VetError::Storage(err) => err.into(),
            VetError::InconsistentState(_) => Self::Internal("Vet could not be saved".to_string()),
        }
    }
}

impl From<VisitError> for ApiError {
    fn from(value: VisitError) -> Self {
        match value {
            VisitError::PetNotFound(_) => Self::BadRequest("Pet does not exist".to_string()),
            VisitError::VetNotFound(_) => Self::BadRequest("Vet does not exist".to_string()),
            VisitError::Storage(err) => err.into(),
            VisitError::InconsistentState(_) => {
                Self::Internal("Visit could not be created".to_string())
            }
        }
    }
}

impl From<MapperError> for ApiError {
    fn from(value: MapperError) -> Self {
        match value {
            MapperError::PetNotFound { .. } => Self::NotFound("Pet not found".to_string()),
            MapperError::VetNotFound { .. } => Self::NotFound("Vet not found".to_string()),
            MapperError::Lookup(err) => err.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

type SqlitePetManager<'conn> = PetManager<SqlitePetRepository<'conn>>;
type SqliteVetManager<'conn> = VetManager<SqliteVetRepository<'conn>>;

/// Handlers for pet, vet and visit requests over one SQLite connection.
pub struct ClinicApi<'conn> {
    pets: SqlitePetManager<'conn>,
    vets: SqliteVetManager<'conn>,
    visits: SqliteVisitRepository<'conn>,
}

impl<'conn> ClinicApi<'conn> {
    /// Builds handlers on a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            pets: PetManager::new(SqlitePetRepository::try_new(conn)?),
            vets: VetManager::new(SqliteVetRepository::try_new(conn)?),
            visits: SqliteVisitRepository::try_new(conn)?,
        })
    }

    fn visit_manager(
        &self,
    ) -> VisitManager<
        &SqliteVisitRepository<'conn>,
        &SqlitePetManager<'conn>,
        &SqliteVetManager<'conn>,
    > {
        VisitManager::new(&self.visits, &self.pets, &self.vets)
    }

    pub fn get_pet(&self, id: PetId) -> ApiResult<Pet> {
        self.pets
            .get_pet(id)?
            .ok_or_else(|| ApiError::NotFound("Pet not found".to_string()))
    }

    pub fn get_all_pets(&self) -> ApiResult<Vec<Pet>> {
        Ok(self.pets.get_all_pets()?)
    }

    pub fn create_pet(&self, request: CreatePetRequest) -> ApiResult<Pet> {
        let pet = request.into_create_pet()?;
        Ok(self.pets.create_pet(pet)?)
    }

    pub fn update_pet(&self, id: PetId, request: UpdatePetRequest) -> ApiResult<Pet> {
        let pet = request.into_update_pet(id)?;
        Ok(self.pets.update_pet(pet)?)
    }

    pub fn get_vet(&self, id: VetId) -> ApiResult<Vet> {
        self.vets
            .get_vet(id)?
            .ok_or_else(|| ApiError::NotFound("Vet not found".to_string()))
    }

    pub fn get_all_vets(&self) -> ApiResult<Vec<Vet>> {
        Ok(self.vets.get_all_vets()?)
    }

    pub fn create_vet(&self, request: CreateVetRequest) -> ApiResult<Vet> {
        let vet = request.into_create_vet()?;
        Ok(self.vets.create_vet(vet)?)
    }

    pub fn update_vet(&self, id: VetId, request: UpdateVetRequest) -> ApiResult<Vet> {
        let vet = request.into_update_vet(id)?;
        Ok(self.vets.update_vet(vet)?)
    }

    /// Records a visit and returns it with pet and vet embedded.
    ///
    /// Missing pet or vet maps to `BadRequest`.
    pub fn make_visit(
        &self,
        pet_id: PetId,
        vet_id: VetId,
        request: MakeVisitRequest,
    ) -> ApiResult<VisitView> {
        let visit =
            VisitMapper::to_make_visit(pet_id, vet_id, request.date, request.description)?;
        let manager = self.visit_manager();
        let created = manager.make_visit(visit)?;
        Ok(manager.view(&created)?)
    }

    pub fn get_pet_visits(&self, pet_id: PetId) -> ApiResult<Vec<VisitView>> {
        if self.pets.get_pet(pet_id)?.is_none() {
            return Err(ApiError::BadRequest("Pet does not exist".to_string()));
        }

        let manager = self.visit_manager();
        manager
            .get_pet_visits(pet_id)?
            .iter()
            .map(|visit| manager.view(visit).map_err(ApiError::from))
            .collect()
    }
}
