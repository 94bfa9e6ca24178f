//! Core domain logic for the pet clinic.
//! This crate is the single source of truth for pet, vet and visit invariants.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::request::{
    CreatePetRequest, CreateVetRequest, MakeVisitRequest, UpdatePetRequest, UpdateVetRequest,
};
pub use api::{ApiError, ApiResult, ClinicApi};
pub use config::{ClinicConfig, ConfigError, DatabaseConfig, LoggingConfig};
pub use db::{health_check, HealthReport};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::pet::{CreatePet, Pet, PetId, Species, UpdatePet};
pub use model::vet::{CreateVet, Specialty, UpdateVet, Vet, VetId};
pub use model::visit::{MakeVisit, Visit, VisitId, VisitView};
pub use model::ValidationError;
pub use repo::pet_repo::{PetRepository, SqlitePetRepository};
pub use repo::vet_repo::{SqliteVetRepository, VetRepository};
pub use repo::visit_repo::{SqliteVisitRepository, VisitRepository};
pub use repo::{RepoError, RepoResult};
pub use service::pet_manager::{PetError, PetManager};
pub use service::vet_manager::{VetError, VetManager};
pub use service::visit_manager::{VisitError, VisitManager};
pub use service::visit_mapper::{MapperError, VisitMapper};
pub use service::{PetLookup, VetLookup};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
