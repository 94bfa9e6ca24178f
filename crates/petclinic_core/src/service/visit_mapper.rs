//! Mapping between visit requests, records and views.
//!
//! # Invariants
//! - Stateless; lookups are read-only.
//! - `to_view` returns either a fully resolved view or an error.

use super::{PetLookup, VetLookup};
use crate::model::pet::PetId;
use crate::model::vet::VetId;
use crate::model::visit::{MakeVisit, Visit, VisitView};
use crate::model::ValidationError;
use crate::repo::RepoError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("visit {visit_id} references missing pet {pet_id}")]
    PetNotFound { visit_id: i64, pet_id: PetId },
    #[error("visit {visit_id} references missing vet {vet_id}")]
    VetNotFound { visit_id: i64, vet_id: VetId },
    #[error("{0}")]
    Lookup(#[from] RepoError),
}

pub struct VisitMapper;

impl VisitMapper {
    /// Builds the creation record from path ids and the optional body fields.
    pub fn to_make_visit(
        pet_id: PetId,
        vet_id: VetId,
        date: Option<NaiveDate>,
        description: Option<String>,
    ) -> Result<MakeVisit, ValidationError> {
        let date = date.ok_or(ValidationError::MissingField("date"))?;
        let description = description.ok_or(ValidationError::MissingField("description"))?;

        Ok(MakeVisit {
            pet_id,
            vet_id,
            date,
            description,
        })
    }

    /// Resolves the visit's pet and vet into a transport view.
    pub fn to_view(
        visit: &Visit,
        pets: &impl PetLookup,
        vets: &impl VetLookup,
    ) -> Result<VisitView, MapperError> {
        let pet = pets
            .lookup_pet(visit.pet_id)?
            .ok_or(MapperError::PetNotFound {
                visit_id: visit.id,
                pet_id: visit.pet_id,
            })?;
        let vet = vets
            .lookup_vet(visit.vet_id)?
            .ok_or(MapperError::VetNotFound {
                visit_id: visit.id,
                vet_id: visit.vet_id,
            })?;

        Ok(VisitView {
            id: visit.id,
            pet,
            vet,
            date: visit.date,
            description: visit.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MapperError, VisitMapper};
    use crate::model::pet::{Pet, PetId, Species};
    use crate::model::vet::{Specialty, Vet, VetId};
    use crate::model::visit::Visit;
    use crate::model::ValidationError;
    use crate::repo::RepoResult;
    use crate::service::{PetLookup, VetLookup};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FixedPets(HashMap<PetId, Pet>);

    impl PetLookup for FixedPets {
        fn lookup_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
            Ok(self.0.get(&id).cloned())
        }
    }

    #[derive(Default)]
    struct FixedVets(HashMap<VetId, Vet>);

    impl VetLookup for FixedVets {
        fn lookup_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
            Ok(self.0.get(&id).cloned())
        }
    }

    fn visit() -> Visit {
        Visit {
            id: 7,
            pet_id: 1,
            vet_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            description: "vaccination".to_string(),
        }
    }

    #[test]
    fn to_make_visit_requires_date_and_description() {
        let err = VisitMapper::to_make_visit(1, 2, None, Some("checkup".to_string())).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("date"));

        let date = NaiveDate::from_ymd_opt(2024, 3, 14);
        let err = VisitMapper::to_make_visit(1, 2, date, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("description"));

        let visit = VisitMapper::to_make_visit(1, 2, date, Some("checkup".to_string())).unwrap();
        assert_eq!((visit.pet_id, visit.vet_id), (1, 2));
        assert_eq!(visit.description, "checkup");
    }

    #[test]
    fn to_view_embeds_pet_and_vet() {
        let mut pets = FixedPets::default();
        pets.0.insert(
            1,
            Pet {
                id: 1,
                name: "Sofi".to_string(),
                age: 2,
                species: Species::Cat,
            },
        );
        let mut vets = FixedVets::default();
        vets.0.insert(
            2,
            Vet {
                id: 2,
                name: "Dr. Ada".to_string(),
                specialty: Specialty::Surgery,
            },
        );

        let view = VisitMapper::to_view(&visit(), &pets, &vets).unwrap();
        assert_eq!(view.id, 7);
        assert_eq!(view.pet.name, "Sofi");
        assert_eq!(view.vet.specialty, Specialty::Surgery);
        assert_eq!(view.description, "vaccination");
    }

    #[test]
    fn to_view_fails_instead_of_emitting_partial_view() {
        let mut pets = FixedPets::default();
        pets.0.insert(
            1,
            Pet {
                id: 1,
                name: "Sofi".to_string(),
                age: 2,
                species: Species::Cat,
            },
        );

        let err = VisitMapper::to_view(&visit(), &pets, &FixedVets::default()).unwrap_err();
        assert!(matches!(
            err,
            MapperError::VetNotFound {
                visit_id: 7,
                vet_id: 2
            }
        ));
    }
}
