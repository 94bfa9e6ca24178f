use chrono::NaiveDate;
use petclinic_core::db::open_db_in_memory;
use petclinic_core::{
    CreatePet, CreateVet, MakeVisit, MapperError, Pet, PetManager, Species, Specialty,
    SqlitePetRepository, SqliteVetRepository, SqliteVisitRepository, Vet, VetManager, VisitError,
    VisitManager, VisitMapper, VisitRepository,
};
use rusqlite::Connection;

fn seed(conn: &Connection) -> (Pet, Vet) {
    let pets = PetManager::new(SqlitePetRepository::try_new(conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(conn).unwrap());
    let pet = pets
        .create_pet(CreatePet::new("Sofi", 2, Species::Cat))
        .unwrap();
    let vet = vets
        .create_vet(CreateVet::new("Dr. Ada", Specialty::General))
        .unwrap();
    (pet, vet)
}

fn make_visit(pet: &Pet, vet: &Vet, day: u32, description: &str) -> MakeVisit {
    MakeVisit {
        pet_id: pet.id,
        vet_id: vet.id,
        date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        description: description.to_string(),
    }
}

#[test]
fn make_visit_persists_and_lists_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let (pet, vet) = seed(&conn);
    let pets = PetManager::new(SqlitePetRepository::try_new(&conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    let manager = VisitManager::new(SqliteVisitRepository::try_new(&conn).unwrap(), &pets, &vets);

    let first = manager
        .make_visit(make_visit(&pet, &vet, 20, "vaccination"))
        .unwrap();
    let second = manager
        .make_visit(make_visit(&pet, &vet, 1, "checkup"))
        .unwrap();
    assert_eq!(first.pet_id, pet.id);
    assert_eq!(first.vet_id, vet.id);
    assert_eq!(first.description, "vaccination");

    let visits = manager.get_pet_visits(pet.id).unwrap();
    assert_eq!(visits, vec![first, second]);
}

#[test]
fn make_visit_rejects_missing_references_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let (pet, vet) = seed(&conn);
    let pets = PetManager::new(SqlitePetRepository::try_new(&conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    let repo = SqliteVisitRepository::try_new(&conn).unwrap();
    let manager = VisitManager::new(&repo, &pets, &vets);

    let mut missing_pet = make_visit(&pet, &vet, 2, "checkup");
    missing_pet.pet_id = 404;
    assert!(matches!(
        manager.make_visit(missing_pet).unwrap_err(),
        VisitError::PetNotFound(404)
    ));

    let mut missing_vet = make_visit(&pet, &vet, 2, "checkup");
    missing_vet.vet_id = 405;
    assert!(matches!(
        manager.make_visit(missing_vet).unwrap_err(),
        VisitError::VetNotFound(405)
    ));

    assert!(repo.list_pet_visits(pet.id).unwrap().is_empty());
    assert!(repo.list_pet_visits(404).unwrap().is_empty());
}

#[test]
fn pet_visits_for_unknown_pet_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let pets = PetManager::new(SqlitePetRepository::try_new(&conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    let manager = VisitManager::new(SqliteVisitRepository::try_new(&conn).unwrap(), &pets, &vets);

    assert!(manager.get_pet_visits(12345).unwrap().is_empty());
}

#[test]
fn view_resolves_pet_and_vet_and_fails_when_pet_disappears() {
    let conn = open_db_in_memory().unwrap();
    let (pet, vet) = seed(&conn);
    let pets = PetManager::new(SqlitePetRepository::try_new(&conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    let manager = VisitManager::new(SqliteVisitRepository::try_new(&conn).unwrap(), &pets, &vets);

    let visit = manager
        .make_visit(make_visit(&pet, &vet, 3, "dental cleaning"))
        .unwrap();
    let view = manager.view(&visit).unwrap();
    assert_eq!(view.pet, pet);
    assert_eq!(view.vet, vet);
    assert_eq!(view.date, visit.date);

    // Out-of-band delete; the clinic exposes no delete operation.
    conn.execute("DELETE FROM pets WHERE id = ?1;", [pet.id])
        .unwrap();
    let err = VisitMapper::to_view(&visit, &pets, &vets).unwrap_err();
    assert!(matches!(err, MapperError::PetNotFound { pet_id, .. } if pet_id == pet.id));
}

#[test]
fn visit_view_serializes_with_embedded_records() {
    let conn = open_db_in_memory().unwrap();
    let (pet, vet) = seed(&conn);
    let pets = PetManager::new(SqlitePetRepository::try_new(&conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    let manager = VisitManager::new(SqliteVisitRepository::try_new(&conn).unwrap(), &pets, &vets);

    let visit = manager
        .make_visit(make_visit(&pet, &vet, 9, "x-ray"))
        .unwrap();
    let json = serde_json::to_value(manager.view(&visit).unwrap()).unwrap();
    assert_eq!(json["date"], "2024-05-09");
    assert_eq!(json["pet"]["species"], "CAT");
    assert_eq!(json["vet"]["specialty"], "GENERAL");

    let record = serde_json::to_value(&visit).unwrap();
    assert_eq!(record["petId"], pet.id);
    assert_eq!(record["vetId"], vet.id);
}

#[test]
fn failed_visit_insert_is_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let (pet, vet) = seed(&conn);
    let pets = PetManager::new(SqlitePetRepository::try_new(&conn).unwrap());
    let vets = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    let manager = VisitManager::new(SqliteVisitRepository::try_new(&conn).unwrap(), &pets, &vets);
    conn.execute_batch(
        "CREATE TRIGGER visits_insert_abort BEFORE INSERT ON visits
         BEGIN SELECT RAISE(ABORT, 'disk gone'); END;",
    )
    .unwrap();

    let err = manager
        .make_visit(make_visit(&pet, &vet, 4, "checkup"))
        .unwrap_err();
    assert!(matches!(err, VisitError::Storage(_)));
    assert!(manager.get_pet_visits(pet.id).unwrap().is_empty());
}
