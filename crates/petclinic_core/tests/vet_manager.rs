use petclinic_core::db::open_db_in_memory;
use petclinic_core::{
    CreateVet, RepoError, Specialty, SqliteVetRepository, UpdateVet, ValidationError, VetError,
    VetManager,
};

#[test]
fn vets_are_created_listed_and_fetched() {
    let conn = open_db_in_memory().unwrap();
    let manager = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());

    let ada = manager
        .create_vet(CreateVet::new("Dr. Ada", Specialty::Surgery))
        .unwrap();
    let bo = manager
        .create_vet(CreateVet::new("Dr. Bo", Specialty::Dentistry))
        .unwrap();

    assert_eq!(manager.get_all_vets().unwrap(), vec![ada.clone(), bo]);
    assert_eq!(manager.get_vet(ada.id).unwrap(), Some(ada));
    assert!(manager.get_vet(999).unwrap().is_none());
}

#[test]
fn vet_names_need_not_be_unique() {
    let conn = open_db_in_memory().unwrap();
    let manager = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());

    manager
        .create_vet(CreateVet::new("Dr. Smith", Specialty::General))
        .unwrap();
    manager
        .create_vet(CreateVet::new("Dr. Smith", Specialty::Radiology))
        .unwrap();

    assert_eq!(manager.get_all_vets().unwrap().len(), 2);
}

#[test]
fn update_vet_replaces_fields_or_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let manager = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());

    let ada = manager
        .create_vet(CreateVet::new("Dr. Ada", Specialty::General))
        .unwrap();
    let updated = manager
        .update_vet(UpdateVet {
            id: ada.id,
            name: "Dr. Ada Lovelace".to_string(),
            specialty: Specialty::Radiology,
        })
        .unwrap();
    assert_eq!(updated.id, ada.id);
    assert_eq!(updated.specialty, Specialty::Radiology);

    let err = manager
        .update_vet(UpdateVet {
            id: 999,
            name: "Nobody".to_string(),
            specialty: Specialty::General,
        })
        .unwrap_err();
    assert!(matches!(err, VetError::NotFound(999)));
}

#[test]
fn blank_vet_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let manager = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());

    let err = manager
        .create_vet(CreateVet::new("", Specialty::General))
        .unwrap_err();
    assert!(matches!(
        err,
        VetError::Validation(ValidationError::EmptyName)
    ));
    assert!(manager.get_all_vets().unwrap().is_empty());
}

#[test]
fn non_unique_write_failure_is_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let manager = VetManager::new(SqliteVetRepository::try_new(&conn).unwrap());
    conn.execute_batch(
        "CREATE TRIGGER vets_insert_abort BEFORE INSERT ON vets
         BEGIN SELECT RAISE(ABORT, 'disk gone'); END;",
    )
    .unwrap();

    let err = manager
        .create_vet(CreateVet::new("Dr. Ada", Specialty::General))
        .unwrap_err();
    assert!(matches!(
        err,
        VetError::Storage(ref inner) if !matches!(inner, RepoError::UniqueViolation(_))
    ));
    assert!(manager.get_all_vets().unwrap().is_empty());
}
