//! Pet repository contract and SQLite implementation.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::pet::{CreatePet, Pet, PetId, Species, UpdatePet};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PET_SELECT_SQL: &str = "SELECT id, name, age, species FROM pets";

/// Storage primitives for the `pets` table.
pub trait PetRepository {
    /// Inserts a pet and returns the storage-assigned id.
    ///
    /// A duplicate name surfaces as `RepoError::UniqueViolation`.
    fn insert_pet(&self, pet: &CreatePet) -> RepoResult<PetId>;
    /// Replaces name/age/species; `RepoError::NotFound` when no row matched.
    fn update_pet(&self, pet: &UpdatePet) -> RepoResult<()>;
    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>>;
    fn find_pet_by_name(&self, name: &str) -> RepoResult<Option<Pet>>;
    /// Lists all pets ordered by id ascending.
    fn list_pets(&self) -> RepoResult<Vec<Pet>>;
}

impl<T: PetRepository + ?Sized> PetRepository for &T {
    fn insert_pet(&self, pet: &CreatePet) -> RepoResult<PetId> {
        (**self).insert_pet(pet)
    }

    fn update_pet(&self, pet: &UpdatePet) -> RepoResult<()> {
        (**self).update_pet(pet)
    }

    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        (**self).get_pet(id)
    }

    fn find_pet_by_name(&self, name: &str) -> RepoResult<Option<Pet>> {
        (**self).find_pet_by_name(name)
    }

    fn list_pets(&self) -> RepoResult<Vec<Pet>> {
        (**self).list_pets()
    }
}

/// SQLite-backed pet repository.
pub struct SqlitePetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "pets")?;
        Ok(Self { conn })
    }
}

impl PetRepository for SqlitePetRepository<'_> {
    fn insert_pet(&self, pet: &CreatePet) -> RepoResult<PetId> {
        self.conn.execute(
            "INSERT INTO pets (name, age, species) VALUES (?1, ?2, ?3);",
            params![pet.name.as_str(), pet.age, pet.species.as_db_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_pet(&self, pet: &UpdatePet) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pets SET name = ?1, age = ?2, species = ?3 WHERE id = ?4;",
            params![pet.name.as_str(), pet.age, pet.species.as_db_str(), pet.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "pet",
                id: pet.id,
            });
        }

        Ok(())
    }

    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        self.query_one(&format!("{PET_SELECT_SQL} WHERE id = ?1;"), params![id])
    }

    fn find_pet_by_name(&self, name: &str) -> RepoResult<Option<Pet>> {
        self.query_one(&format!("{PET_SELECT_SQL} WHERE name = ?1;"), params![name])
    }

    fn list_pets(&self) -> RepoResult<Vec<Pet>> {
        let mut stmt = self.conn.prepare(&format!("{PET_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut pets = Vec::new();

        while let Some(row) = rows.next()? {
            pets.push(parse_pet_row(row)?);
        }

        Ok(pets)
    }
}

impl SqlitePetRepository<'_> {
    fn query_one(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Option<Pet>> {
        let mut stmt = self.conn.prepare(sql)?;
        let pet = stmt
            .query_row(params, |row| Ok(parse_pet_row(row)))
            .optional()?;
        pet.transpose()
    }
}

fn parse_pet_row(row: &Row<'_>) -> RepoResult<Pet> {
    let species_text: String = row.get("species")?;
    let species = Species::from_db_str(&species_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid species `{species_text}` in pets.species"))
    })?;

    Ok(Pet {
        id: row.get("id")?,
        name: row.get("name")?,
        age: row.get("age")?,
        species,
    })
}
