//! Vet repository contract and SQLite implementation.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::vet::{CreateVet, Specialty, UpdateVet, Vet, VetId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const VET_SELECT_SQL: &str = "SELECT id, name, specialty FROM vets";

/// Storage primitives for the `vets` table.
pub trait VetRepository {
    fn insert_vet(&self, vet: &CreateVet) -> RepoResult<VetId>;
    /// Replaces name/specialty; `RepoError::NotFound` when no row matched.
    fn update_vet(&self, vet: &UpdateVet) -> RepoResult<()>;
    fn get_vet(&self, id: VetId) -> RepoResult<Option<Vet>>;
    /// Lists all vets ordered by id ascending.
    fn list_vets(&self) -> RepoResult<Vec<Vet>>;
}

impl<T: VetRepository + ?Sized> VetRepository for &T {
    fn insert_vet(&self, vet: &CreateVet) -> RepoResult<VetId> {
        (**self).insert_vet(vet)
    }

    fn update_vet(&self, vet: &UpdateVet) -> RepoResult<()> {
        (**self).update_vet(vet)
    }

    fn get_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
        (**self).get_vet(id)
    }

    fn list_vets(&self) -> RepoResult<Vec<Vet>> {
        (**self).list_vets()
    }
}

/// SQLite-backed vet repository.
pub struct SqliteVetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVetRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "vets")?;
        Ok(Self { conn })
    }
}

impl VetRepository for SqliteVetRepository<'_> {
    fn insert_vet(&self, vet: &CreateVet) -> RepoResult<VetId> {
        self.conn.execute(
            "INSERT INTO vets (name, specialty) VALUES (?1, ?2);",
            params![vet.name.as_str(), vet.specialty.as_db_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_vet(&self, vet: &UpdateVet) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE vets SET name = ?1, specialty = ?2 WHERE id = ?3;",
            params![vet.name.as_str(), vet.specialty.as_db_str(), vet.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "vet",
                id: vet.id,
            });
        }

        Ok(())
    }

    fn get_vet(&self, id: VetId) -> RepoResult<Option<Vet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VET_SELECT_SQL} WHERE id = ?1;"))?;
        let vet = stmt
            .query_row(params![id], |row| Ok(parse_vet_row(row)))
            .optional()?;
        vet.transpose()
    }

    fn list_vets(&self) -> RepoResult<Vec<Vet>> {
        let mut stmt = self.conn.prepare(&format!("{VET_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut vets = Vec::new();

        while let Some(row) = rows.next()? {
            vets.push(parse_vet_row(row)?);
        }

        Ok(vets)
    }
}

fn parse_vet_row(row: &Row<'_>) -> RepoResult<Vet> {
    let specialty_text: String = row.get("specialty")?;
    let specialty = Specialty::from_db_str(&specialty_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid specialty `{specialty_text}` in vets.specialty"
        ))
    })?;

    Ok(Vet {
        id: row.get("id")?,
        name: row.get("name")?,
        specialty,
    })
}
