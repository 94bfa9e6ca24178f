//! Visit repository contract and SQLite implementation.
//!
//! # Invariants
//! - Append-only: no update or delete primitives exist.
//! - Dates are stored as ISO-8601 `YYYY-MM-DD` text.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::pet::PetId;
use crate::model::visit::{MakeVisit, Visit, VisitId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const VISIT_SELECT_SQL: &str = "SELECT id, pet_id, vet_id, date, description FROM visits";
const VISIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage primitives for the `visits` table.
pub trait VisitRepository {
    fn insert_visit(&self, visit: &MakeVisit) -> RepoResult<VisitId>;
    fn get_visit(&self, id: VisitId) -> RepoResult<Option<Visit>>;
    /// Lists visits of one pet ordered by id ascending.
    fn list_pet_visits(&self, pet_id: PetId) -> RepoResult<Vec<Visit>>;
}

impl<T: VisitRepository + ?Sized> VisitRepository for &T {
    fn insert_visit(&self, visit: &MakeVisit) -> RepoResult<VisitId> {
        (**self).insert_visit(visit)
    }

    fn get_visit(&self, id: VisitId) -> RepoResult<Option<Visit>> {
        (**self).get_visit(id)
    }

    fn list_pet_visits(&self, pet_id: PetId) -> RepoResult<Vec<Visit>> {
        (**self).list_pet_visits(pet_id)
    }
}

/// SQLite-backed visit repository.
pub struct SqliteVisitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVisitRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "visits")?;
        Ok(Self { conn })
    }
}

impl VisitRepository for SqliteVisitRepository<'_> {
    fn insert_visit(&self, visit: &MakeVisit) -> RepoResult<VisitId> {
        self.conn.execute(
            "INSERT INTO visits (pet_id, vet_id, date, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                visit.pet_id,
                visit.vet_id,
                visit.date.format(VISIT_DATE_FORMAT).to_string(),
                visit.description.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_visit(&self, id: VisitId) -> RepoResult<Option<Visit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VISIT_SELECT_SQL} WHERE id = ?1;"))?;
        let visit = stmt
            .query_row(params![id], |row| Ok(parse_visit_row(row)))
            .optional()?;
        visit.transpose()
    }

    fn list_pet_visits(&self, pet_id: PetId) -> RepoResult<Vec<Visit>> {
        let mut stmt = self.conn.prepare(&format!(
            "{VISIT_SELECT_SQL} WHERE pet_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![pet_id])?;
        let mut visits = Vec::new();

        while let Some(row) = rows.next()? {
            visits.push(parse_visit_row(row)?);
        }

        Ok(visits)
    }
}

fn parse_visit_row(row: &Row<'_>) -> RepoResult<Visit> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, VISIT_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in visits.date"))
    })?;

    Ok(Visit {
        id: row.get("id")?,
        pet_id: row.get("pet_id")?,
        vet_id: row.get("vet_id")?,
        date,
        description: row.get("description")?,
    })
}
