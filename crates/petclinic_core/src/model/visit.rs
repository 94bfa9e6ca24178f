//! Visit domain model.
//!
//! # Invariants
//! - Visits are append-only: there is no update or delete input type.
//! - `pet_id`/`vet_id` referenced existing rows when the visit was created.

use super::pet::{Pet, PetId};
use super::vet::{Vet, VetId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned visit identifier.
pub type VisitId = i64;

/// Persisted visit record, referencing pet and vet by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: VisitId,
    pub pet_id: PetId,
    pub vet_id: VetId,
    pub date: NaiveDate,
    pub description: String,
}

/// Input for recording a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeVisit {
    pub pet_id: PetId,
    pub vet_id: VetId,
    pub date: NaiveDate,
    pub description: String,
}

/// Transport-facing visit with its pet and vet resolved.
///
/// Built only by `VisitMapper::to_view`, which never emits a partial view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitView {
    pub id: VisitId,
    pub pet: Pet,
    pub vet: Vet,
    pub date: NaiveDate,
    pub description: String,
}
