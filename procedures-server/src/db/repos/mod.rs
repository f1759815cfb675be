//! Procedure storage
//!
//! `ProcedureStore` is the seam between handlers and persistence. Every
//! operation maps onto exactly one SQL statement in the Postgres store.

pub mod memory;
pub mod procedures;

use async_trait::async_trait;

use crate::models::{ProcedureFields, ProcedureId};

pub use memory::InMemoryProcedureStore;
pub use procedures::{Procedure, ProcedureRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn procedure_not_found(id: ProcedureId) -> Self {
        Self::NotFound {
            resource: "procedure",
            id: id.to_string(),
        }
    }
}

/// Storage operations for procedures.
#[async_trait]
pub trait ProcedureStore: Send + Sync {
    /// Insert a new procedure and return the id storage assigned to it.
    async fn create(&self, fields: &ProcedureFields) -> Result<ProcedureId, DbError>;

    /// Replace every mutable field of `id`.
    ///
    /// Returns the number of affected rows; 0 means no such procedure.
    async fn update(&self, id: ProcedureId, fields: &ProcedureFields) -> Result<u64, DbError>;

    /// Remove `id`, returning the number of affected rows.
    async fn delete(&self, id: ProcedureId) -> Result<u64, DbError>;

    /// All procedures, ordered by id.
    async fn fetch_all(&self) -> Result<Vec<Procedure>, DbError>;

    /// A single procedure, or `DbError::NotFound`.
    async fn fetch_one(&self, id: ProcedureId) -> Result<Procedure, DbError>;
}
