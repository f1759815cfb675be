//! Procedure repository backed by PostgreSQL
//!
//! One parameterized statement per operation, each run on a connection
//! checked out of the shared pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{DbError, ProcedureStore};
use crate::models::{ProcedureFields, ProcedureId};

/// Procedure record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Procedure {
    #[sqlx(try_from = "i64")]
    pub id: ProcedureId,
    pub last_modified_on: DateTime<Utc>,
    pub structure_id: i64,
    pub structure_version: i64,
    pub name: String,
    pub commodity: String,
    pub consultant_id: i64,
    #[sqlx(rename = "deadline")]
    pub dead_line: DateTime<Utc>,
}

impl Procedure {
    pub fn from_fields(id: ProcedureId, fields: ProcedureFields) -> Self {
        Self {
            id,
            last_modified_on: fields.last_modified_on,
            structure_id: fields.structure_id,
            structure_version: fields.structure_version,
            name: fields.name,
            commodity: fields.commodity,
            consultant_id: fields.consultant_id,
            dead_line: fields.dead_line,
        }
    }

    /// The mutable part of this record.
    pub fn fields(&self) -> ProcedureFields {
        ProcedureFields {
            last_modified_on: self.last_modified_on,
            structure_id: self.structure_id,
            structure_version: self.structure_version,
            name: self.name.clone(),
            commodity: self.commodity.clone(),
            consultant_id: self.consultant_id,
            dead_line: self.dead_line,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT p.id, p.last_modified_on, p.structure_id, p.structure_version, \
     p.name, p.commodity, p.consultant_id, p.deadline FROM procedure p";

/// Procedure repository
#[derive(Clone)]
pub struct ProcedureRepo {
    pool: PgPool,
}

impl ProcedureRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcedureStore for ProcedureRepo {
    async fn create(&self, fields: &ProcedureFields) -> Result<ProcedureId, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO procedure
                (last_modified_on, structure_id, structure_version, name, commodity, consultant_id, deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(fields.last_modified_on)
        .bind(fields.structure_id)
        .bind(fields.structure_version)
        .bind(&fields.name)
        .bind(&fields.commodity)
        .bind(fields.consultant_id)
        .bind(fields.dead_line)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, "Inserted procedure");
        Ok(ProcedureId::new(id))
    }

    async fn update(&self, id: ProcedureId, fields: &ProcedureFields) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE procedure
            SET last_modified_on = $2,
                structure_id = $3,
                structure_version = $4,
                name = $5,
                commodity = $6,
                consultant_id = $7,
                deadline = $8
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(fields.last_modified_on)
        .bind(fields.structure_id)
        .bind(fields.structure_version)
        .bind(&fields.name)
        .bind(&fields.commodity)
        .bind(fields.consultant_id)
        .bind(fields.dead_line)
        .execute(&self.pool)
        .await?;

        let rows_affected = result.rows_affected();
        tracing::debug!(%id, rows_affected, "Updated procedure");
        Ok(rows_affected)
    }

    async fn delete(&self, id: ProcedureId) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM procedure WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        let rows_affected = result.rows_affected();
        tracing::debug!(%id, rows_affected, "Deleted procedure");
        Ok(rows_affected)
    }

    async fn fetch_all(&self) -> Result<Vec<Procedure>, DbError> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY p.id");
        let procedures: Vec<Procedure> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        tracing::debug!(count = procedures.len(), "Fetched all procedures");
        Ok(procedures)
    }

    async fn fetch_one(&self, id: ProcedureId) -> Result<Procedure, DbError> {
        let sql = format!("{SELECT_COLUMNS} WHERE p.id = $1");
        sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::procedure_not_found(id))
    }
}
