//! In-memory procedure store.
//!
//! Same semantics as the Postgres repository: ids start at 1 and are never
//! reused, missing rows report 0 affected rows or `NotFound`. Data is lost
//! on restart, so this is for tests and `serve --in-memory` only.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, Procedure, ProcedureStore};
use crate::models::{ProcedureFields, ProcedureId};

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<ProcedureId, Procedure>,
    last_id: i64,
}

/// Procedure store held in a `BTreeMap`, ordered by id.
#[derive(Default)]
pub struct InMemoryProcedureStore {
    state: RwLock<MemoryState>,
}

impl InMemoryProcedureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProcedureStore for InMemoryProcedureStore {
    async fn create(&self, fields: &ProcedureFields) -> Result<ProcedureId, DbError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = ProcedureId::new(state.last_id);
        state
            .rows
            .insert(id, Procedure::from_fields(id, fields.clone()));

        tracing::debug!(%id, "Inserted procedure");
        Ok(id)
    }

    async fn update(&self, id: ProcedureId, fields: &ProcedureFields) -> Result<u64, DbError> {
        let mut state = self.state.write().await;
        let rows_affected = match state.rows.get_mut(&id) {
            Some(existing) => {
                *existing = Procedure::from_fields(id, fields.clone());
                1
            }
            None => 0,
        };

        tracing::debug!(%id, rows_affected, "Updated procedure");
        Ok(rows_affected)
    }

    async fn delete(&self, id: ProcedureId) -> Result<u64, DbError> {
        let removed = self.state.write().await.rows.remove(&id);
        let rows_affected = u64::from(removed.is_some());

        tracing::debug!(%id, rows_affected, "Deleted procedure");
        Ok(rows_affected)
    }

    async fn fetch_all(&self) -> Result<Vec<Procedure>, DbError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn fetch_one(&self, id: ProcedureId) -> Result<Procedure, DbError> {
        self.state
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::procedure_not_found(id))
    }
}
