//! procedures-server: HTTP CRUD service for procedures
//!
//! JSON requests on `/procedures` are mapped onto single parameterized SQL
//! statements against PostgreSQL through the `ProcedureStore` trait.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, InMemoryProcedureStore, Procedure, ProcedureRepo, ProcedureStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{ProcedureFields, ProcedureId, ValidationError};
