//! Domain models with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod procedure;
pub mod validation;

pub use procedure::{ProcedureFields, ProcedureId};
pub use validation::ValidationError;
