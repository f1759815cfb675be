//! Database layer - connection pool and procedure stores
//!
//! # Design Principles
//!
//! - One shared connection pool, created at startup and passed in explicitly
//! - One statement per store operation, no multi-step transactions
//! - Missing rows surface as `DbError::NotFound`, never as default values

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
