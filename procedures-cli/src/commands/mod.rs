//! Command implementations for the procedures CLI

pub mod serve;

pub use serve::run_serve;
