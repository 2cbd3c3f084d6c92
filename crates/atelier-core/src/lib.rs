//! # atelier-core
//!
//! Core types and abstractions for the atelier description service.
//!
//! This crate provides the foundational data structures, error taxonomy,
//! and shared constants that other atelier crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
