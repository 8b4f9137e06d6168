//! readiness-core
//!
//! Pure domain types and document key conventions. No storage or HTTP
//! dependency; this is the shared vocabulary of the Readiness system.

pub mod document;
pub mod error;
pub mod fields;
pub mod keys;
pub mod models;
