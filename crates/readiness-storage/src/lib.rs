//! readiness-storage
//!
//! Document store abstraction. Documents are JSON objects addressed by key;
//! updates are expressed as field-path sets guarded by filter conditions and
//! applied atomically per document. Backed by memory (tests, local runs) or
//! S3 (ETag optimistic locking).

pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;
pub mod update;

pub use backend::Backend;
pub use memory::MemoryStore;
pub use s3::{S3Store, StoreConfig};
pub use store::{DocumentStore, UpdateOutcome};
pub use update::{Condition, FieldPath, Update};
