//! Document key conventions.
//!
//! Pure string functions. These define the canonical layout of documents in
//! whatever store backs the system (S3 bucket or in-memory map).

use uuid::Uuid;

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub const COMPANIES_PREFIX: &str = "companies/";

pub fn assessment(id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{id}.json")
}

pub fn company(id: Uuid) -> String {
    format!("{COMPANIES_PREFIX}{id}.json")
}

/// Recover the id from a key produced by [`assessment`] or [`company`].
pub fn id_from_key(key: &str) -> Option<Uuid> {
    let file = key.rsplit('/').next()?;
    let stem = file.strip_suffix(".json")?;
    Uuid::parse_str(stem).ok()
}
