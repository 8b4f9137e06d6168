use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid value '{value}' for {key}: expected {expected}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// How delete requests remove documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Mark `isActive = false` and stamp `deletedAt`; the document stays.
    Soft,
    /// Remove the document.
    Hard,
}

impl FromStr for DeleteMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(DeleteMode::Soft),
            "hard" => Ok(DeleteMode::Hard),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePolicy {
    pub mode: DeleteMode,
    /// Only DRAFT assessments may be deleted. Does not apply to companies.
    pub draft_only: bool,
}

impl Default for DeletePolicy {
    fn default() -> Self {
        Self {
            mode: DeleteMode::Soft,
            draft_only: true,
        }
    }
}

/// Settings for [`crate::AssessmentService`] and [`crate::CompanyService`].
///
/// Built once at startup and passed in; tests construct their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub delete_policy: DeletePolicy,
}

pub const DELETE_MODE: &str = "READINESS_DELETE_MODE";
pub const DELETE_DRAFT_ONLY: &str = "READINESS_DELETE_DRAFT_ONLY";

impl ServiceConfig {
    /// Build from a variable lookup. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(DELETE_MODE) {
            config.delete_policy.mode = value.parse().map_err(|()| ConfigError {
                key: DELETE_MODE,
                value: value.clone(),
                expected: "soft or hard",
            })?;
        }

        if let Some(value) = lookup(DELETE_DRAFT_ONLY) {
            config.delete_policy.draft_only = parse_bool(&value).ok_or(ConfigError {
                key: DELETE_DRAFT_ONLY,
                value: value.clone(),
                expected: "true or false",
            })?;
        }

        Ok(config)
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
