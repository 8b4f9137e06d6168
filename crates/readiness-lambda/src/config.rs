use std::path::PathBuf;

use readiness_assessments::ServiceConfig;
use readiness_storage::StoreConfig;

pub const STORE: &str = "READINESS_STORE";
pub const BUCKET: &str = "READINESS_BUCKET";
pub const CONFLICT_RETRIES: &str = "READINESS_CONFLICT_RETRIES";
pub const QUESTIONNAIRE_DIR: &str = "READINESS_QUESTIONNAIRE_DIR";

/// Set by the Lambda runtime in every deployed function.
pub const LAMBDA_FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    S3,
    Memory,
}

/// Everything the binary needs at startup, resolved once.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub store: StoreKind,
    pub store_config: StoreConfig,
    pub service: ServiceConfig,
    /// Extra questionnaire definitions loaded on top of the built-ins.
    pub questionnaire_dir: Option<PathBuf>,
}

impl LambdaConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables fall back to
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup(STORE).as_deref().map(str::trim) {
            None | Some("") | Some("s3") => StoreKind::S3,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid value '{other}' for {STORE}: expected s3 or memory"
                ));
            }
        };

        if store == StoreKind::Memory && lookup(LAMBDA_FUNCTION_NAME).is_some() {
            return Err(eyre::eyre!(
                "{STORE}=memory is for tests and local runs; deployed functions must use s3"
            ));
        }

        let mut store_config = StoreConfig::default();
        if let Some(bucket) = lookup(BUCKET).filter(|b| !b.trim().is_empty()) {
            store_config.bucket = bucket;
        }
        if let Some(retries) = lookup(CONFLICT_RETRIES) {
            store_config.max_conflict_retries = retries.trim().parse().map_err(|e| {
                eyre::eyre!("invalid value '{retries}' for {CONFLICT_RETRIES}: {e}")
            })?;
        }

        let service = ServiceConfig::from_lookup(&lookup)?;
        let questionnaire_dir = lookup(QUESTIONNAIRE_DIR)
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            store,
            store_config,
            service,
            questionnaire_dir,
        })
    }
}
