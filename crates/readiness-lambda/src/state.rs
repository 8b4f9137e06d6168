use std::sync::Arc;

use readiness_assessments::{AssessmentService, CompanyService};
use readiness_questionnaire::Registry;
use readiness_storage::{Backend, MemoryStore, S3Store};

use crate::config::{LambdaConfig, StoreKind};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub assessments: AssessmentService<Backend, Registry>,
    pub companies: CompanyService<Backend>,
    pub questionnaires: Arc<Registry>,
}

impl AppState {
    pub fn new(backend: Backend, questionnaires: Registry, config: &LambdaConfig) -> Self {
        let store = Arc::new(backend);
        let questionnaires = Arc::new(questionnaires);
        Self {
            assessments: AssessmentService::new(
                Arc::clone(&store),
                Arc::clone(&questionnaires),
                config.service.clone(),
            ),
            companies: CompanyService::new(store, config.service.clone()),
            questionnaires,
        }
    }

    /// Resolve the store and questionnaires named by `config`.
    pub async fn build(config: &LambdaConfig) -> eyre::Result<Self> {
        let mut questionnaires = Registry::builtin();
        if let Some(dir) = &config.questionnaire_dir {
            questionnaires.load_dir(dir)?;
        }

        let backend = match config.store {
            StoreKind::S3 => {
                let client = readiness_storage::client::build_client().await;
                Backend::S3(S3Store::new(client, config.store_config.clone()))
            }
            StoreKind::Memory => {
                tracing::warn!("using in-memory store; data is lost on shutdown");
                Backend::Memory(MemoryStore::new())
            }
        };

        Ok(Self::new(backend, questionnaires, config))
    }
}
