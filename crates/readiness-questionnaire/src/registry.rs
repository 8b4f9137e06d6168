use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::builtin;
use crate::definition::QuestionnaireDefinition;
use crate::error::QuestionnaireError;

/// Source of questionnaire definitions consumed by the assessment service.
pub trait QuestionnaireProvider: Send + Sync {
    /// A specific version of an assessment type.
    fn get_definition(
        &self,
        assessment_type: &str,
        version: u32,
    ) -> Result<Arc<QuestionnaireDefinition>, QuestionnaireError>;

    /// Highest registered version of an assessment type.
    fn latest(
        &self,
        assessment_type: &str,
    ) -> Result<Arc<QuestionnaireDefinition>, QuestionnaireError>;

    /// Every registered definition.
    fn list(&self) -> Vec<Arc<QuestionnaireDefinition>>;
}

/// In-memory provider keyed by `(assessment_type, version)`.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    definitions: BTreeMap<(String, u32), Arc<QuestionnaireDefinition>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in questionnaire.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for definition in builtin::all() {
            if let Err(e) = registry.register(definition) {
                tracing::error!(error = %e, "skipping invalid built-in questionnaire");
            }
        }
        registry
    }

    /// Validate and add a definition. Versions are immutable: registering the
    /// same `(type, version)` twice fails.
    pub fn register(
        &mut self,
        definition: QuestionnaireDefinition,
    ) -> Result<(), QuestionnaireError> {
        definition.validate()?;
        let key = (definition.assessment_type.clone(), definition.version);
        if self.definitions.contains_key(&key) {
            return Err(QuestionnaireError::AlreadyRegistered {
                assessment_type: key.0,
                version: key.1,
            });
        }
        tracing::debug!(
            assessment_type = %definition.assessment_type,
            version = definition.version,
            categories = definition.categories.len(),
            "questionnaire registered"
        );
        self.definitions.insert(key, Arc::new(definition));
        Ok(())
    }

    /// Register every `*.json` file in `dir`. Returns how many were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, QuestionnaireError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in &paths {
            let contents = std::fs::read(path)?;
            let definition: QuestionnaireDefinition = serde_json::from_slice(&contents)?;
            self.register(definition)?;
        }

        tracing::info!(dir = %dir.display(), count = paths.len(), "questionnaires loaded");
        Ok(paths.len())
    }
}

impl QuestionnaireProvider for Registry {
    fn get_definition(
        &self,
        assessment_type: &str,
        version: u32,
    ) -> Result<Arc<QuestionnaireDefinition>, QuestionnaireError> {
        self.definitions
            .get(&(assessment_type.to_string(), version))
            .cloned()
            .ok_or_else(|| QuestionnaireError::UnknownQuestionnaire {
                assessment_type: assessment_type.to_string(),
                version: Some(version),
            })
    }

    fn latest(
        &self,
        assessment_type: &str,
    ) -> Result<Arc<QuestionnaireDefinition>, QuestionnaireError> {
        self.definitions
            .iter()
            .filter(|((t, _), _)| t == assessment_type)
            .max_by_key(|((_, v), _)| *v)
            .map(|(_, d)| Arc::clone(d))
            .ok_or_else(|| QuestionnaireError::UnknownQuestionnaire {
                assessment_type: assessment_type.to_string(),
                version: None,
            })
    }

    fn list(&self) -> Vec<Arc<QuestionnaireDefinition>> {
        self.definitions.values().cloned().collect()
    }
}
