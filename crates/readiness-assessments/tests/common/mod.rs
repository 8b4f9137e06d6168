#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use readiness_assessments::{AssessmentService, CompanyService, NewCompany, ServiceConfig};
use readiness_core::models::company::Company;
use readiness_questionnaire::{
    Category, Question, QuestionType, QuestionnaireDefinition, Registry, Subcategory,
};
use readiness_storage::error::StorageError;
use readiness_storage::{DocumentStore, MemoryStore, Update, UpdateOutcome};
use serde_json::Value;

pub const TYPE: &str = "scenario";

/// Questionnaire whose only category has no required questions.
pub const OPTIONAL_TYPE: &str = "optional_only";

fn question(id: &str, required: bool, question_type: QuestionType) -> Question {
    Question {
        id: id.to_string(),
        text: id.to_string(),
        required,
        question_type,
        options: Vec::new(),
        help: None,
    }
}

fn category(id: &str, questions: Vec<Question>) -> Category {
    Category {
        id: id.to_string(),
        name: id.to_uppercase(),
        description: None,
        subcategories: vec![Subcategory {
            id: format!("{id}_main"),
            name: "Main".to_string(),
            questions,
        }],
    }
}

/// c1: q1, q2 required. c2: no questions. c3: q3 required, q4 optional.
pub fn definition() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        assessment_type: TYPE.to_string(),
        version: 1,
        name: "Scenario".to_string(),
        categories: vec![
            category(
                "c1",
                vec![
                    question("q1", true, QuestionType::FreeText),
                    question("q2", true, QuestionType::FreeText),
                ],
            ),
            category("c2", vec![]),
            category(
                "c3",
                vec![
                    question("q3", true, QuestionType::Boolean),
                    question("q4", false, QuestionType::Numeric),
                ],
            ),
        ],
    }
}

pub fn optional_definition() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        assessment_type: OPTIONAL_TYPE.to_string(),
        version: 1,
        name: "Optional".to_string(),
        categories: vec![category("notes", vec![question("n1", false, QuestionType::FreeText)])],
    }
}

pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(definition()).unwrap();
    registry.register(optional_definition()).unwrap();
    registry
}

pub struct Fixture<S: DocumentStore> {
    pub store: Arc<S>,
    pub assessments: AssessmentService<S, Registry>,
    pub companies: CompanyService<S>,
}

pub fn fixture_with<S: DocumentStore>(store: S, config: ServiceConfig) -> Fixture<S> {
    let store = Arc::new(store);
    Fixture {
        assessments: AssessmentService::new(
            Arc::clone(&store),
            Arc::new(registry()),
            config.clone(),
        ),
        companies: CompanyService::new(Arc::clone(&store), config),
        store,
    }
}

pub fn fixture() -> Fixture<MemoryStore> {
    fixture_with(MemoryStore::new(), ServiceConfig::default())
}

pub async fn company<S: DocumentStore>(fixture: &Fixture<S>) -> Company {
    fixture
        .companies
        .create_company(NewCompany {
            name: "Acme".to_string(),
            industry: Some("manufacturing".to_string()),
            description: None,
        })
        .await
        .unwrap()
}

/// Memory store whose updates can be switched to fail with an I/O error.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_updates: AtomicBool,
}

impl FlakyStore {
    pub fn fail(&self, on: bool) {
        self.fail_updates.store(on, Ordering::SeqCst);
    }
}

impl DocumentStore for FlakyStore {
    async fn find_one(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.inner.find_one(key).await
    }

    async fn insert_one(&self, key: &str, document: Value) -> Result<(), StorageError> {
        self.inner.insert_one(key, document).await
    }

    async fn update_one(&self, key: &str, update: &Update) -> Result<UpdateOutcome, StorageError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StorageError::PutObject("connection reset".to_string()));
        }
        self.inner.update_one(key, update).await
    }

    async fn delete_one(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.delete_one(key).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>, StorageError> {
        self.inner.list(prefix).await
    }
}
