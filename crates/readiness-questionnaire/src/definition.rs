use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::QuestionnaireError;

/// How a question is answered in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    FreeText,
    SingleSelect,
    MultiSelect,
    Numeric,
    Boolean,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Choices for select questions. Empty for other types.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub help: Option<String>,
}

/// Display grouping inside a category. Only affects question order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// All questions, subcategories flattened in definition order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.subcategories.iter().flat_map(|s| &s.questions)
    }

    pub fn required_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions().filter(|q| q.required)
    }
}

/// One immutable version of a questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionnaireDefinition {
    pub assessment_type: String,
    pub version: u32,
    pub name: String,
    pub categories: Vec<Category>,
}

impl QuestionnaireDefinition {
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Position of a category in definition order.
    pub fn category_index(&self, category_id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == category_id)
    }

    pub fn contains_category(&self, category_id: &str) -> bool {
        self.category_index(category_id).is_some()
    }

    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Check that category ids and question ids are each unique.
    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        let mut categories = HashSet::new();
        let mut questions = HashSet::new();

        for category in &self.categories {
            if !categories.insert(category.id.as_str()) {
                return Err(QuestionnaireError::DuplicateCategory {
                    assessment_type: self.assessment_type.clone(),
                    category_id: category.id.clone(),
                });
            }
            for question in category.questions() {
                if !questions.insert(question.id.as_str()) {
                    return Err(QuestionnaireError::DuplicateQuestion {
                        assessment_type: self.assessment_type.clone(),
                        version: self.version,
                        question_id: question.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
