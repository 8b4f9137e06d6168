//! Questionnaires compiled into the binary.

pub mod ai_readiness;

use crate::definition::{Question, QuestionType, QuestionnaireDefinition};

/// Return all built-in questionnaire definitions.
pub fn all() -> Vec<QuestionnaireDefinition> {
    vec![ai_readiness::definition()]
}

/// Compact question constructor for the tables in the built-in modules.
pub(crate) fn question(
    id: &str,
    text: &str,
    required: bool,
    question_type: QuestionType,
    options: &[&str],
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        required,
        question_type,
        options: options.iter().map(|o| o.to_string()).collect(),
        help: None,
    }
}
