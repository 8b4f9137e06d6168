//! Completion evaluation.
//!
//! Every function here is pure: the same definition and the same answers
//! always produce the same [`CategoryCompletion`], whatever order the answers
//! were saved in. Nothing reads the cached statuses stored on documents.

use std::collections::BTreeMap;

use readiness_core::models::completion::{AssessmentProgress, CategoryCompletion, CompletionStatus};
use readiness_core::models::responses::{CategoryResponses, ResponseMap};

use crate::definition::{Category, QuestionnaireDefinition};

/// `round(100 * answered / required)`, or 100 when nothing is required.
pub fn percentage(answered: u32, required: u32) -> u8 {
    if required == 0 {
        return 100;
    }
    let ratio = f64::from(answered.min(required)) / f64::from(required);
    (ratio * 100.0).round() as u8
}

/// Status rule. A category with no required questions is vacuously
/// complete, even if it was never visited.
pub fn status(answered_required: u32, required: u32, answered_total: u32) -> CompletionStatus {
    if required == 0 {
        CompletionStatus::Completed
    } else if answered_total == 0 {
        CompletionStatus::NotStarted
    } else if answered_required == required {
        CompletionStatus::Completed
    } else {
        CompletionStatus::Partial
    }
}

/// Evaluate one category against its saved slice.
///
/// Answers keyed by ids that are not questions of `category` are ignored.
pub fn evaluate_category(
    category: &Category,
    responses: Option<&CategoryResponses>,
    last_modified: Option<jiff::Timestamp>,
) -> CategoryCompletion {
    let answered = |id: &str| responses.is_some_and(|r| r.is_answered(id));

    let mut required = 0u32;
    let mut answered_required = 0u32;
    let mut total = 0u32;
    let mut answered_total = 0u32;
    let mut missing_required = Vec::new();

    for question in category.questions() {
        total += 1;
        let is_answered = answered(&question.id);
        if is_answered {
            answered_total += 1;
        }
        if question.required {
            required += 1;
            if is_answered {
                answered_required += 1;
            } else {
                missing_required.push(question.id.clone());
            }
        }
    }

    CategoryCompletion {
        category_id: category.id.clone(),
        status: status(answered_required, required, answered_total),
        completion_percentage: percentage(answered_required, required),
        required_questions_count: required,
        answered_required_count: answered_required,
        total_questions_count: total,
        answered_total_count: answered_total,
        missing_required,
        last_modified,
    }
}

/// Evaluate every category of `definition`, including ones never saved.
pub fn evaluate(
    definition: &QuestionnaireDefinition,
    responses: &ResponseMap,
    timestamps: &BTreeMap<String, jiff::Timestamp>,
) -> AssessmentProgress {
    let categories: Vec<CategoryCompletion> = definition
        .categories
        .iter()
        .map(|c| {
            evaluate_category(
                c,
                responses.category(&c.id),
                timestamps.get(&c.id).copied(),
            )
        })
        .collect();

    let required: u32 = categories.iter().map(|c| c.required_questions_count).sum();
    let answered_required: u32 = categories.iter().map(|c| c.answered_required_count).sum();
    let all_categories_complete = categories.iter().all(CategoryCompletion::is_complete);

    AssessmentProgress {
        categories,
        all_categories_complete,
        required_questions_count: required,
        answered_required_count: answered_required,
        completion_percentage: percentage(answered_required, required),
    }
}
