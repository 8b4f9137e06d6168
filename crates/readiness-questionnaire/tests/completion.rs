use std::collections::BTreeMap;

use readiness_core::models::completion::CompletionStatus;
use readiness_core::models::responses::{CategoryResponses, ResponseMap};
use readiness_questionnaire::completion::{evaluate, evaluate_category, percentage};
use readiness_questionnaire::{
    Category, Question, QuestionType, QuestionnaireDefinition, Subcategory,
};

fn q(id: &str, required: bool) -> Question {
    Question {
        id: id.to_string(),
        text: id.to_string(),
        required,
        question_type: QuestionType::FreeText,
        options: Vec::new(),
        help: None,
    }
}

fn category(id: &str, questions: Vec<Question>) -> Category {
    Category {
        id: id.to_string(),
        name: id.to_string(),
        description: None,
        subcategories: vec![Subcategory {
            id: format!("{id}_sub"),
            name: "sub".to_string(),
            questions,
        }],
    }
}

fn definition() -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        assessment_type: "test".to_string(),
        version: 1,
        name: "Test".to_string(),
        categories: vec![
            category("c1", vec![q("q1", true), q("q2", true)]),
            category("c2", vec![]),
            category("c3", vec![q("q3", false)]),
        ],
    }
}

#[test]
fn empty_category_is_vacuously_complete() {
    let c = category("empty", vec![]);
    let completion = evaluate_category(&c, None, None);
    assert_eq!(completion.status, CompletionStatus::Completed);
    assert_eq!(completion.completion_percentage, 100);
    assert_eq!(completion.total_questions_count, 0);
}

#[test]
fn optional_only_category_is_complete_without_answers() {
    let c = category("opt", vec![q("a", false), q("b", false)]);
    let completion = evaluate_category(&c, None, None);
    assert_eq!(completion.status, CompletionStatus::Completed);
    assert_eq!(completion.completion_percentage, 100);
    assert_eq!(completion.answered_total_count, 0);
}

#[test]
fn unvisited_required_category_is_not_started() {
    let c = category("c1", vec![q("q1", true), q("q2", true)]);
    let completion = evaluate_category(&c, None, None);
    assert_eq!(completion.status, CompletionStatus::NotStarted);
    assert_eq!(completion.completion_percentage, 0);
    assert_eq!(completion.missing_required, vec!["q1", "q2"]);
}

#[test]
fn partial_then_completed() {
    let c = category("c1", vec![q("q1", true), q("q2", true)]);

    let one = CategoryResponses::new().with("q1", "a");
    let completion = evaluate_category(&c, Some(&one), None);
    assert_eq!(completion.status, CompletionStatus::Partial);
    assert_eq!(completion.answered_required_count, 1);
    assert_eq!(completion.required_questions_count, 2);
    assert_eq!(completion.completion_percentage, 50);
    assert_eq!(completion.missing_required, vec!["q2"]);

    let both = one.with("q2", "b");
    let completion = evaluate_category(&c, Some(&both), None);
    assert_eq!(completion.status, CompletionStatus::Completed);
    assert_eq!(completion.completion_percentage, 100);
    assert!(completion.missing_required.is_empty());
}

#[test]
fn only_optional_answers_give_partial() {
    let c = category("c", vec![q("req", true), q("opt", false)]);
    let slice = CategoryResponses::new().with("opt", "something");
    let completion = evaluate_category(&c, Some(&slice), None);
    assert_eq!(completion.status, CompletionStatus::Partial);
    assert_eq!(completion.completion_percentage, 0);
    assert_eq!(completion.answered_total_count, 1);
}

#[test]
fn zero_and_false_count_as_answered() {
    let c = category("c", vec![q("n", true), q("b", true)]);
    let slice = CategoryResponses::new().with("n", 0i64).with("b", false);
    let completion = evaluate_category(&c, Some(&slice), None);
    assert_eq!(completion.status, CompletionStatus::Completed);
}

#[test]
fn empty_values_count_as_unanswered() {
    let c = category("c", vec![q("t", true), q("m", true), q("n", true)]);
    let slice = CategoryResponses::new()
        .with("t", "")
        .with("m", Vec::<String>::new())
        .with_null("n");
    let completion = evaluate_category(&c, Some(&slice), None);
    assert_eq!(completion.status, CompletionStatus::NotStarted);
    assert_eq!(completion.answered_total_count, 0);
}

#[test]
fn unknown_question_ids_are_ignored() {
    let c = category("c", vec![q("q1", true)]);
    let slice = CategoryResponses::new().with("stray", "x");
    let completion = evaluate_category(&c, Some(&slice), None);
    assert_eq!(completion.status, CompletionStatus::NotStarted);
    assert_eq!(completion.answered_total_count, 0);
}

#[test]
fn percentage_rounds_to_nearest() {
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(0, 0), 100);
    assert_eq!(percentage(5, 5), 100);
}

#[test]
fn evaluate_covers_every_category_in_order() {
    let def = definition();
    let progress = evaluate(&def, &ResponseMap::new(), &BTreeMap::new());

    let ids: Vec<_> = progress
        .categories
        .iter()
        .map(|c| c.category_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);
    assert!(!progress.all_categories_complete);
    assert_eq!(progress.incomplete_categories().len(), 1);
    assert_eq!(progress.required_questions_count, 2);
    assert_eq!(progress.completion_percentage, 0);
}

#[test]
fn evaluate_is_independent_of_save_order() {
    let def = definition();
    let c1 = CategoryResponses::new().with("q1", "a").with("q2", "b");
    let c3 = CategoryResponses::new().with("q3", "c");

    let forward = ResponseMap::new()
        .with_category("c1", c1.clone())
        .with_category("c3", c3.clone());
    let backward = ResponseMap::new()
        .with_category("c3", c3)
        .with_category("c1", CategoryResponses::new().with("q1", "stale"))
        .with_category("c1", c1);

    let a = evaluate(&def, &forward, &BTreeMap::new());
    let b = evaluate(&def, &backward, &BTreeMap::new());
    assert_eq!(a, b);
    assert!(a.all_categories_complete);
    assert_eq!(a.completion_percentage, 100);
}

#[test]
fn last_modified_is_carried_through() {
    let def = definition();
    let ts: jiff::Timestamp = "2026-01-02T03:04:05Z".parse().unwrap();
    let timestamps = BTreeMap::from([("c1".to_string(), ts)]);
    let progress = evaluate(&def, &ResponseMap::new(), &timestamps);
    assert_eq!(progress.category("c1").unwrap().last_modified, Some(ts));
    assert_eq!(progress.category("c2").unwrap().last_modified, None);
}
