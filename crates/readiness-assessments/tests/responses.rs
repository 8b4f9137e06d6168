mod common;

use readiness_assessments::AssessmentError;
use readiness_core::keys;
use readiness_core::models::answer::Answer;
use readiness_core::models::assessment::AssessmentStatus;
use readiness_core::models::completion::CompletionStatus;
use readiness_core::models::responses::CategoryResponses;
use readiness_storage::DocumentStore;
use readiness_storage::error::StorageError;

use common::{FlakyStore, TYPE, company, fixture, fixture_with};

#[tokio::test]
async fn merge_is_idempotent_per_category() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    let answers = CategoryResponses::new().with("q1", "a").with("q2", "b");
    let once = f
        .assessments
        .save_category_responses(a.id, "c1", answers.clone())
        .await
        .unwrap();
    let twice = f
        .assessments
        .save_category_responses(a.id, "c1", answers)
        .await
        .unwrap();

    assert_eq!(once.responses, twice.responses);
    let (first, second) = (&once.category_statuses["c1"], &twice.category_statuses["c1"]);
    assert_eq!(first.status, second.status);
    assert_eq!(first.completion_percentage, second.completion_percentage);
    assert_eq!(first.answered_total_count, second.answered_total_count);
}

#[tokio::test]
async fn saving_one_category_leaves_others_untouched() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    let c3 = CategoryResponses::new().with("q3", true).with("q4", 7i64);
    let after_c3 = f
        .assessments
        .save_category_responses(a.id, "c3", c3.clone())
        .await
        .unwrap();
    let c3_status = after_c3.category_statuses["c3"].clone();

    let after_c1 = f
        .assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new().with("q1", "x"))
        .await
        .unwrap();

    assert_eq!(after_c1.responses.category("c3"), Some(&c3));
    assert_eq!(after_c1.category_statuses["c3"], c3_status);
}

#[tokio::test]
async fn category_save_replaces_the_whole_slice() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    f.assessments
        .save_category_responses(
            a.id,
            "c1",
            CategoryResponses::new().with("q1", "a").with("q2", "b"),
        )
        .await
        .unwrap();
    let after = f
        .assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new().with("q2", "c"))
        .await
        .unwrap();

    let c1 = after.responses.category("c1").unwrap();
    assert_eq!(c1.get("q1"), None);
    assert_eq!(c1.get("q2"), Some(&Answer::Text("c".to_string())));
    assert_eq!(after.category_statuses["c1"].status, CompletionStatus::Partial);
}

#[tokio::test]
async fn concurrent_saves_of_different_categories_both_survive() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    let (left, right) = tokio::join!(
        f.assessments
            .save_category_responses(a.id, "c1", CategoryResponses::new().with("q1", "a")),
        f.assessments
            .save_category_responses(a.id, "c3", CategoryResponses::new().with("q3", false)),
    );
    left.unwrap();
    right.unwrap();

    let responses = f.assessments.get_responses(a.id).await.unwrap();
    assert!(responses.category("c1").is_some());
    assert!(responses.category("c3").is_some());
}

#[tokio::test]
async fn unknown_category_is_rejected_without_writing() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();
    let before = f.store.find_one(&keys::assessment(a.id)).await.unwrap();

    let err = f
        .assessments
        .save_category_responses(a.id, "nope", CategoryResponses::new().with("q1", "a"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::InvalidCategory { ref category_id, .. } if category_id == "nope"
    ));
    assert_eq!(f.store.find_one(&keys::assessment(a.id)).await.unwrap(), before);
}

#[tokio::test]
async fn unknown_assessment_is_not_found() {
    let f = fixture();
    let err = f
        .assessments
        .save_category_responses(uuid::Uuid::new_v4(), "c1", CategoryResponses::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::NotFound { kind: "assessment", .. }));
}

#[tokio::test]
async fn never_saved_categories_are_absent() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();
    assert!(f.assessments.get_responses(a.id).await.unwrap().is_empty());

    f.assessments
        .save_category_responses(a.id, "c3", CategoryResponses::new().with("q3", true))
        .await
        .unwrap();
    let responses = f.assessments.get_responses(a.id).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert!(responses.category("c1").is_none());
}

#[tokio::test]
async fn empty_save_does_not_start_the_assessment() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    let saved = f
        .assessments
        .save_category_responses(
            a.id,
            "c1",
            CategoryResponses::new().with("q1", "  ").with_null("q2"),
        )
        .await
        .unwrap();
    assert_eq!(saved.status, AssessmentStatus::Draft);
    assert_eq!(saved.category_statuses["c1"].status, CompletionStatus::NotStarted);

    let started = f
        .assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new().with("q1", "a"))
        .await
        .unwrap();
    assert_eq!(started.status, AssessmentStatus::InProgress);

    let blank_again = f
        .assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new())
        .await
        .unwrap();
    assert_eq!(blank_again.status, AssessmentStatus::InProgress);
}

#[tokio::test]
async fn answers_to_unknown_questions_do_not_start_the_assessment() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    let saved = f
        .assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new().with("not_a_question", "x"))
        .await
        .unwrap();
    assert_eq!(saved.status, AssessmentStatus::Draft);
    assert_eq!(saved.category_statuses["c1"].status, CompletionStatus::NotStarted);
    assert_eq!(saved.category_statuses["c1"].answered_total_count, 0);

    let stored = f.assessments.get_responses(a.id).await.unwrap();
    assert_eq!(
        stored.category("c1").and_then(|c| c.get("not_a_question")),
        Some(&Answer::Text("x".to_string()))
    );
}

#[tokio::test]
async fn failed_write_leaves_stored_responses_unchanged() {
    let f = fixture_with(FlakyStore::default(), Default::default());
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();
    f.assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new().with("q1", "a"))
        .await
        .unwrap();

    f.store.fail(true);
    let err = f
        .assessments
        .save_category_responses(a.id, "c1", CategoryResponses::new().with("q1", "b"))
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Store(StorageError::PutObject(_))));

    f.store.fail(false);
    let responses = f.assessments.get_responses(a.id).await.unwrap();
    assert_eq!(responses.category("c1").unwrap().get("q1"), Some(&Answer::Text("a".to_string())));
}

#[tokio::test]
async fn merge_result_reflects_the_write() {
    let f = fixture();
    let company = company(&f).await;
    let a = f
        .assessments
        .create_assessment("Q1", company.id, TYPE)
        .await
        .unwrap();

    let returned = f
        .assessments
        .save_category_responses(a.id, "c3", CategoryResponses::new().with("q3", true))
        .await
        .unwrap();
    let reloaded = f.assessments.get_assessment(a.id).await.unwrap();

    assert_eq!(returned.responses, reloaded.responses);
    assert_eq!(returned.category_statuses, reloaded.category_statuses);
    assert!(returned.response_timestamps.contains_key("c3"));
    assert_eq!(
        returned.category_statuses["c3"].last_modified,
        returned.response_timestamps.get("c3").copied()
    );
}
