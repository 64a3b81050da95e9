//! Assessment service: the boundary operations over the pure core.
//!
//! Flow: create_blueprint → generate_test (persist) → fetch_test →
//!       submit_answers (evaluate + persist report) → fetch_report.
//!
//! Only this layer talks to the `TestStore`. Errors from here are surfaced to the
//! caller as-is; nothing is retried.

use chrono::Utc;
use tracing::{info, warn};

use crate::assessment::blueprint::{compile_request, BlueprintRequest};
use crate::assessment::evaluator::evaluate;
use crate::assessment::generator::generate;
use crate::assessment::judge::CodeJudge;
use crate::errors::AppError;
use crate::models::assessment::{Blueprint, Report, Responses, Test};
use crate::store::TestStore;

/// Compiles a blueprint from raw requirement fields. Always succeeds.
pub fn create_blueprint(request: BlueprintRequest) -> Blueprint {
    compile_request(request)
}

/// Generates a test from a blueprint and stores it under a store-assigned id.
pub async fn generate_test(
    store: &dyn TestStore,
    blueprint: Option<Blueprint>,
) -> Result<Test, AppError> {
    let blueprint =
        blueprint.ok_or_else(|| AppError::InvalidInput("blueprint is required".to_string()))?;

    let questions = generate(&blueprint);
    let test = Test {
        id: store.allocate_id(),
        blueprint,
        questions,
        created_at: Utc::now(),
    };

    let total_time = test.total_time();
    if let Some(duration) = test.blueprint.duration {
        if total_time > duration {
            warn!(
                "Test {} estimates {total_time} min, over the requested {duration} min",
                test.id
            );
        }
    }

    store.put_test(&test.id, &test).await?;
    info!(
        "Generated test {} with {} questions ({total_time} min)",
        test.id,
        test.questions.len()
    );

    Ok(test)
}

/// Loads a stored test.
pub async fn fetch_test(store: &dyn TestStore, test_id: &str) -> Result<Test, AppError> {
    store
        .get_test(test_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test {test_id} not found")))
}

/// Scores responses against a stored test and stores the resulting report.
pub async fn submit_answers(
    store: &dyn TestStore,
    judge: &dyn CodeJudge,
    test_id: &str,
    responses: &Responses,
) -> Result<Report, AppError> {
    let test = fetch_test(store, test_id).await?;

    let report = evaluate(&test, responses, judge);
    store.put_report(test_id, &report).await?;

    info!(
        "Scored test {test_id}: {}/100 ({} answered of {})",
        report.overall_score,
        responses.len(),
        test.questions.len()
    );

    Ok(report)
}

/// Loads the latest report for a test.
pub async fn fetch_report(store: &dyn TestStore, test_id: &str) -> Result<Report, AppError> {
    store
        .get_report(test_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No report for test {test_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::judge::HeuristicCodeJudge;
    use crate::models::assessment::{Answer, QuestionType};
    use crate::store::InMemoryTestStore;

    fn request(stack: &[&str], types: &[&str], notes: &str) -> BlueprintRequest {
        BlueprintRequest {
            role: Some("Platform Engineer".to_string()),
            stack: stack.iter().map(|s| s.to_string()).collect(),
            types: types.iter().map(|s| s.to_string()).collect(),
            notes: Some(notes.to_string()),
            ..BlueprintRequest::default()
        }
    }

    #[tokio::test]
    async fn test_generate_without_blueprint_is_invalid_input() {
        let store = InMemoryTestStore::new();
        let err = generate_test(&store, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_generate_persists_and_fetch_returns_same_test() {
        let store = InMemoryTestStore::new();
        let blueprint = create_blueprint(request(&["React"], &["MCQ"], "at least 2 system design"));

        let test = generate_test(&store, Some(blueprint.clone())).await.unwrap();
        assert_eq!(test.blueprint, blueprint);
        assert_eq!(test.questions.len(), 3);
        assert_eq!(test.total_time(), 32);
        assert_eq!(test.questions[0].question_type(), QuestionType::Mcq);

        let fetched = fetch_test(&store, &test.id).await.unwrap();
        assert_eq!(fetched, test);
    }

    #[tokio::test]
    async fn test_fetch_unknown_test_is_not_found() {
        let store = InMemoryTestStore::new();
        let err = fetch_test(&store, "missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_unknown_test_is_not_found() {
        let store = InMemoryTestStore::new();
        let err = submit_answers(&store, &HeuristicCodeJudge, "missing", &Responses::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_empty_responses_scores_everything_incorrect() {
        let store = InMemoryTestStore::new();
        let test = generate_test(&store, Some(create_blueprint(BlueprintRequest::default())))
            .await
            .unwrap();

        let report = submit_answers(&store, &HeuristicCodeJudge, &test.id, &Responses::new())
            .await
            .unwrap();
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.findings.len(), 4);
        assert_eq!(report.weaknesses, vec!["general"]);
    }

    #[tokio::test]
    async fn test_submit_stores_report_for_fetch() {
        let store = InMemoryTestStore::new();
        let test = generate_test(&store, Some(create_blueprint(request(&["Go"], &["MCQ"], ""))))
            .await
            .unwrap();

        assert!(matches!(
            fetch_report(&store, &test.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));

        let mut responses = Responses::new();
        responses.insert("Q1".to_string(), Answer::choice(1));
        let report = submit_answers(&store, &HeuristicCodeJudge, &test.id, &responses)
            .await
            .unwrap();
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.strengths, vec!["Go"]);

        assert_eq!(fetch_report(&store, &test.id).await.unwrap(), report);
    }
}
