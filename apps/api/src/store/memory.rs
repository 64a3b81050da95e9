use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::assessment::{Report, Test};
use crate::store::TestStore;

/// Process-local store. Contents are lost on restart; used for development and tests.
#[derive(Default)]
pub struct InMemoryTestStore {
    tests: RwLock<HashMap<String, Test>>,
    reports: RwLock<HashMap<String, Report>>,
}

impl InMemoryTestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TestStore for InMemoryTestStore {
    async fn get_test(&self, id: &str) -> Result<Option<Test>, AppError> {
        Ok(self.tests.read().await.get(id).cloned())
    }

    async fn put_test(&self, id: &str, test: &Test) -> Result<(), AppError> {
        self.tests
            .write()
            .await
            .insert(id.to_string(), test.clone());
        Ok(())
    }

    async fn get_report(&self, test_id: &str) -> Result<Option<Report>, AppError> {
        Ok(self.reports.read().await.get(test_id).cloned())
    }

    async fn put_report(&self, test_id: &str, report: &Report) -> Result<(), AppError> {
        self.reports
            .write()
            .await
            .insert(test_id.to_string(), report.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::Blueprint;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn make_test(id: &str) -> Test {
        Test {
            id: id.to_string(),
            blueprint: Blueprint::default(),
            questions: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get_test() {
        let store = InMemoryTestStore::new();
        let id = store.allocate_id();
        let test = make_test(&id);

        store.put_test(&id, &test).await.unwrap();
        assert_eq!(store.get_test(&id).await.unwrap(), Some(test));
    }

    #[tokio::test]
    async fn test_missing_test_is_none() {
        let store = InMemoryTestStore::new();
        assert!(store.get_test("nope").await.unwrap().is_none());
        assert!(store.get_report("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_report_overwrites_previous() {
        let store = InMemoryTestStore::new();
        let mut report = Report {
            overall_score: 10,
            per_skill: BTreeMap::new(),
            strengths: vec![],
            weaknesses: vec![],
            findings: vec![],
            recommendations: vec![],
        };
        store.put_report("t1", &report).await.unwrap();
        report.overall_score = 90;
        store.put_report("t1", &report).await.unwrap();

        let stored = store.get_report("t1").await.unwrap().unwrap();
        assert_eq!(stored.overall_score, 90);
    }

    #[test]
    fn test_allocated_ids_are_unique() {
        let store = InMemoryTestStore::new();
        assert_ne!(store.allocate_id(), store.allocate_id());
    }
}
