use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::assessment::{Report, Test};
use crate::store::TestStore;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS assessment_tests (
        id          TEXT PRIMARY KEY,
        test        JSONB NOT NULL,
        report      JSONB,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// PostgreSQL-backed store: one row per test, the latest report alongside it.
pub struct PgTestStore {
    pool: PgPool,
}

impl PgTestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and makes sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("assessment_tests table ready");
        Ok(())
    }
}

#[async_trait]
impl TestStore for PgTestStore {
    async fn get_test(&self, id: &str) -> Result<Option<Test>, AppError> {
        let row: Option<Json<Test>> =
            sqlx::query_scalar("SELECT test FROM assessment_tests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|Json(test)| test))
    }

    async fn put_test(&self, id: &str, test: &Test) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO assessment_tests (id, test)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET test = EXCLUDED.test, updated_at = now()
            "#,
        )
        .bind(id)
        .bind(Json(test))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_report(&self, test_id: &str) -> Result<Option<Report>, AppError> {
        let row: Option<Option<Json<Report>>> =
            sqlx::query_scalar("SELECT report FROM assessment_tests WHERE id = $1")
                .bind(test_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.flatten().map(|Json(report)| report))
    }

    async fn put_report(&self, test_id: &str, report: &Report) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE assessment_tests SET report = $2, updated_at = now() WHERE id = $1",
        )
        .bind(test_id)
        .bind(Json(report))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Test {test_id} not found")));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
