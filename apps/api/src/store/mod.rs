//! Test Store: the record-store collaborator for generated tests and their reports.
//!
//! The assessment core never touches storage; only the service layer does, through
//! `Arc<dyn TestStore>` carried in `AppState`. Backends are chosen at startup from
//! `STORE_BACKEND`.
//!
//! Writes are plain overwrites. Concurrent read-modify-write on the same id is not
//! serialized by any backend.

pub mod memory;
pub mod postgres;
pub mod redis_store;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::config::{Config, StoreBackend};
use crate::errors::AppError;
use crate::models::assessment::{Report, Test};

pub use self::memory::InMemoryTestStore;
pub use self::postgres::PgTestStore;
pub use self::redis_store::RedisTestStore;

#[async_trait]
pub trait TestStore: Send + Sync {
    /// Assigns a fresh opaque id for a new test.
    fn allocate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    async fn get_test(&self, id: &str) -> Result<Option<Test>, AppError>;

    async fn put_test(&self, id: &str, test: &Test) -> Result<(), AppError>;

    async fn get_report(&self, test_id: &str) -> Result<Option<Report>, AppError>;

    async fn put_report(&self, test_id: &str, report: &Report) -> Result<(), AppError>;

    /// Backend label, surfaced in logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Builds the configured store backend.
pub async fn connect(config: &Config) -> Result<Arc<dyn TestStore>> {
    let store: Arc<dyn TestStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(InMemoryTestStore::new()),
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required when STORE_BACKEND=redis")?;
            Arc::new(RedisTestStore::connect(url).await?)
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required when STORE_BACKEND=postgres")?;
            Arc::new(PgTestStore::connect(url).await?)
        }
    };

    info!("Test store initialized (backend: {})", store.backend());
    Ok(store)
}
