use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::errors::AppError;
use crate::models::assessment::{Report, Test};
use crate::store::TestStore;

/// Redis-backed store. Records are JSON strings under `test:<id>` and `report:<id>`.
pub struct RedisTestStore {
    conn: MultiplexedConnection,
}

fn test_key(id: &str) -> String {
    format!("test:{id}")
}

fn report_key(id: &str) -> String {
    format!("report:{id}")
}

impl RedisTestStore {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis connection established");
        Ok(Self { conn })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: serde::Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(value)?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, json).await?;
        Ok(())
    }
}

#[async_trait]
impl TestStore for RedisTestStore {
    async fn get_test(&self, id: &str) -> Result<Option<Test>, AppError> {
        self.get_json(&test_key(id)).await
    }

    async fn put_test(&self, id: &str, test: &Test) -> Result<(), AppError> {
        self.set_json(&test_key(id), test).await
    }

    async fn get_report(&self, test_id: &str) -> Result<Option<Report>, AppError> {
        self.get_json(&report_key(test_id)).await
    }

    async fn put_report(&self, test_id: &str, report: &Report) -> Result<(), AppError> {
        self.set_json(&report_key(test_id), report).await
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
