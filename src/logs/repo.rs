use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::AppResult;
use crate::logs::repo_types::{ActivityLog, LogItem};

#[async_trait]
pub trait LogRepository: Send + Sync {
    async fn insert(&self, item: LogItem) -> AppResult<ActivityLog>;
    /// All-or-nothing: on error no row from `items` is visible.
    async fn insert_many(&self, items: Vec<LogItem>) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct PgLogRepository {
    db: PgPool,
}

impl PgLogRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const INSERT_LOG: &str = r#"
    INSERT INTO activity_logs
        (id, log_type, sub_type, amount_ml, duration_seconds, side, created_at, notes)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING id, log_type, sub_type, amount_ml, duration_seconds, side, created_at, notes
"#;

/// Insert a single log entry within a transaction.
async fn insert_log_tx(
    tx: &mut Transaction<'_, Postgres>,
    item: &LogItem,
) -> anyhow::Result<ActivityLog> {
    let row = sqlx::query_as::<_, ActivityLog>(INSERT_LOG)
        .bind(Uuid::new_v4())
        .bind(item.log_type)
        .bind(item.sub_type)
        .bind(item.amount_ml)
        .bind(item.duration_seconds)
        .bind(item.side)
        .bind(item.created_at)
        .bind(item.notes.as_deref())
        .fetch_one(&mut **tx)
        .await
        .context("insert activity log")?;
    Ok(row)
}

#[async_trait]
impl LogRepository for PgLogRepository {
    async fn insert(&self, item: LogItem) -> AppResult<ActivityLog> {
        let row = sqlx::query_as::<_, ActivityLog>(INSERT_LOG)
            .bind(Uuid::new_v4())
            .bind(item.log_type)
            .bind(item.sub_type)
            .bind(item.amount_ml)
            .bind(item.duration_seconds)
            .bind(item.side)
            .bind(item.created_at)
            .bind(item.notes)
            .fetch_one(&self.db)
            .await?;
        Ok(row)
    }

    async fn insert_many(&self, items: Vec<LogItem>) -> AppResult<u64> {
        if items.is_empty() {
            return Ok(0);
        }

        let mut tx = self.db.begin().await.context("begin tx")?;
        for item in &items {
            insert_log_tx(&mut tx, item).await?;
        }
        tx.commit().await.context("commit tx")?;

        Ok(items.len() as u64)
    }
}
