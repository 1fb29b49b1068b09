use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::AppResult;
use crate::logs::{
    repo::LogRepository,
    repo_types::{ActivityLog, LogItem},
};

pub struct LogService {
    logs: Arc<dyn LogRepository>,
}

impl LogService {
    pub fn new(logs: Arc<dyn LogRepository>) -> Self {
        Self { logs }
    }

    /// Stores one entry. A missing `created_at` stays missing.
    #[instrument(skip(self, item), fields(log_type = ?item.log_type))]
    pub async fn create_single(&self, item: LogItem) -> AppResult<ActivityLog> {
        let log = self.logs.insert(item).await?;
        info!(log_id = %log.id, "activity log created");
        Ok(log)
    }

    /// Stores every item verbatim in one batch and returns how many were written.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn ingest_batch(&self, items: Vec<LogItem>) -> AppResult<u64> {
        let written = self.logs.insert_many(items).await?;
        info!(written, "activity log batch saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::logs::repo::memory::MemoryLogRepository;
    use crate::logs::repo_types::{LogSubType, LogType, Side};
    use time::macros::datetime;

    fn service() -> (LogService, Arc<MemoryLogRepository>) {
        let repo = Arc::new(MemoryLogRepository::default());
        (LogService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn ingest_batch_writes_every_item() {
        let (svc, repo) = service();
        let items = vec![
            LogItem {
                sub_type: Some(LogSubType::Wet),
                ..LogItem::new(LogType::Diaper)
            },
            LogItem {
                amount_ml: Some(90),
                ..LogItem::new(LogType::Bottle)
            },
        ];

        assert_eq!(svc.ingest_batch(items.clone()).await.unwrap(), 2);

        let rows = repo.rows();
        assert_eq!(rows.len(), 2);
        let entries: Vec<LogItem> = rows.into_iter().map(|r| r.entry).collect();
        assert_eq!(entries, items);
        assert!(entries.iter().all(|e| e.duration_seconds.is_none() && e.side.is_none()));
    }

    #[tokio::test]
    async fn ingest_empty_batch() {
        let (svc, repo) = service();
        assert_eq!(svc.ingest_batch(Vec::new()).await.unwrap(), 0);
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn ingest_batch_keeps_client_timestamps_and_nulls() {
        let (svc, repo) = service();
        let stamped = LogItem {
            side: Some(Side::Right),
            duration_seconds: Some(420),
            created_at: Some(datetime!(2024-05-01 03:15:00 UTC)),
            notes: Some("night feed".into()),
            ..LogItem::new(LogType::Nursing)
        };
        let bare = LogItem::new(LogType::Pump);

        svc.ingest_batch(vec![stamped.clone(), bare.clone()]).await.unwrap();

        let rows = repo.rows();
        assert_eq!(rows[0].entry, stamped);
        assert_eq!(rows[1].entry, bare);
        assert!(rows[1].entry.created_at.is_none());
    }

    #[tokio::test]
    async fn create_single_assigns_id_but_not_timestamp() {
        let (svc, _) = service();
        let item = LogItem {
            amount_ml: Some(120),
            sub_type: Some(LogSubType::Formula),
            ..LogItem::new(LogType::Bottle)
        };
        let a = svc.create_single(item.clone()).await.unwrap();
        let b = svc.create_single(item.clone()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.entry, item);
        assert!(a.entry.created_at.is_none());
    }

    #[tokio::test]
    async fn ingest_batch_accepts_typeless_items() {
        let (svc, repo) = service();
        let typeless = LogItem {
            sub_type: Some(LogSubType::Wet),
            ..LogItem::default()
        };
        svc.ingest_batch(vec![typeless.clone()]).await.unwrap();
        assert_eq!(repo.rows()[0].entry, typeless);
        assert!(repo.rows()[0].entry.log_type.is_none());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let svc = LogService::new(Arc::new(MemoryLogRepository::failing_at(0)));
        let err = svc
            .ingest_batch(vec![LogItem::new(LogType::Diaper)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn failed_batch_leaves_no_rows() {
        let repo = Arc::new(MemoryLogRepository::failing_at(1));
        let svc = LogService::new(repo.clone());
        let items = vec![
            LogItem::new(LogType::Diaper),
            LogItem::new(LogType::Bottle),
            LogItem::new(LogType::Pump),
        ];

        let err = svc.ingest_batch(items).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn failed_batch_keeps_earlier_rows() {
        let repo = Arc::new(MemoryLogRepository::failing_at(2));
        let svc = LogService::new(repo.clone());
        svc.ingest_batch(vec![LogItem::new(LogType::Diaper)]).await.unwrap();

        let batch = vec![
            LogItem::new(LogType::Bottle),
            LogItem::new(LogType::Nursing),
            LogItem::new(LogType::Pump),
        ];
        assert!(svc.ingest_batch(batch).await.is_err());

        let rows = repo.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry.log_type, Some(LogType::Diaper));
    }
}
