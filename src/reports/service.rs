use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::types::{DelayReport, NewReport, VoteDirection};
use crate::error::{Error, Result};
use crate::services::ReportStore;

const REPORT_ID_LEN: usize = 20;

/// Generates a random alphanumeric document id.
pub fn new_report_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REPORT_ID_LEN)
        .map(char::from)
        .collect()
}

fn require_user(user: Option<&str>) -> Result<&str> {
    match user {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(Error::NotAuthenticated),
    }
}

/// Report operations over an injected [`ReportStore`].
///
/// Every read-modify-write runs under one async mutex so the voter map and its
/// counters are never written by two tasks at once within this process.
/// Stores shared across processes need their own compare-and-swap.
pub struct ReportService<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: ReportStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a report owned by `user`. Rejected before touching the store
    /// when no identity is present.
    #[tracing::instrument(skip(self, draft), fields(severity = %draft.severity))]
    pub async fn submit(&self, user: Option<&str>, draft: NewReport) -> Result<DelayReport> {
        let user = require_user(user)?;
        let report = DelayReport::new(new_report_id(), user, draft, Utc::now().timestamp_millis());

        let id = self.store.create(report.clone()).await?;
        info!(report_id = %id, "Report submitted");
        Ok(report)
    }

    /// Registers `user`'s vote on report `id` and returns the updated report.
    #[tracing::instrument(skip(self))]
    pub async fn vote(
        &self,
        user: Option<&str>,
        id: &str,
        direction: VoteDirection,
    ) -> Result<DelayReport> {
        let user = require_user(user)?;
        self.modify(id, |report| report.apply_vote(user, direction))
            .await
    }

    /// Withdraws `user`'s vote on report `id`, if any.
    #[tracing::instrument(skip(self))]
    pub async fn retract(&self, user: Option<&str>, id: &str) -> Result<DelayReport> {
        let user = require_user(user)?;
        self.modify(id, |report| {
            report.retract_vote(user);
        })
        .await
    }

    /// Deletes report `id`. Only its reporter may do this.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user: Option<&str>, id: &str) -> Result<()> {
        let user = require_user(user)?;
        let _guard = self.write_lock.lock().await;

        let report = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| Error::ReportNotFound(id.to_string()))?;

        if report.user_id != user {
            warn!(report_id = id, "Delete refused for non-owner");
            return Err(Error::NotOwner {
                report_id: id.to_string(),
            });
        }

        self.store.delete(id).await?;
        info!(report_id = id, "Report deleted");
        Ok(())
    }

    /// All reports, newest first.
    pub async fn list(&self) -> Result<Vec<DelayReport>> {
        let mut reports = self.store.list().await?;
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// All reports, newest first, paired with their accuracy percentage.
    pub async fn list_with_accuracy(&self) -> Result<Vec<(DelayReport, u8)>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|report| {
                let accuracy = report.accuracy();
                (report, accuracy)
            })
            .collect())
    }

    async fn modify<F>(&self, id: &str, change: F) -> Result<DelayReport>
    where
        F: FnOnce(&mut DelayReport) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut report = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| Error::ReportNotFound(id.to_string()))?;

        change(&mut report);
        self.store.update(id, report.clone()).await?;

        info!(
            report_id = id,
            upvotes = report.upvotes,
            downvotes = report.downvotes,
            accuracy = report.accuracy(),
            "Votes updated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::InMemoryReportStore;
    use crate::reports::Severity;

    fn draft() -> NewReport {
        NewReport {
            latitude: 40.71,
            longitude: -74.0,
            problem: "A train held at station".to_string(),
            severity: Severity::Medium,
            image_url: Some("reports/a-train.jpg".to_string()),
        }
    }

    #[test]
    fn test_report_ids_are_alphanumeric() {
        let id = new_report_id();
        assert_eq!(id.len(), REPORT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, new_report_id());
    }

    #[tokio::test]
    async fn test_submit_requires_identity() {
        let service = ReportService::new(InMemoryReportStore::new());

        assert!(matches!(
            service.submit(None, draft()).await,
            Err(Error::NotAuthenticated)
        ));
        assert!(matches!(
            service.submit(Some("  "), draft()).await,
            Err(Error::NotAuthenticated)
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_then_vote() {
        let service = ReportService::new(InMemoryReportStore::new());
        let report = service.submit(Some("alice"), draft()).await.unwrap();
        assert_eq!(report.user_id, "alice");
        assert_eq!(report.upvotes, 0);

        service.vote(Some("bob"), &report.id, VoteDirection::Up).await.unwrap();
        service.vote(Some("carol"), &report.id, VoteDirection::Up).await.unwrap();
        service.vote(Some("dave"), &report.id, VoteDirection::Up).await.unwrap();
        let updated = service
            .vote(Some("erin"), &report.id, VoteDirection::Down)
            .await
            .unwrap();

        assert_eq!((updated.upvotes, updated.downvotes), (3, 1));
        assert_eq!(updated.accuracy(), 75);

        let stored = service.store().get(&report.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_vote_requires_identity_and_existing_report() {
        let service = ReportService::new(InMemoryReportStore::new());
        assert!(matches!(
            service.vote(None, "x", VoteDirection::Up).await,
            Err(Error::NotAuthenticated)
        ));
        assert!(matches!(
            service.vote(Some("bob"), "missing", VoteDirection::Up).await,
            Err(Error::ReportNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_retract_vote() {
        let service = ReportService::new(InMemoryReportStore::new());
        let report = service.submit(Some("alice"), draft()).await.unwrap();
        service.vote(Some("bob"), &report.id, VoteDirection::Down).await.unwrap();

        let updated = service.retract(Some("bob"), &report.id).await.unwrap();
        assert_eq!((updated.upvotes, updated.downvotes), (0, 0));
        assert!(updated.voters.is_empty());
    }

    #[tokio::test]
    async fn test_only_owner_can_delete() {
        let service = ReportService::new(InMemoryReportStore::new());
        let report = service.submit(Some("alice"), draft()).await.unwrap();

        assert!(matches!(
            service.delete(Some("bob"), &report.id).await,
            Err(Error::NotOwner { .. })
        ));
        service.delete(Some("alice"), &report.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(
            service.delete(Some("alice"), &report.id).await,
            Err(Error::ReportNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_accuracy() {
        let store = InMemoryReportStore::new();
        let mut older = DelayReport::new("old", "alice", draft(), 1_000);
        older.apply_vote("bob", VoteDirection::Up);
        older.apply_vote("carol", VoteDirection::Down);
        older.apply_vote("dave", VoteDirection::Down);
        older.apply_vote("erin", VoteDirection::Down);
        store.create(older).await.unwrap();
        store
            .create(DelayReport::new("new", "alice", draft(), 2_000))
            .await
            .unwrap();

        let service = ReportService::new(store);
        let listed = service.list_with_accuracy().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
        assert_eq!(listed[0].1, 0);
        assert_eq!(listed[1].1, 25);
    }

    #[tokio::test]
    async fn test_concurrent_votes_stay_consistent() {
        let service = std::sync::Arc::new(ReportService::new(InMemoryReportStore::new()));
        let report = service.submit(Some("alice"), draft()).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..20 {
            let service = service.clone();
            let id = report.id.clone();
            tasks.push(tokio::spawn(async move {
                let voter = format!("voter-{}", i % 10);
                let direction = if i % 3 == 0 { VoteDirection::Down } else { VoteDirection::Up };
                service.vote(Some(voter.as_str()), &id, direction).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let stored = service.store().get(&report.id).await.unwrap().unwrap();
        assert_eq!(stored.voters.len(), 10);
        assert_eq!(stored.upvotes + stored.downvotes, 10);
        assert!(stored.is_consistent());
    }
}
