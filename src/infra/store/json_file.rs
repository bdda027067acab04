use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::reports::DelayReport;
use crate::services::ReportStore;

/// [`ReportStore`] persisted as one JSON object keyed by report id:
///
/// ```json
/// {
///   "Xy12...": { "id": "Xy12...", "userId": "alice", "upvotes": 1, "voters": { "bob": "up" }, ... }
/// }
/// ```
///
/// The whole file is read and rewritten on every operation. A missing file is
/// an empty store.
pub struct JsonFileReportStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, DelayReport>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, reports: &BTreeMap<String, DelayReport>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(reports)?;

        // Replace the file in one rename so a failed write leaves the old store intact.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), count = reports.len(), "Report file written");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReportStore for JsonFileReportStore {
    async fn create(&self, report: DelayReport) -> Result<String> {
        let _guard = self.lock.lock().await;
        let mut reports = self.load().await?;
        let id = report.id.clone();
        if reports.contains_key(&id) {
            return Err(Error::Store(format!("report {id} already exists")));
        }
        reports.insert(id.clone(), report);
        self.save(&reports).await?;
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<DelayReport>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_values().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<DelayReport>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(id))
    }

    async fn update(&self, id: &str, report: DelayReport) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut reports = self.load().await?;
        match reports.get_mut(id) {
            Some(slot) => *slot = report,
            None => return Err(Error::ReportNotFound(id.to_string())),
        }
        self.save(&reports).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut reports = self.load().await?;
        let removed = reports.remove(id).is_some();
        if removed {
            self.save(&reports).await?;
        }
        Ok(removed)
    }
}
