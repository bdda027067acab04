use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::reports::DelayReport;
use crate::services::ReportStore;

/// Process-local [`ReportStore`] backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<String, DelayReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create(&self, report: DelayReport) -> Result<String> {
        let id = report.id.clone();
        let mut reports = self.reports.write().await;
        if reports.contains_key(&id) {
            return Err(Error::Store(format!("report {id} already exists")));
        }
        reports.insert(id.clone(), report);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<DelayReport>> {
        Ok(self.reports.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<DelayReport>> {
        Ok(self.reports.read().await.get(id).cloned())
    }

    async fn update(&self, id: &str, report: DelayReport) -> Result<()> {
        match self.reports.write().await.get_mut(id) {
            Some(slot) => {
                *slot = report;
                Ok(())
            }
            None => Err(Error::ReportNotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.reports.write().await.remove(id).is_some())
    }
}
