//! Trait for the external document store holding delay reports.

use crate::Result;
use crate::reports::DelayReport;

/// Persistence for [`DelayReport`] documents.
///
/// Implementations must round-trip the vote counters and the voter map
/// exactly. They are not required to serialize writers; [`ReportService`]
/// does that for callers in the same process.
///
/// [`ReportService`]: crate::reports::ReportService
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Stores a new report under `report.id`.
    async fn create(&self, report: DelayReport) -> Result<String>;

    /// Returns every stored report, in no particular order.
    async fn list(&self) -> Result<Vec<DelayReport>>;

    async fn get(&self, id: &str) -> Result<Option<DelayReport>>;

    /// Replaces the stored document. Fails with `ReportNotFound` if `id` is unknown.
    async fn update(&self, id: &str, report: DelayReport) -> Result<()>;

    /// Removes the document. Returns `false` if it was already gone.
    async fn delete(&self, id: &str) -> Result<bool>;
}
