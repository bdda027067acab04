//! [`ReportStore`](crate::services::ReportStore) implementations.

mod json_file;
mod memory;

pub use json_file::JsonFileReportStore;
pub use memory::InMemoryReportStore;
