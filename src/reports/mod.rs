//! Crowd-sourced delay reports, votes and the accuracy score derived from them.

pub mod accuracy;
pub mod service;
pub mod types;

pub use accuracy::accuracy;
pub use service::ReportService;
pub use types::{DelayReport, NewReport, Severity, VoteDirection};
