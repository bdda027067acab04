//! Interfaces to the external collaborators the core depends on.
//!
//! Concrete implementations live in [`crate::infra`]; components receive them
//! as constructor arguments so tests can substitute doubles.

pub mod area_lookup;
pub mod report_store;
pub mod text_generator;

pub use area_lookup::{AreaNameLookup, PENDING_AREA_NAME, display_area};
pub use report_store::ReportStore;
pub use text_generator::TextGenerator;
