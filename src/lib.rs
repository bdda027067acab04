pub mod advisory;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod reports;
pub mod scoring;
pub mod services;

pub use error::{Error, Result};
