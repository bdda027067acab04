//! Gemini generative-text client.

mod client;
pub mod safety;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, parse_response};
pub use safety::SAFETY_SETTINGS;
