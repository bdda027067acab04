//! Concrete clients for the external collaborators declared in
//! [`crate::services`].

pub mod gemini;
pub mod nominatim;
pub mod store;
