//! OpenStreetMap Nominatim reverse geocoding.

mod client;

pub use client::{DEFAULT_BASE_URL, NominatimClient, parse_area_name};
