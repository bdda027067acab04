//! Trait for reverse geocoding a coordinate into a display name.

/// Shown while, or instead of, a name that could not be resolved.
pub const PENDING_AREA_NAME: &str = "Fetching...";

/// Resolves a coordinate to a human-readable area name.
///
/// Lookups fail silently: implementations return `None` rather than an error.
#[async_trait::async_trait]
pub trait AreaNameLookup: Send + Sync {
    async fn area_name(&self, latitude: f64, longitude: f64) -> Option<String>;
}

/// Looks up the area name, falling back to [`PENDING_AREA_NAME`].
pub async fn display_area<L: AreaNameLookup + ?Sized>(
    lookup: &L,
    latitude: f64,
    longitude: f64,
) -> String {
    lookup
        .area_name(latitude, longitude)
        .await
        .unwrap_or_else(|| PENDING_AREA_NAME.to_string())
}
