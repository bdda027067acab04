use async_trait::async_trait;
use reqwest::{Method, Request, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fetch::{BasicClient, HttpClient, send_for_text};
use crate::services::AreaNameLookup;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Reverse geocoder using the Nominatim `/reverse` endpoint.
pub struct NominatimClient<C = BasicClient> {
    http: C,
    endpoint: Url,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(BasicClient::new()?, base_url)
    }
}

impl<C: HttpClient> NominatimClient<C> {
    pub fn with_client(http: C, base_url: &str) -> Result<Self> {
        let raw = format!("{}/reverse", base_url.trim_end_matches('/'));
        let endpoint =
            Url::parse(&raw).map_err(|e| Error::Config(format!("invalid geocoder URL '{raw}': {e}")))?;
        Ok(Self { http, endpoint })
    }

    fn build_request(&self, latitude: f64, longitude: f64) -> Request {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("zoom", "14")
            .append_pair("lat", &latitude.to_string())
            .append_pair("lon", &longitude.to_string());
        Request::new(Method::GET, url)
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let body = send_for_text(&self.http, self.build_request(latitude, longitude)).await?;
        Ok(parse_area_name(&serde_json::from_str(&body)?))
    }
}

/// Prefers a short "neighbourhood, city" name and falls back to the full
/// `display_name`.
pub fn parse_area_name(json: &Value) -> Option<String> {
    let address = &json["address"];
    let local = ["neighbourhood", "suburb", "quarter"]
        .iter()
        .find_map(|key| address[*key].as_str());
    let city = ["city", "town", "village"]
        .iter()
        .find_map(|key| address[*key].as_str());

    match (local, city) {
        (Some(local), Some(city)) => Some(format!("{local}, {city}")),
        (None, Some(city)) => Some(city.to_string()),
        _ => json["display_name"].as_str().map(str::to_string),
    }
}

#[async_trait]
impl<C: HttpClient> AreaNameLookup for NominatimClient<C> {
    async fn area_name(&self, latitude: f64, longitude: f64) -> Option<String> {
        match self.lookup(latitude, longitude).await {
            Ok(name) => name,
            Err(e) => {
                debug!(latitude, longitude, error = %e, "Area name lookup failed");
                None
            }
        }
    }
}
