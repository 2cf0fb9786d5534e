//! Stateless adapters over the external lookup APIs.
//!
//! Each tool makes one request and reduces the provider's JSON to a small
//! value; fetching is kept separate from decoding so the decoders can be
//! exercised without a network. Network tools share a 10-second timeout and
//! make no retries; a transport failure propagates and fails the request.

pub mod area;
pub mod geocode;
pub mod news;
pub mod places;

pub use area::{area_category, AreaCategory};
pub use geocode::GeoPoint;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub(crate) const TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// The three network lookups behind one seam, so the pipeline can be driven
/// by fakes in tests.
#[async_trait]
pub trait ToolSet: Send + Sync {
    /// Geocode an address; unresolvable addresses map to the (0, 0) sentinel.
    async fn geolocation(&self, location: &str) -> Result<GeoPoint>;

    /// Count points of interest within 2000 meters of the given coordinates.
    async fn nearby_entities(&self, point: GeoPoint) -> Result<u32>;

    /// Count crime/fraud/scam articles mentioning the location.
    async fn negative_news(&self, location: &str) -> Result<u32>;
}

/// Production [`ToolSet`] backed by the Google maps APIs and NewsAPI.
pub struct HttpToolSet {
    http: reqwest::Client,
    maps_api_key: String,
    news_api_key: String,
}

impl HttpToolSet {
    pub fn new(http: reqwest::Client, maps_api_key: String, news_api_key: String) -> Self {
        Self {
            http,
            maps_api_key,
            news_api_key,
        }
    }
}

#[async_trait]
impl ToolSet for HttpToolSet {
    async fn geolocation(&self, location: &str) -> Result<GeoPoint> {
        geocode::lookup(&self.http, &self.maps_api_key, location).await
    }

    async fn nearby_entities(&self, point: GeoPoint) -> Result<u32> {
        places::nearby_count(&self.http, &self.maps_api_key, point).await
    }

    async fn negative_news(&self, location: &str) -> Result<u32> {
        news::negative_count(&self.http, &self.news_api_key, location).await
    }
}
