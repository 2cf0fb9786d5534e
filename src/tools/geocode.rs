//! Address geocoding via the Google geocode API.
//!
//! A location the provider cannot resolve decodes to the `(0, 0)` sentinel
//! rather than an error, and the pipeline carries on with it. The sentinel is
//! indistinguishable from a genuine coordinate at the equator/prime-meridian
//! intersection; callers accept that imprecision.

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::time::timeout;
use tracing::debug;

use super::TOOL_TIMEOUT;
use crate::TARGET_WEB_REQUEST;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const NOT_FOUND: GeoPoint = GeoPoint { lat: 0.0, lng: 0.0 };
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeoPoint,
}

pub async fn lookup(http: &reqwest::Client, api_key: &str, location: &str) -> Result<GeoPoint> {
    debug!(target: TARGET_WEB_REQUEST, "Geocoding location: {}", location);

    let response = timeout(
        TOOL_TIMEOUT,
        http.get(GEOCODE_URL)
            .query(&[("address", location), ("key", api_key)])
            .send(),
    )
    .await
    .context("geocoding request timed out")?
    .context("geocoding request failed")?;

    let payload: GeocodeResponse = response
        .json()
        .await
        .context("geocoding response was not valid JSON")?;

    Ok(decode(payload))
}

fn decode(payload: GeocodeResponse) -> GeoPoint {
    match payload.results.into_iter().next() {
        Some(result) => result.geometry.location,
        None => GeoPoint::NOT_FOUND,
    }
}
