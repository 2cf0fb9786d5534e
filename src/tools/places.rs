//! Nearby place density via the Google places nearby-search API.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use super::{GeoPoint, TOOL_TIMEOUT};
use crate::TARGET_WEB_REQUEST;

const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const NEARBY_RADIUS_METERS: u32 = 2000;

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// Counts points of interest within [`NEARBY_RADIUS_METERS`] of the point.
/// Only the first page of results is counted; `next_page_token` is never
/// followed.
pub async fn nearby_count(http: &reqwest::Client, api_key: &str, point: GeoPoint) -> Result<u32> {
    debug!(
        target: TARGET_WEB_REQUEST,
        "Searching places within {}m of ({}, {})", NEARBY_RADIUS_METERS, point.lat, point.lng
    );

    let response = timeout(
        TOOL_TIMEOUT,
        http.get(NEARBY_SEARCH_URL)
            .query(&[
                ("location", format!("{},{}", point.lat, point.lng)),
                ("radius", NEARBY_RADIUS_METERS.to_string()),
                ("key", api_key.to_string()),
            ])
            .send(),
    )
    .await
    .context("nearby search request timed out")?
    .context("nearby search request failed")?;

    let payload: NearbySearchResponse = response
        .json()
        .await
        .context("nearby search response was not valid JSON")?;

    Ok(decode(payload))
}

fn decode(payload: NearbySearchResponse) -> u32 {
    payload.results.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_first_page_results() {
        let payload: NearbySearchResponse = serde_json::from_value(json!({
            "results": [
                { "name": "cafe" },
                { "name": "school" },
                { "name": "pharmacy" },
            ],
            "next_page_token": "abc",
            "status": "OK",
        }))
        .unwrap();

        assert_eq!(decode(payload), 3);
    }

    #[test]
    fn empty_results_count_zero() {
        let payload: NearbySearchResponse =
            serde_json::from_value(json!({ "results": [], "status": "OK" })).unwrap();

        assert_eq!(decode(payload), 0);
    }
}
