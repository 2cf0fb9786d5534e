//! Negative news volume via the NewsAPI everything endpoint.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use super::TOOL_TIMEOUT;
use crate::TARGET_WEB_REQUEST;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Value>,
}

fn negative_query(location: &str) -> String {
    format!("{} crime OR fraud OR scam", location)
}

/// Counts articles on the first page matching the crime/fraud/scam query for
/// the location. No deduplication and no date filtering.
pub async fn negative_count(http: &reqwest::Client, api_key: &str, location: &str) -> Result<u32> {
    let query = negative_query(location);
    debug!(target: TARGET_WEB_REQUEST, "Searching news for: {}", query);

    let response = timeout(
        TOOL_TIMEOUT,
        http.get(EVERYTHING_URL)
            .query(&[("q", query.as_str()), ("apiKey", api_key)])
            .send(),
    )
    .await
    .context("news search request timed out")?
    .context("news search request failed")?;

    let payload: EverythingResponse = response
        .json()
        .await
        .context("news search response was not valid JSON")?;

    Ok(decode(payload))
}

fn decode(payload: EverythingResponse) -> u32 {
    payload.articles.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_negative_news_query() {
        assert_eq!(
            negative_query("Indiranagar Bangalore"),
            "Indiranagar Bangalore crime OR fraud OR scam"
        );
    }

    #[test]
    fn counts_first_page_articles() {
        let payload: EverythingResponse = serde_json::from_value(json!({
            "status": "ok",
            "totalResults": 240,
            "articles": [{ "title": "a" }, { "title": "b" }],
        }))
        .unwrap();

        // First page only; totalResults is deliberately ignored.
        assert_eq!(decode(payload), 2);
    }

    #[test]
    fn missing_articles_field_counts_zero() {
        let payload: EverythingResponse =
            serde_json::from_value(json!({ "status": "error" })).unwrap();

        assert_eq!(decode(payload), 0);
    }
}
