//! Feature collection: one record per request, populated stage by stage.

use anyhow::Result;
use tracing::debug;

use crate::tools::{area_category, AreaCategory, ToolSet};
use crate::TARGET_WEB_REQUEST;

/// Accumulator of derived inputs for one prediction request. Created empty,
/// populated in a fixed order, consumed once by prompt construction.
#[derive(Clone, Debug)]
pub struct FeatureRecord {
    pub location: String,
    pub area_sqft: f64,
    pub lat: f64,
    pub lng: f64,
    pub nearby_count: Option<u32>,
    pub negative_news: Option<u32>,
    pub area_category: Option<AreaCategory>,
}

impl FeatureRecord {
    pub fn new(location: impl Into<String>, area_sqft: f64) -> Self {
        Self {
            location: location.into(),
            area_sqft,
            lat: 0.0,
            lng: 0.0,
            nearby_count: None,
            negative_news: None,
            area_category: None,
        }
    }
}

/// Runs the tools in the fixed order geo -> nearby -> news -> area, merging
/// each stage's output into the record. The nearby lookup needs the geocoded
/// coordinates; the news lookup only needs the location text but still runs
/// in sequence. Any tool error aborts the whole pipeline with no partial
/// result.
pub async fn collect_features(
    tools: &dyn ToolSet,
    location: &str,
    area_sqft: f64,
) -> Result<FeatureRecord> {
    let mut record = FeatureRecord::new(location, area_sqft);

    let point = tools.geolocation(location).await?;
    record.lat = point.lat;
    record.lng = point.lng;
    debug!(
        target: TARGET_WEB_REQUEST,
        "Geocoded {} to ({}, {})", record.location, record.lat, record.lng
    );

    record.nearby_count = Some(tools.nearby_entities(point).await?);
    record.negative_news = Some(tools.negative_news(location).await?);
    record.area_category = Some(area_category(area_sqft));

    Ok(record)
}
