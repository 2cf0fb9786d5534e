//! Prompt construction for the prediction model.

use crate::pipeline::FeatureRecord;

/// Renders the fixed prediction prompt. Counts that never got populated fall
/// back the same way the prompt always has: nearby to 0, negative news to
/// the literal "None", area category to "medium".
pub fn prediction_prompt(features: &FeatureRecord) -> String {
    let nearby = features.nearby_count.unwrap_or(0);
    let negative_news = features
        .negative_news
        .map(|count| count.to_string())
        .unwrap_or_else(|| "None".to_string());
    let area_category = features
        .area_category
        .map(|category| category.to_string())
        .unwrap_or_else(|| "medium".to_string());

    format!(
        r#"You are a real estate price prediction engine.

Return ONLY valid JSON. No markdown. No commentary.

Format:
{{
  "predicted_rate": 6500,
  "explanation": "short reason"
}}

Inputs:
Location: {location}
Nearby places: {nearby}
Negative news: {negative_news}
Area: {area_sqft} sqft
Area category: {area_category}
"#,
        location = features.location,
        area_sqft = features.area_sqft,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::AreaCategory;

    #[test]
    fn embeds_all_populated_features() {
        let mut features = FeatureRecord::new("Indiranagar Bangalore", 1200.0);
        features.nearby_count = Some(14);
        features.negative_news = Some(2);
        features.area_category = Some(AreaCategory::Medium);

        let prompt = prediction_prompt(&features);

        assert!(prompt.contains("Location: Indiranagar Bangalore"));
        assert!(prompt.contains("Nearby places: 14"));
        assert!(prompt.contains("Negative news: 2"));
        assert!(prompt.contains("Area: 1200 sqft"));
        assert!(prompt.contains("Area category: medium"));
    }

    #[test]
    fn renders_fallback_placeholders_for_missing_features() {
        let features = FeatureRecord::new("Somewhere", 3000.0);

        let prompt = prediction_prompt(&features);

        assert!(prompt.contains("Nearby places: 0"));
        assert!(prompt.contains("Negative news: None"));
        assert!(prompt.contains("Area category: medium"));
    }
}
