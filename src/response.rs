//! Parsing model output into a prediction.
//!
//! Models are prompted to return bare JSON but routinely wrap it in prose,
//! markdown fences, or commentary, so the parser hunts for an embedded JSON
//! object instead of decoding the text wholesale. Extraction is a greedy
//! first-`{`-to-last-`}` regex scan, not a balanced-brace parse: nested or
//! multiple JSON objects in one reply will be mis-extracted and fall through
//! to the fallback. Parse failures never fail the request; they downgrade to
//! a zero-rate prediction that carries the raw reply for diagnosis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::TARGET_LLM_REQUEST;

static JSON_BLOB: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// The final rate/explanation pair returned to the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_rate: f64,
    pub explanation: String,
}

/// Parses raw model text into a [`Prediction`]. `model_label` only feeds the
/// fallback explanation text.
pub fn parse_prediction(model_label: &str, raw: &str) -> Prediction {
    let text = raw.trim();

    match extract_prediction(text) {
        Some(prediction) => prediction,
        None => {
            warn!(
                target: TARGET_LLM_REQUEST,
                "Failed to parse {} response as prediction JSON: {}", model_label, text
            );
            Prediction {
                predicted_rate: 0.0,
                explanation: format!("Failed to parse {} response: {}", model_label, text),
            }
        }
    }
}

fn extract_prediction(text: &str) -> Option<Prediction> {
    let blob = JSON_BLOB.find(text)?;
    let value: Value = serde_json::from_str(blob.as_str()).ok()?;

    let predicted_rate = coerce_rate(value.get("predicted_rate")?)?;
    let explanation = value.get("explanation")?.as_str()?.to_string();

    Some(Prediction {
        predicted_rate,
        explanation,
    })
}

// Accepts a JSON number or a numeric string, mirroring float() coercion.
fn coerce_rate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let result = parse_prediction(
            "Gemini",
            r#"{"predicted_rate": 7200.5, "explanation": "prime location"}"#,
        );
        assert_eq!(
            result,
            Prediction {
                predicted_rate: 7200.5,
                explanation: "prime location".to_string(),
            }
        );
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let result = parse_prediction(
            "Gemini",
            "Sure! {\"predicted_rate\": 6500, \"explanation\": \"good area\"} Let me know more.",
        );
        assert_eq!(result.predicted_rate, 6500.0);
        assert_eq!(result.explanation, "good area");
    }

    #[test]
    fn coerces_numeric_string_rate() {
        let result = parse_prediction(
            "Gemini",
            r#"{"predicted_rate": "6500", "explanation": "good area"}"#,
        );
        assert_eq!(result.predicted_rate, 6500.0);
    }

    #[test]
    fn text_without_braces_falls_back_with_raw_text() {
        let result = parse_prediction("Gemini", "no json here");
        assert_eq!(result.predicted_rate, 0.0);
        assert_eq!(
            result.explanation,
            "Failed to parse Gemini response: no json here"
        );
    }

    #[test]
    fn missing_key_falls_back() {
        let raw = r#"{"predicted_rate": 6500}"#;
        let result = parse_prediction("Gemini", raw);
        assert_eq!(result.predicted_rate, 0.0);
        assert!(result.explanation.contains(raw));
    }

    #[test]
    fn wrong_typed_keys_fall_back() {
        let result = parse_prediction(
            "Gemini",
            r#"{"predicted_rate": true, "explanation": "good area"}"#,
        );
        assert_eq!(result.predicted_rate, 0.0);

        let result = parse_prediction(
            "Gemini",
            r#"{"predicted_rate": 6500, "explanation": 42}"#,
        );
        assert_eq!(result.predicted_rate, 0.0);
    }

    #[test]
    fn single_quoted_pseudo_json_falls_back() {
        let raw = "{'predicted_rate': 6500, 'explanation': 'good area'}";
        let result = parse_prediction("Gemini", raw);
        assert_eq!(result.predicted_rate, 0.0);
        assert!(result.explanation.starts_with("Failed to parse Gemini response:"));
        assert!(result.explanation.contains(raw));
    }

    // The greedy scan spans from the first { to the last }, so two objects in
    // one reply produce an undecodable slice and fall through to the
    // fallback. Documented behavior, not a target to fix here.
    #[test]
    fn multiple_json_objects_fall_back() {
        let result = parse_prediction(
            "Gemini",
            r#"{"a": 1} {"predicted_rate": 6500, "explanation": "good area"}"#,
        );
        assert_eq!(result.predicted_rate, 0.0);
    }

    #[test]
    fn fallback_preserves_surrounding_prose_verbatim() {
        let raw = "I think the answer is { probably } around 6500";
        let result = parse_prediction("Ollama", raw);
        assert_eq!(result.predicted_rate, 0.0);
        assert_eq!(
            result.explanation,
            format!("Failed to parse Ollama response: {}", raw)
        );
    }
}
