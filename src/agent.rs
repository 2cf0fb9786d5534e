//! The prediction orchestrator.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::llm::LlmProvider;
use crate::pipeline::collect_features;
use crate::prompt::prediction_prompt;
use crate::response::{parse_prediction, Prediction};
use crate::tools::ToolSet;
use crate::TARGET_LLM_REQUEST;

/// Runs one prediction end to end: collect features, render the prompt, call
/// the model, parse its reply. Clients are injected at construction so tests
/// can swap in fakes; a `Predictor` holds no per-request state.
#[derive(Clone)]
pub struct Predictor {
    tools: Arc<dyn ToolSet>,
    llm: Arc<dyn LlmProvider>,
}

impl Predictor {
    pub fn new(tools: Arc<dyn ToolSet>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { tools, llm }
    }

    /// A pipeline or model transport failure propagates as an error; a reply
    /// the parser cannot make sense of does not, it becomes the zero-rate
    /// fallback prediction.
    pub async fn predict(&self, location: &str, area_sqft: f64) -> Result<Prediction> {
        let features = collect_features(self.tools.as_ref(), location, area_sqft).await?;
        let prompt = prediction_prompt(&features);

        debug!(
            target: TARGET_LLM_REQUEST,
            "Requesting prediction for {} ({} sqft)", features.location, features.area_sqft
        );

        let raw = self.llm.complete(&prompt).await?;
        debug!(target: TARGET_LLM_REQUEST, "Raw {} response: {}", self.llm.label(), raw);

        Ok(parse_prediction(self.llm.label(), &raw))
    }
}
