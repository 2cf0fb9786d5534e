//! Axum service boundary: the prediction endpoint, the raw model
//! pass-through used by the browser variant, and a liveness probe.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::agent::Predictor;
use crate::llm::{LlmError, LlmProvider};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub llm: Arc<dyn LlmProvider>,
}

#[derive(Deserialize)]
struct PredictionRequest {
    location: String,
    area_sqft: f64,
}

#[derive(Serialize)]
struct PredictionResponse {
    predicted_rate: f64,
    explanation: String,
}

#[derive(Deserialize)]
struct PromptRequest {
    prompt: String,
}

#[derive(Serialize)]
struct LlmResponse {
    text: String,
}

pub fn router(state: AppState) -> Router {
    // CORS stays wide open; the browser frontend calls these endpoints
    // cross-origin.
    Router::new()
        .route("/", get(status))
        .route("/predict", post(predict))
        .route("/llm", post(call_llm))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "rateseer API is running" }))
}

async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, StatusCode> {
    match state
        .predictor
        .predict(&payload.location, payload.area_sqft)
        .await
    {
        Ok(prediction) => Ok(Json(PredictionResponse {
            predicted_rate: prediction.predicted_rate,
            explanation: prediction.explanation,
        })),
        Err(e) => {
            error!("Prediction for {:?} failed: {:#}", payload.location, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Direct model pass-through. Provider failures come back as descriptive
/// text in a 200 body, never as an HTTP error status; note `/predict` makes
/// no such conversion and surfaces the same failures as a 500.
async fn call_llm(
    State(state): State<AppState>,
    Json(payload): Json<PromptRequest>,
) -> Json<LlmResponse> {
    let text = match state.llm.complete(&payload.prompt).await {
        Ok(text) => text,
        Err(LlmError::Quota) => {
            "⚠️ API quota exceeded. Please try again later or check your billing settings."
                .to_string()
        }
        Err(LlmError::ModelNotFound) => "⚠️ Model not available. Please check configuration.".to_string(),
        Err(e) => format!("⚠️ Error: {}", e),
    };

    Json(LlmResponse { text })
}
