use std::sync::Arc;

use anyhow::Result;

use rateseer::agent::Predictor;
use rateseer::config::{Config, LlmProviderKind};
use rateseer::llm::{GeminiClient, LlmProvider, OllamaClient};
use rateseer::logging::configure_logging;
use rateseer::tools::HttpToolSet;
use rateseer::web::{serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Config first so a missing credential aborts before anything binds.
    let config = Config::from_env()?;
    configure_logging();

    let http = reqwest::Client::new();

    let llm: Arc<dyn LlmProvider> = match config.provider {
        LlmProviderKind::Gemini => Arc::new(GeminiClient::new(
            http.clone(),
            config.google_api_key.clone(),
            config.model.clone(),
            config.temperature,
        )),
        LlmProviderKind::Ollama => Arc::new(OllamaClient::new(
            &config.ollama_host,
            config.ollama_port,
            config.model.clone(),
            config.temperature,
        )),
    };

    let tools = Arc::new(HttpToolSet::new(
        http,
        config.google_maps_api_key.clone(),
        config.news_api_key.clone(),
    ));

    let state = AppState {
        predictor: Predictor::new(tools, llm.clone()),
        llm,
    };

    serve(state, config.port).await
}
