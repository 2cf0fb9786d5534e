use anyhow::{bail, Result};
use std::env;

/// Which backend serves model completions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LlmProviderKind {
    Gemini,
    Ollama,
}

/// Process configuration, loaded once at startup.
///
/// The three credentials are hard requirements: the service refuses to start
/// without them rather than failing on the first request that needs one.
#[derive(Clone, Debug)]
pub struct Config {
    pub google_api_key: String,
    pub google_maps_api_key: String,
    pub news_api_key: String,
    pub provider: LlmProviderKind,
    pub model: String,
    pub temperature: f32,
    pub port: u16,
    pub ollama_host: String,
    pub ollama_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let google_api_key = required("GOOGLE_API_KEY")?;
        let google_maps_api_key = required("GOOGLE_MAPS_API_KEY")?;
        let news_api_key = required("NEWS_API_KEY")?;

        let provider = match env::var("LLM_PROVIDER").unwrap_or_default().to_lowercase().as_str() {
            "ollama" => LlmProviderKind::Ollama,
            _ => LlmProviderKind::Gemini,
        };

        let model = env::var("LLM_MODEL").unwrap_or_else(|_| {
            match provider {
                LlmProviderKind::Gemini => "gemini-2.0-flash",
                LlmProviderKind::Ollama => "llama2",
            }
            .to_string()
        });

        let temperature: f32 = env::var("LLM_TEMPERATURE")
            .unwrap_or("0.2".to_string())
            .parse()
            .unwrap_or(0.2);

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let ollama_host = env::var("OLLAMA_HOST").unwrap_or("localhost".to_string());
        let ollama_port: u16 = env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(11434);

        Ok(Config {
            google_api_key,
            google_maps_api_key,
            news_api_key,
            provider,
            model,
            temperature,
            port,
            ollama_host,
            ollama_port,
        })
    }
}

fn required(var: &str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{} environment variable required", var),
    }
}
