pub mod agent;
pub mod config;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod response;
pub mod tools;
pub mod web;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
