//! Blocking HTTP helpers for the pollers.

use std::time::Duration;

use thiserror::Error;

/// Timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .new_agent()
}

pub fn fetch_text(agent: &ureq::Agent, url: &str) -> Result<String, FetchError> {
    Ok(agent.get(url).call()?.body_mut().read_to_string()?)
}

pub fn fetch_json(agent: &ureq::Agent, url: &str) -> Result<serde_json::Value, FetchError> {
    let body = fetch_text(agent, url)?;
    Ok(serde_json::from_str(&body)?)
}
