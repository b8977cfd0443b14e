//! Anthropic Messages API plan fetcher
//!
//! Prompts the model for a JSON drawing plan, extracts the JSON payload from
//! the reply (fence- and prose-tolerant) and validates it structurally.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::plan::Plan;

use super::{FetchError, PlanFetcher, PlanResponse};

/// Drawing-plan instructions handed to the model verbatim
const SYSTEM_PROMPT: &str = r#"You are a whiteboard explainer. Given a question, reply with a JSON object describing a short explanation and a whiteboard drawing built up step by step.

Schema:
{
  "explanation": "one or two sentence overview",
  "whiteboard": [
    {
      "explanation": "caption shown while this step is drawn",
      "drawing-instructions": [
        {"type": "line", "from": {"x": 10, "y": 10}, "to": {"x": 90, "y": 10}},
        {"type": "stroke", "points": [{"x": 10, "y": 10}, {"x": 50, "y": 40}, {"x": 90, "y": 10}]},
        {"type": "circle", "center": {"x": 50, "y": 50}, "radius": 10},
        {"type": "rect", "origin": {"x": 10, "y": 10}, "width": 30, "height": 20},
        {"type": "label", "at": {"x": 50, "y": 90}, "text": "short text"}
      ]
    }
  ]
}

Coordinates are in a 100x100 space with the origin at the bottom-left.
Use 3 to 6 steps, each with 1 to 8 drawing instructions.
Output ONLY the JSON object, no prose and no code fences."#;

/// Anthropic Messages API client implementing [`PlanFetcher`]
pub struct AnthropicFetcher {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl AnthropicFetcher {
    /// Create a fetcher from configuration
    ///
    /// Reads the API key from the environment variable named in the config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, FetchError> {
        debug!(model = %config.model, "AnthropicFetcher::from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let timeout = config.timeout();
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Pull the JSON object out of a model reply
///
/// Models occasionally wrap the payload in code fences or a leading sentence
/// despite instructions; take everything between the first `{` and the last
/// `}`.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

#[async_trait]
impl PlanFetcher for AnthropicFetcher {
    async fn fetch_plan(&self, prompt: &str) -> Result<PlanResponse, FetchError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "AnthropicFetcher::fetch_plan: called");

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": SYSTEM_PROMPT,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout)
                } else {
                    FetchError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%status, "AnthropicFetcher::fetch_plan: api error");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api: ApiResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(format!("unreadable api response: {e}")))?;

        let text = api
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .ok_or_else(|| FetchError::Malformed("no text content in response".to_string()))?;

        let json = extract_json(text)
            .ok_or_else(|| FetchError::Malformed("no JSON object in response".to_string()))?;

        let plan: Plan = serde_json::from_str(json)
            .map_err(|e| FetchError::Malformed(format!("invalid plan JSON: {e}")))?;
        plan.validate().map_err(FetchError::Malformed)?;

        debug!(steps = plan.steps.len(), "AnthropicFetcher::fetch_plan: plan parsed");
        // Narration synthesis lives outside this crate; the API path always
        // plays back on fixed timers.
        Ok(PlanResponse::new(plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_plain() {
        let text = r#"{"explanation": "E", "whiteboard": []}"#;
        assert_eq!(extract_json(text), Some(text));
    }

    #[test]
    fn test_extract_json_fenced() {
        let text = "Here you go:\n```json\n{\"explanation\": \"E\", \"whiteboard\": []}\n```\n";
        let json = extract_json(text).unwrap();
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.explanation, "E");
    }

    #[test]
    fn test_extract_json_none() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }
}
