use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::GenerationConfig;
use crate::features::responses::errors::GenerationError;

/// What is sent to the text-generation function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Id of the configured AI model
    pub model_id: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_context: Option<String>,
}

/// Body returned by the generation function
#[derive(Debug, Deserialize)]
struct GenerationResponseBody {
    response: Option<String>,
    error: Option<serde_json::Value>,
}

/// Produces text for a substituted prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// Calls a remote HTTP function: `POST {url}` with a JSON `GenerationRequest`,
/// expecting `{"response": "..."}` back.
pub struct RemoteFunctionGenerator {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl RemoteFunctionGenerator {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("GuestchatCore/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url: config.function_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for RemoteFunctionGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        tracing::debug!(
            "Calling generation function: model_id={}, prompt_len={}",
            request.model_id,
            request.prompt.len()
        );

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Generation function returned {}: {}", status, body);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_generation_body(&body)
    }
}

fn parse_generation_body(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerationResponseBody = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    if let Some(error) = parsed.error.filter(|e| !e.is_null()) {
        let message = match &error {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            other => other.to_string(),
        };
        return Err(GenerationError::Remote(message));
    }

    parsed
        .response
        .ok_or_else(|| GenerationError::InvalidResponse("missing `response` field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case_and_skips_empty() {
        let request = GenerationRequest {
            model_id: "m-1".to_string(),
            prompt: "Hi".to_string(),
            system_prompt: None,
            knowledge_base_context: Some("Pool:\nOpen".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "modelId": "m-1",
                "prompt": "Hi",
                "knowledgeBaseContext": "Pool:\nOpen"
            })
        );
    }

    #[test]
    fn test_parse_success() {
        let text = parse_generation_body(r#"{"response": "Hello there"}"#).unwrap();
        assert_eq!(text, "Hello there");
    }

    #[test]
    fn test_parse_remote_error() {
        let err = parse_generation_body(r#"{"error": "model overloaded"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Remote(ref m) if m == "model overloaded"));

        let err = parse_generation_body(r#"{"error": {"message": "bad key"}}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Remote(ref m) if m == "bad key"));
    }

    #[test]
    fn test_parse_null_error_with_response_succeeds() {
        let text = parse_generation_body(r#"{"response": "ok", "error": null}"#).unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_parse_missing_response() {
        let err = parse_generation_body(r#"{"data": 1}"#).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));

        let err = parse_generation_body("not json").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn test_new_uses_config() {
        let config = GenerationConfig {
            function_url: "http://localhost:9/generate".to_string(),
            api_key: Some("secret".to_string()),
            timeout: std::time::Duration::from_secs(5),
        };
        let generator = RemoteFunctionGenerator::new(&config).unwrap();
        assert_eq!(generator.url, "http://localhost:9/generate");
        assert_eq!(generator.api_key.as_deref(), Some("secret"));
    }
}
