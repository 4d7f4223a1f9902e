//! Echoプロバイダの実装
//!
//! 実際に LLM API を呼び出さず、送られたプロンプトをそのまま completion 1 件として返す。
//! 認証情報不要。デバッグや動作確認用。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use crate::llm::response::{CompletionResponse, Generation};
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        Ok(json!({ "model": "echo", "prompt": prompt }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let request: Value = serde_json::from_str(request_json)
            .map_err(|e| Error::json(format!("Failed to parse request JSON: {}", e)))?;
        let prompt = request["prompt"].as_str().unwrap_or_default();
        let response = json!({
            "object": "text_completion",
            "model": "echo",
            "choices": [{ "text": prompt, "index": 0, "finish_reason": "stop" }]
        });
        Ok(response.to_string())
    }

    fn parse_response(&self, response_json: &str) -> Result<Generation, Error> {
        let r: CompletionResponse = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        Ok(Generation::Completion(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_provider_name() {
        let provider = EchoProvider::new();
        assert_eq!(provider.name(), "echo");
        assert_eq!(provider.model(), "echo");
    }

    #[test]
    fn test_echo_round_trips_prompt() {
        let provider = EchoProvider::new();
        let payload = provider.make_request_payload("GIVEN a gas contract").unwrap();
        let response = provider.make_http_request(&payload.to_string()).unwrap();
        let g = provider.parse_response(&response).unwrap();
        assert_eq!(g.text(), Some("GIVEN a gas contract"));
    }

    #[test]
    fn test_echo_invalid_request_json() {
        let err = EchoProvider::new().make_http_request("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
