//! Chat Completions (/chat/completions) プロバイダ
//!
//! user メッセージ 1 件だけを送る。履歴・システム指示・ツール呼び出しは扱わない。

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::http::{self, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
use crate::llm::provider::{LlmProvider, Message, SamplingParams};
use crate::llm::response::{ChatResponse, Generation};
use crate::llm::ProviderSettings;
use serde_json::{json, Value};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// chat プロバイダ
pub struct ChatProvider {
    model: String,
    base_url: String,
    api_key: Option<ApiKey>,
    api_key_env: String,
    params: SamplingParams,
}

impl ChatProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            model: settings.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: settings
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: settings.api_key,
            api_key_env: settings
                .api_key_env
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            params: settings.params,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl LlmProvider for ChatProvider {
    fn name(&self) -> &str {
        "chat"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        let msg = Message::user(prompt);
        let mut payload = json!({
            "model": self.model,
            "messages": [{ "role": msg.role, "content": msg.content }],
        });
        self.params.apply_to(&mut payload);
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let key = http::require_key(self.api_key.as_ref(), &self.api_key_env)?;
        http::post_json(&self.url(), key, request_json)
    }

    fn parse_response(&self, response_json: &str) -> Result<Generation, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        http::check_error_body(&v)?;
        let r: ChatResponse = serde_json::from_value(v)
            .map_err(|e| Error::json(format!("Unexpected chat response: {}", e)))?;
        Ok(Generation::Chat(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ChatProvider {
        ChatProvider::new(ProviderSettings {
            api_key: Some(ApiKey::new("test-key")),
            ..Default::default()
        })
    }

    #[test]
    fn test_defaults() {
        let p = provider();
        assert_eq!(p.name(), "chat");
        assert_eq!(p.model(), "gpt-3.5-turbo");
        assert_eq!(p.url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_make_request_payload_single_user_message() {
        let payload = provider().make_request_payload("Convert this").unwrap();
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Convert this");
        assert_eq!(payload["max_tokens"], 150);
        assert_eq!(payload["temperature"], 0.7);
        assert!(payload.get("prompt").is_none());
    }

    #[test]
    fn test_custom_params_and_model() {
        let p = ChatProvider::new(ProviderSettings {
            model: Some("gpt-4o-mini".to_string()),
            params: SamplingParams {
                max_tokens: 400,
                temperature: 0.2,
                ..Default::default()
            },
            ..Default::default()
        });
        let payload = p.make_request_payload("x").unwrap();
        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["max_tokens"], 400);
        assert_eq!(payload["temperature"], 0.2);
    }

    #[test]
    fn test_http_request_without_key_names_custom_env() {
        let p = ChatProvider::new(ProviderSettings {
            api_key_env: Some("AZURE_KEY".to_string()),
            ..Default::default()
        });
        let err = p.make_http_request("{}").unwrap_err();
        assert_eq!(err.to_string(), "AZURE_KEY environment variable is not set");
    }

    #[test]
    fn test_parse_response_last_message() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Feature: Gas contract"}}]}"#;
        let g = provider().parse_response(json).unwrap();
        assert!(matches!(g, Generation::Chat(_)));
        assert_eq!(g.text(), Some("Feature: Gas contract"));
    }

    #[test]
    fn test_parse_response_empty() {
        let g = provider().parse_response(r#"{"choices": []}"#).unwrap();
        assert_eq!(g.text(), None);
    }
}
