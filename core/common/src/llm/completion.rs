//! 旧 completion エンドポイント (/completions) プロバイダ
//!
//! 1 つのプロンプト文字列を送り、choices[].text を受け取る。

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::http::{self, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
use crate::llm::provider::{LlmProvider, SamplingParams};
use crate::llm::response::{CompletionResponse, Generation};
use crate::llm::ProviderSettings;
use serde_json::{json, Value};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";

/// completion プロバイダ
pub struct CompletionProvider {
    model: String,
    base_url: String,
    api_key: Option<ApiKey>,
    api_key_env: String,
    params: SamplingParams,
}

impl CompletionProvider {
    /// 新しい completion プロバイダを作成
    ///
    /// 認証情報が無くても作成はできる。送信時に `Error::Env` になる。
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
        format!("{}/completions", self.base_url)
    }
}

impl LlmProvider for CompletionProvider {
    fn name(&self) -> &str {
        "completion"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        let mut payload = json!({
            "model": self.model,
            "prompt": prompt,
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
        let r: CompletionResponse = serde_json::from_value(v)
            .map_err(|e| Error::json(format!("Unexpected completion response: {}", e)))?;
        Ok(Generation::Completion(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> CompletionProvider {
        CompletionProvider::new(ProviderSettings {
            api_key: Some(ApiKey::new("test-key")),
            ..Default::default()
        })
    }

    #[test]
    fn test_defaults() {
        let p = provider();
        assert_eq!(p.name(), "completion");
        assert_eq!(p.model(), "gpt-3.5-turbo-0125");
        assert_eq!(p.url(), "https://api.openai.com/v1/completions");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let p = CompletionProvider::new(ProviderSettings {
            base_url: Some("http://localhost:8080/v1/".to_string()),
            ..Default::default()
        });
        assert_eq!(p.url(), "http://localhost:8080/v1/completions");
    }

    #[test]
    fn test_make_request_payload() {
        let payload = provider().make_request_payload("X").unwrap();
        assert_eq!(payload["model"], "gpt-3.5-turbo-0125");
        assert_eq!(payload["prompt"], "X");
        assert_eq!(payload["max_tokens"], 150);
        assert_eq!(payload["temperature"], 0.7);
        assert_eq!(payload["top_p"], 1.0);
        assert_eq!(payload["frequency_penalty"], 0.0);
        assert_eq!(payload["presence_penalty"], 0.0);
        assert!(payload.get("messages").is_none());
    }

    #[test]
    fn test_http_request_without_key_is_env_error() {
        let p = CompletionProvider::new(ProviderSettings::default());
        let err = p.make_http_request("{}").unwrap_err();
        assert!(matches!(err, Error::Env(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_parse_response() {
        let g = provider()
            .parse_response(r#"{"choices": [{"text": "Scenario: ...", "index": 0}]}"#)
            .unwrap();
        assert_eq!(g.text(), Some("Scenario: ..."));
    }

    #[test]
    fn test_parse_response_error_body() {
        let err = provider()
            .parse_response(r#"{"error": {"message": "quota exceeded"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let err = provider().parse_response("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
