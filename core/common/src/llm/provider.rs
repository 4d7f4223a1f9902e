//! LLMプロバイダのトレイト定義

use crate::error::Error;
use crate::llm::response::Generation;
use serde_json::Value;

/// サンプリングパラメータ（リクエストにそのまま載せる）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.7,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl SamplingParams {
    /// payload（JSON オブジェクト）にパラメータを書き込む
    pub fn apply_to(&self, payload: &mut Value) {
        payload["max_tokens"] = Value::from(self.max_tokens);
        payload["temperature"] = Value::from(self.temperature);
        payload["top_p"] = Value::from(self.top_p);
        payload["frequency_penalty"] = Value::from(self.frequency_penalty);
        payload["presence_penalty"] = Value::from(self.presence_penalty);
    }
}

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（completion、chat、echo）はこのトレイトを実装する。
/// 1 回のリクエストで 1 つのプロンプトを送り、型付きの応答を返すだけで、
/// 会話履歴やストリーミングは扱わない。
pub trait LlmProvider {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// 使用するモデル名
    fn model(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `prompt` - 送信するプロンプト（整形済み）
    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error)` - 認証情報なしは `Error::Env`、通信・API エラーは `Error::Http`
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスを型付きの Generation に変換
    fn parse_response(&self, response_json: &str) -> Result<Generation, Error>;
}

/// メッセージ構造体（chat リクエスト用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sampling_params_default() {
        let p = SamplingParams::default();
        assert_eq!(p.max_tokens, 150);
        assert_eq!(p.temperature, 0.7);
        assert_eq!(p.top_p, 1.0);
        assert_eq!(p.frequency_penalty, 0.0);
        assert_eq!(p.presence_penalty, 0.0);
    }

    #[test]
    fn test_sampling_params_apply_to() {
        let mut payload = json!({ "model": "m" });
        SamplingParams::default().apply_to(&mut payload);
        assert_eq!(payload["model"], "m");
        assert_eq!(payload["max_tokens"], 150);
        assert_eq!(payload["temperature"], 0.7);
        assert_eq!(payload["top_p"], 1.0);
        assert_eq!(payload["frequency_penalty"], 0.0);
        assert_eq!(payload["presence_penalty"], 0.0);
    }

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_with_multiline_content() {
        let msg = Message::user("GIVEN a\nWHEN b\nTHEN c");
        assert_eq!(msg.content.lines().count(), 3);
    }
}
