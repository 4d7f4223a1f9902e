//! OpenAI 互換エンドポイントへの POST（completion / chat 共通）

use crate::domain::ApiKey;
use crate::error::Error;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// エラーレスポンスからメッセージを取り出す（`{"error": {"message": ...}}` 形式でなければ本文ごと）
pub fn api_error_message(status: reqwest::StatusCode, response_text: &str) -> String {
    serde_json::from_str::<Value>(response_text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
}

/// 200 応答でも本文に error が入っていれば Err にする
pub fn check_error_body(v: &Value) -> Result<(), Error> {
    match v.get("error") {
        Some(err) if !err.is_null() => {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            Err(Error::http(format!("OpenAI API error: {}", msg)))
        }
        _ => Ok(()),
    }
}

/// JSON 本文を POST して応答本文を返す（ブロッキング、タイムアウトはクライアント既定のまま）
pub fn post_json(url: &str, api_key: &ApiKey, request_json: &str) -> Result<String, Error> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("Authorization", api_key.bearer())
        .body(request_json.to_string())
        .send()
        .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let response_text = response
        .text()
        .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(Error::http(format!(
            "OpenAI API error: {}",
            api_error_message(status, &response_text)
        )));
    }

    Ok(response_text)
}

/// 認証情報が無ければ Env エラー（API キーを読む環境変数名を含める）
pub fn require_key<'a>(api_key: Option<&'a ApiKey>, api_key_env: &str) -> Result<&'a ApiKey, Error> {
    api_key.ok_or_else(|| Error::env(format!("{} environment variable is not set", api_key_env)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_message_from_error_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let msg = api_error_message(reqwest::StatusCode::UNAUTHORIZED, body);
        assert_eq!(msg, "Incorrect API key provided");
    }

    #[test]
    fn test_api_error_message_plain_body() {
        let msg = api_error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(msg.starts_with("HTTP 502"));
        assert!(msg.contains("upstream down"));
    }

    #[test]
    fn test_check_error_body() {
        assert!(check_error_body(&json!({"choices": []})).is_ok());
        assert!(check_error_body(&json!({"error": null, "choices": []})).is_ok());
        let err = check_error_body(&json!({"error": {"message": "model not found"}})).unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert!(err.to_string().contains("model not found"));
    }

    #[test]
    fn test_require_key() {
        let key = ApiKey::new("k");
        assert!(require_key(Some(&key), DEFAULT_API_KEY_ENV).is_ok());
        let err = require_key(None, "MY_KEY").unwrap_err();
        assert!(matches!(err, Error::Env(_)));
        assert_eq!(err.to_string(), "MY_KEY environment variable is not set");
    }
}
