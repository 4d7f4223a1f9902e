//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::chat::ChatProvider;
use crate::llm::completion::CompletionProvider;
use crate::llm::echo::EchoProvider;
use crate::llm::provider::{LlmProvider, SamplingParams};
use crate::llm::response::Generation;
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// 旧 completion エンドポイント (/completions)
    Completion,
    /// Chat Completions (/chat/completions)
    Chat,
    /// Echo（プロンプトをそのまま返す）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "completion" | "completions" | "legacy" => Some(Self::Completion),
            "chat" | "chat_completions" => Some(Self::Chat),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// 認証情報が必要か
    pub fn needs_api_key(&self) -> bool {
        !matches!(self, Self::Echo)
    }
}

/// プロバイダ作成時の設定（None は各プロバイダのデフォルト）
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<ApiKey>,
    /// API キーを読んだ環境変数名（エラー表示用）
    pub api_key_env: Option<String>,
    pub params: SamplingParams,
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Completion(CompletionProvider),
    Chat(ChatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Completion(p) => p.name(),
            Self::Chat(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Completion(p) => p.model(),
            Self::Chat(p) => p.model(),
            Self::Echo(p) => p.model(),
        }
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        match self {
            Self::Completion(p) => p.make_request_payload(prompt),
            Self::Chat(p) => p.make_request_payload(prompt),
            Self::Echo(p) => p.make_request_payload(prompt),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Completion(p) => p.make_http_request(request_json),
            Self::Chat(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response(&self, response_json: &str) -> Result<Generation, Error> {
        match self {
            Self::Completion(p) => p.parse_response(response_json),
            Self::Chat(p) => p.parse_response(response_json),
            Self::Echo(p) => p.parse_response(response_json),
        }
    }
}

/// プロバイダを作成する
pub fn create_provider(provider_type: ProviderType, settings: ProviderSettings) -> AnyProvider {
    match provider_type {
        ProviderType::Completion => AnyProvider::Completion(CompletionProvider::new(settings)),
        ProviderType::Chat => AnyProvider::Chat(ChatProvider::new(settings)),
        ProviderType::Echo => AnyProvider::Echo(EchoProvider::new()),
    }
}
