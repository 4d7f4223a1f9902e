//! LlmProvider を TextGenerator として使う標準アダプタ

use std::sync::Arc;

use common::domain::{ApiKey, ModelName, ProviderName};
use common::error::Error;
use common::llm::{
    create_provider, list_profiles, load_profiles_config, resolve_provider, AnyProvider,
    Generation, LlmProvider,
};
use common::ports::outbound::{EnvResolver, FileSystem};

use crate::ports::outbound::{GenerateError, TextGenerator, TextGeneratorFactory};

/// LlmProvider で payload 生成 → HTTP → 応答の型付けを 1 回だけ行う
pub struct ProviderTextGenerator<P: LlmProvider> {
    provider: P,
    profile_name: String,
}

impl<P: LlmProvider> ProviderTextGenerator<P> {
    pub fn new(provider: P, profile_name: impl Into<String>) -> Self {
        Self {
            provider,
            profile_name: profile_name.into(),
        }
    }
}

impl<P: LlmProvider + Send + Sync> TextGenerator for ProviderTextGenerator<P> {
    fn describe(&self) -> String {
        format!(
            "{} ({}, model {})",
            self.profile_name,
            self.provider.name(),
            self.provider.model()
        )
    }

    fn generate(&self, prompt: &str) -> Result<Generation, GenerateError> {
        let payload = self
            .provider
            .make_request_payload(prompt)
            .map_err(|e| GenerateError::Request(e.to_string()))?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| GenerateError::Request(format!("Failed to serialize request: {}", e)))?;
        let response_json = self
            .provider
            .make_http_request(&request_json)
            .map_err(|e| match e {
                Error::Env(msg) => GenerateError::MissingCredential(msg),
                other => GenerateError::Request(other.to_string()),
            })?;
        self.provider
            .parse_response(&response_json)
            .map_err(|e| match e {
                Error::Http(msg) => GenerateError::Request(msg),
                other => GenerateError::Response(other.to_string()),
            })
    }
}

/// profiles.json と環境変数からプロバイダを組み立てる標準ファクトリ
pub struct StdTextGeneratorFactory {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn EnvResolver>,
}

impl StdTextGeneratorFactory {
    pub fn new(fs: Arc<dyn FileSystem>, env: Arc<dyn EnvResolver>) -> Self {
        Self { fs, env }
    }
}

impl TextGeneratorFactory for StdTextGeneratorFactory {
    fn create(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<Box<dyn TextGenerator>, Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), self.env.as_ref())?;
        let resolved = resolve_provider(profile, cfg.as_ref())?.with_model_override(model);
        // 認証情報はここで一度だけ読み、以後は値として渡す
        let api_key = if resolved.provider_type.needs_api_key() {
            self.env.var(resolved.api_key_env()).map(ApiKey::new)
        } else {
            None
        };
        let profile_name = resolved.profile_name.clone();
        let provider_type = resolved.provider_type;
        let provider: AnyProvider = create_provider(provider_type, resolved.into_settings(api_key));
        Ok(Box::new(ProviderTextGenerator::new(provider, profile_name)))
    }

    fn list_profiles(&self) -> Result<(Vec<String>, String), Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), self.env.as_ref())?;
        Ok(list_profiles(cfg.as_ref()))
    }
}
