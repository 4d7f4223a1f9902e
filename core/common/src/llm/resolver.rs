//! profiles.json の読み込みとプロバイダ解決

use crate::domain::{ApiKey, ModelName, ProviderName};
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::{ProviderSettings, ProviderType};
use crate::llm::http::DEFAULT_API_KEY_ENV;
use crate::llm::provider::SamplingParams;
use crate::ports::outbound::{EnvResolver, FileSystem};

/// 未指定時のプロファイル名
pub const DEFAULT_PROFILE: &str = "completion";

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "local", "chat"）。エラー表示・ログ用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ResolvedProvider {
    /// API キーを読む環境変数名
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// --model 指定があればプロファイルのモデルより優先する
    pub fn with_model_override(mut self, model: Option<&ModelName>) -> Self {
        if let Some(m) = model {
            self.model = Some(m.to_string());
        }
        self
    }

    /// 認証情報を受け取ってプロバイダ作成用の設定にする
    pub fn into_settings(self, api_key: Option<ApiKey>) -> ProviderSettings {
        let defaults = SamplingParams::default();
        let params = SamplingParams {
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            ..defaults
        };
        ProviderSettings {
            api_key_env: Some(self.api_key_env().to_string()),
            model: self.model,
            base_url: self.base_url,
            api_key,
            params,
        }
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = env.resolve_profiles_config_path()?;
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs.read_to_string(path.as_path())?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Completion => ProviderType::Completion,
        ProviderTypeKind::Chat => ProviderType::Chat,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロファイル名
fn builtin_provider_names() -> &'static [&'static str] {
    &["completion", "chat", "echo"]
}

/// 利用可能なプロファイル名（ビルトイン + profiles.json、ソート済み）と既定プロファイル名
pub fn list_profiles(cfg: Option<&ProfilesConfig>) -> (Vec<String>, String) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
    (names, default)
}

/// 要求されたプロファイル名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロファイルの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(profile) = cfg.and_then(|c| c.providers.get(effective_name)) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type: provider_type_kind_to_provider_type(profile.type_),
            base_url: profile.base_url.clone(),
            model: profile.model.clone(),
            api_key_env: profile.api_key_env.clone(),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        });
    }

    // 2) ビルトイン
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            max_tokens: None,
        });
    }

    let (available, _) = list_profiles(cfg);
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::config::ProviderProfile;
    use std::collections::HashMap;

    fn profile(type_: ProviderTypeKind) -> ProviderProfile {
        ProviderProfile {
            type_,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            max_tokens: None,
        }
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_none() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "completion");
        assert_eq!(r.provider_type, ProviderType::Completion);
        assert!(r.model.is_none());
        assert_eq!(r.api_key_env(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_resolve_provider_builtins() {
        for (name, expected) in [
            ("chat", ProviderType::Chat),
            ("completion", ProviderType::Completion),
            ("echo", ProviderType::Echo),
        ] {
            let r = resolve_provider(Some(&ProviderName::new(name)), None).unwrap();
            assert_eq!(r.provider_type, expected);
        }
    }

    #[test]
    fn test_resolve_provider_no_cfg_unknown() {
        let name = ProviderName::new("unknown_provider");
        let e = resolve_provider(Some(&name), None).unwrap_err();
        assert!(e.is_usage());
        let msg = e.to_string();
        assert!(msg.contains("Unknown provider"));
        assert!(msg.contains("unknown_provider"));
        assert!(msg.contains("Available: chat, completion, echo"));
    }

    #[test]
    fn test_resolve_provider_cfg_default_provider() {
        let mut p = profile(ProviderTypeKind::Chat);
        p.base_url = Some("https://my.api/v1".to_string());
        p.model = Some("gpt-4".to_string());
        p.api_key_env = Some("MY_KEY".to_string());
        p.temperature = Some(0.2);
        p.max_tokens = Some(500);
        let cfg = ProfilesConfig {
            default_provider: Some("mine".to_string()),
            providers: HashMap::from([("mine".to_string(), p)]),
        };
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "mine");
        assert_eq!(r.provider_type, ProviderType::Chat);
        assert_eq!(r.base_url.as_deref(), Some("https://my.api/v1"));
        assert_eq!(r.api_key_env(), "MY_KEY");

        let settings = r.into_settings(Some(ApiKey::new("k")));
        assert_eq!(settings.model.as_deref(), Some("gpt-4"));
        assert_eq!(settings.params.temperature, 0.2);
        assert_eq!(settings.params.max_tokens, 500);
        assert_eq!(settings.params.top_p, 1.0);
        assert_eq!(settings.api_key_env.as_deref(), Some("MY_KEY"));
    }

    #[test]
    fn test_resolve_provider_profile_shadows_builtin() {
        let cfg = ProfilesConfig {
            default_provider: None,
            providers: HashMap::from([("chat".to_string(), profile(ProviderTypeKind::Echo))]),
        };
        let r = resolve_provider(Some(&ProviderName::new("chat")), Some(&cfg)).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
    }

    #[test]
    fn test_model_override() {
        let r = resolve_provider(Some(&ProviderName::new("chat")), None)
            .unwrap()
            .with_model_override(Some(&ModelName::new("gpt-4o")));
        assert_eq!(r.model.as_deref(), Some("gpt-4o"));
        let settings = r.into_settings(None);
        assert!(settings.api_key.is_none());
        assert_eq!(settings.params, SamplingParams::default());
    }

    #[test]
    fn test_list_profiles() {
        let cfg = ProfilesConfig {
            default_provider: Some("local".to_string()),
            providers: HashMap::from([
                ("local".to_string(), profile(ProviderTypeKind::Chat)),
                ("echo".to_string(), profile(ProviderTypeKind::Echo)),
            ]),
        };
        let (names, default) = list_profiles(Some(&cfg));
        assert_eq!(names, vec!["chat", "completion", "echo", "local"]);
        assert_eq!(default, "local");

        let (names, default) = list_profiles(None);
        assert_eq!(names, vec!["chat", "completion", "echo"]);
        assert_eq!(default, "completion");
    }

    #[test]
    fn test_load_profiles_config_missing_and_broken() {
        use crate::adapter::StdFileSystem;

        struct HomeEnv(String);
        impl EnvResolver for HomeEnv {
            fn var(&self, name: &str) -> Option<String> {
                (name == "GHERKINIZE_HOME").then(|| self.0.clone())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let env = HomeEnv(dir.path().display().to_string());
        assert!(load_profiles_config(&StdFileSystem, &env).unwrap().is_none());

        std::fs::write(dir.path().join("profiles.json"), "{ not json").unwrap();
        let err = load_profiles_config(&StdFileSystem, &env).unwrap_err();
        assert!(err.to_string().contains("profiles.json"));

        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{"default_provider": "chat", "providers": {}}"#,
        )
        .unwrap();
        let cfg = load_profiles_config(&StdFileSystem, &env).unwrap().unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("chat"));
    }
}
