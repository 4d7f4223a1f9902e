//! LLMプロバイダの実装
//!
//! OpenAI 互換の completion / chat エンドポイントと、ネットワーク不要の echo を同じトレイトで扱う。

pub mod chat;
pub mod completion;
pub mod config;
pub mod echo;
pub mod factory;
pub mod http;
pub mod provider;
pub mod resolver;
pub mod response;

pub use factory::{create_provider, AnyProvider, ProviderSettings, ProviderType};
pub use provider::{LlmProvider, SamplingParams};
pub use resolver::{list_profiles, load_profiles_config, resolve_provider, ResolvedProvider};
pub use response::Generation;
