//! gherkinize 共通ライブラリ
//!
//! エラー型・ドメイン型・Outbound ポートと標準アダプタ・LLM プロバイダを提供します。

/// アダプター（ports の標準実装）
pub mod adapter;

/// ドメイン型
pub mod domain;

/// エラーハンドリング
pub mod error;

/// LLMプロバイダ
pub mod llm;

/// Ports & Adapters のポート定義
pub mod ports;
