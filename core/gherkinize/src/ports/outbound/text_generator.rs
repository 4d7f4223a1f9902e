//! テキスト生成 Outbound ポート
//!
//! 「プロンプトを渡して生成結果か型付きの失敗を受け取る」だけの能力。
//! テストではネットワークを使わない Stub を差し込む。

use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::Generation;

/// 生成失敗
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// 認証情報が無い（致命的）
    #[error("{0}")]
    MissingCredential(String),
    /// リクエスト送信・通信・API エラー
    #[error("{0}")]
    Request(String),
    /// 応答の形が読めない
    #[error("{0}")]
    Response(String),
}

/// 単発のテキスト生成
pub trait TextGenerator: Send + Sync {
    /// ログ用の説明（プロファイル名とモデル）
    fn describe(&self) -> String;

    fn generate(&self, prompt: &str) -> Result<Generation, GenerateError>;
}

/// プロファイル名・モデル名から TextGenerator を作る
pub trait TextGeneratorFactory: Send + Sync {
    fn create(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<Box<dyn TextGenerator>, Error>;

    /// 利用可能なプロファイル名（ソート済み）と既定のプロファイル名
    fn list_profiles(&self) -> Result<(Vec<String>, String), Error>;
}
