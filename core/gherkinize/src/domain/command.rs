//! gherkinize コマンドの enum（Command Pattern）

use std::path::PathBuf;

use common::domain::{ModelName, ProviderName};

use crate::domain::{OutputDestination, PromptSource};

/// シナリオ生成 1 回分の指定
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub source: PromptSource,
    pub destination: OutputDestination,
    /// 既定テンプレートの代わりに使うテンプレートファイル
    pub template: Option<PathBuf>,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
}

/// gherkinize の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum GenCommand {
    /// ヘルプ表示
    Help,
    /// 利用可能なプロファイル一覧
    ListProfiles,
    /// プロンプトを読み、生成し、書き出す
    Generate(GenerateRequest),
}
