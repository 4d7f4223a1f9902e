//! 入力元・出力先

use std::path::PathBuf;

/// 入力ファイルの形式（CLI の -i/--input）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// テキストファイルをそのまま読み、テンプレートに埋め込む
    #[default]
    Text,
    /// `prompt` フィールドを持つ JSON。テンプレートには埋め込まない
    Json,
    /// 組み込みのサンプルテストケース
    Inline,
}

impl InputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }

    /// データディレクトリ内の既定ファイル名（Inline はファイルなし）
    pub fn default_file_name(&self) -> Option<&'static str> {
        match self {
            Self::Text => Some("data.txt"),
            Self::Json => Some("data.json"),
            Self::Inline => None,
        }
    }
}

/// プロンプトの入力元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    Text(PathBuf),
    Json(PathBuf),
    Inline,
}

impl PromptSource {
    /// ログ用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Json(_) => "json",
            Self::Inline => "inline",
        }
    }
}

/// 生成結果の出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    /// ファイルへ上書き保存
    File(PathBuf),
    /// 標準出力へ表示
    Console,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_from_str() {
        assert_eq!(InputFormat::from_str("text"), Some(InputFormat::Text));
        assert_eq!(InputFormat::from_str("txt"), Some(InputFormat::Text));
        assert_eq!(InputFormat::from_str("json"), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_str("inline"), Some(InputFormat::Inline));
        assert_eq!(InputFormat::from_str("yaml"), None);
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(InputFormat::Text.default_file_name(), Some("data.txt"));
        assert_eq!(InputFormat::Json.default_file_name(), Some("data.json"));
        assert_eq!(InputFormat::Inline.default_file_name(), None);
    }
}
