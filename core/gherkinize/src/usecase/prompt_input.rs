//! プロンプトの取得（テキスト / JSON / 組み込み）

use std::path::Path;

use common::error::Error;
use common::ports::outbound::FileSystem;
use serde::Deserialize;

use crate::domain::{PromptSource, PromptTemplate, SAMPLE_TEST_CASE};

/// data.json の形（ルートはオブジェクト、prompt は文字列）
#[derive(Debug, Deserialize)]
struct PromptFile {
    #[serde(default)]
    prompt: Option<String>,
}

/// 読み取ったプロンプト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredPrompt {
    pub text: String,
    /// JSON に prompt フィールドが無く空文字にした
    pub prompt_field_missing: bool,
}

/// JSON 本文から prompt を取り出す。フィールドが無ければ None
pub fn prompt_from_json(contents: &str, path: &Path) -> Result<Option<String>, Error> {
    let shape_error = |detail: String| {
        Error::invalid_input(format!(
            "{}: expected a JSON object with a string \"prompt\" field: {}",
            path.display(),
            detail
        ))
    };
    let value: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| shape_error(e.to_string()))?;
    // 配列も構造体として読めてしまうので先にオブジェクトか確認する
    if !value.is_object() {
        return Err(shape_error("root is not an object".to_string()));
    }
    let file: PromptFile = serde_json::from_value(value).map_err(|e| shape_error(e.to_string()))?;
    Ok(file.prompt)
}

/// 入力元からプロンプトを作る
///
/// テキストと組み込みサンプルはテンプレートに埋め込む。JSON の prompt はそのまま使う。
pub fn acquire_prompt(
    fs: &dyn FileSystem,
    source: &PromptSource,
    template: &PromptTemplate,
) -> Result<AcquiredPrompt, Error> {
    match source {
        PromptSource::Text(path) => {
            let data = fs.read_to_string(path)?;
            Ok(AcquiredPrompt {
                text: template.render(&data),
                prompt_field_missing: false,
            })
        }
        PromptSource::Json(path) => {
            let contents = fs.read_to_string(path)?;
            let prompt = prompt_from_json(&contents, path)?;
            Ok(AcquiredPrompt {
                prompt_field_missing: prompt.is_none(),
                text: prompt.unwrap_or_default(),
            })
        }
        PromptSource::Inline => Ok(AcquiredPrompt {
            text: template.render(SAMPLE_TEST_CASE),
            prompt_field_missing: false,
        }),
    }
}
