//! プロンプトテンプレート
//!
//! プレースホルダ `{test_case_data}` を入力テキストで置き換えるだけ。エスケープや長さ制限はしない。

use common::error::Error;

pub const PLACEHOLDER: &str = "{test_case_data}";

const DEFAULT_TEMPLATE: &str = "Convert the following test case into a Gherkin Cucumber scenario: \
{test_case_data} \
Please write the scenario in a way that includes background, \
scenario outline, and examples where appropriate.";

/// -i inline で使う組み込みのテストケース
pub const SAMPLE_TEST_CASE: &str = "\
GIVEN I have a gas contract
AND it has two valid meter reads with thermal properties
AND EE gpke.degreeDaysPlus.value = 0
AND I let the system estimate a third meter read
AND the outcome can be validated positively with the Excel attached
WHEN I set EE gpke.degreeDaysPlus.value = X (other than 0)
AND I let the system estimate the third meter read again
THEN the results differ by the value X";

/// プレースホルダを 1 つ以上含むテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// テンプレート文字列を検証して作る（プレースホルダが無ければ引数エラー）
    pub fn parse(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        if !text.contains(PLACEHOLDER) {
            return Err(Error::invalid_argument(format!(
                "Template must contain the placeholder {}",
                PLACEHOLDER
            )));
        }
        Ok(Self(text))
    }

    /// 入力テキストを埋め込んだプロンプト
    pub fn render(&self, test_case_data: &str) -> String {
        self.0.replace(PLACEHOLDER, test_case_data)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_string())
    }
}
