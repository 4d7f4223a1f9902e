//! シナリオ生成ユースケース
//!
//! 設定解決 → 入力読み取り → 整形 → 1 回の生成 → 取り出し → 書き出し、を順に行うだけ。
//! 再試行はしない。生成の失敗は報告して「応答なし」として終える（認証情報なしだけは致命的）。

use std::path::PathBuf;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};

use crate::domain::{GenerateRequest, OutputDestination, PromptTemplate};
use crate::ports::outbound::{Console, GenerateError, TextGeneratorFactory};
use crate::usecase::prompt_input::acquire_prompt;

/// 生成 1 回の結末（いずれも終了コード 0）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// ファイルへ書き出した
    Written(PathBuf),
    /// コンソールへ表示した
    Printed,
    /// 生成呼び出しが失敗した
    NoResponse,
    /// 応答に候補・メッセージが無かった
    EmptyResponse,
}

pub struct GenerateScenarioUseCase {
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn Log>,
    console: Arc<dyn Console>,
    generator_factory: Arc<dyn TextGeneratorFactory>,
}

impl GenerateScenarioUseCase {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        logger: Arc<dyn Log>,
        console: Arc<dyn Console>,
        generator_factory: Arc<dyn TextGeneratorFactory>,
    ) -> Self {
        Self {
            fs,
            logger,
            console,
            generator_factory,
        }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.logger.log(&record.layer("usecase"));
    }

    fn load_template(&self, request: &GenerateRequest) -> Result<PromptTemplate, Error> {
        match &request.template {
            Some(path) => PromptTemplate::parse(self.fs.read_to_string(path)?),
            None => Ok(PromptTemplate::default()),
        }
    }

    pub fn run(&self, request: &GenerateRequest) -> Result<GenerateOutcome, Error> {
        let generator = self
            .generator_factory
            .create(request.profile.as_ref(), request.model.as_ref())?;
        let template = self.load_template(request)?;

        let prompt = acquire_prompt(self.fs.as_ref(), &request.source, &template)?;
        if prompt.prompt_field_missing {
            self.log(
                LogRecord::new(LogLevel::Warn, "prompt field missing; sending empty prompt")
                    .kind("input"),
            );
        }
        self.log(
            LogRecord::new(LogLevel::Info, "prompt read")
                .kind("input")
                .field("source", request.source.kind())
                .field("prompt_len", prompt.text.len()),
        );

        self.log(
            LogRecord::new(LogLevel::Info, "request sent")
                .kind("request")
                .field("generator", generator.describe()),
        );
        let generation = match generator.generate(&prompt.text) {
            Ok(g) => g,
            Err(GenerateError::MissingCredential(msg)) => {
                self.log(LogRecord::new(LogLevel::Error, msg.clone()).kind("error"));
                return Err(Error::env(msg));
            }
            Err(e) => {
                self.console.eprint(&format!("An error occurred: {}", e));
                self.log(
                    LogRecord::new(LogLevel::Error, "generation failed")
                        .kind("error")
                        .field("error", e.to_string()),
                );
                self.console.print("No response was returned from the API.");
                return Ok(GenerateOutcome::NoResponse);
            }
        };

        let Some(text) = generation.text() else {
            self.console.print(generation.empty_notice());
            self.log(LogRecord::new(LogLevel::Warn, generation.empty_notice()).kind("response"));
            return Ok(GenerateOutcome::EmptyResponse);
        };

        match &request.destination {
            OutputDestination::File(path) => {
                self.fs.write(path, text)?;
                self.console
                    .print(&format!("Response written to {}", path.display()));
                self.log(
                    LogRecord::new(LogLevel::Info, "output written")
                        .kind("output")
                        .field("path", path.display().to_string())
                        .field("len", text.len()),
                );
                Ok(GenerateOutcome::Written(path.clone()))
            }
            OutputDestination::Console => {
                self.console.print("---Generated Cucumber Scenario:");
                self.console.print(text);
                self.log(
                    LogRecord::new(LogLevel::Info, "output printed")
                        .kind("output")
                        .field("len", text.len()),
                );
                Ok(GenerateOutcome::Printed)
            }
        }
    }
}
