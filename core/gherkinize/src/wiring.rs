//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StdEnvResolver, StdFileSystem, VerboseLog};
use common::ports::outbound::{EnvResolver, FileSystem, Log};

use crate::adapter::{StdConsole, StdTextGeneratorFactory};
use crate::ports::outbound::{Console, TextGeneratorFactory};
use crate::usecase::GenerateScenarioUseCase;

/// main レイヤーが使う組み立て済みのアプリ
pub struct App {
    pub logger: Arc<dyn Log>,
    pub console: Arc<dyn Console>,
    pub generator_factory: Arc<dyn TextGeneratorFactory>,
    pub generate_use_case: GenerateScenarioUseCase,
}

/// 構造化ログ: ホーム配下の JSONL。ホームが解決できなければ捨てる
fn wire_logger(fs: &Arc<dyn FileSystem>, env: &dyn EnvResolver, verbose: bool) -> Arc<dyn Log> {
    let base: Arc<dyn Log> = match env.resolve_log_file_path() {
        Ok(path) => Arc::new(FileJsonLog::new(Arc::clone(fs), path)),
        Err(_) => Arc::new(NoopLog),
    };
    if verbose {
        Arc::new(VerboseLog::new(base))
    } else {
        base
    }
}

/// 環境変数解決を差し替えて組み立てる（テストでは GHERKINIZE_HOME を一時ディレクトリに向ける）
pub fn wire_with_env(env: Arc<dyn EnvResolver>, verbose: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let logger = wire_logger(&fs, env.as_ref(), verbose);
    let console: Arc<dyn Console> = Arc::new(StdConsole);
    let generator_factory: Arc<dyn TextGeneratorFactory> =
        Arc::new(StdTextGeneratorFactory::new(Arc::clone(&fs), env));
    let generate_use_case = GenerateScenarioUseCase::new(
        fs,
        Arc::clone(&logger),
        Arc::clone(&console),
        Arc::clone(&generator_factory),
    );
    App {
        logger,
        console,
        generator_factory,
        generate_use_case,
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_gherkinize(verbose: bool) -> App {
    wire_with_env(Arc::new(StdEnvResolver), verbose)
}
