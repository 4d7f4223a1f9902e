use std::path::PathBuf;

use crate::domain::{GenCommand, GenerateRequest, InputFormat, OutputDestination, PromptSource};
use clap::builder::{ArgAction, PossibleValuesParser};
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

/// 入力・出力ファイルを探す既定のディレクトリ（実行ディレクトリの親）
pub const DEFAULT_DATA_DIR: &str = "..";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -L / --list-profiles: 利用可能なプロファイル一覧を表示
    pub list_profiles: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    pub input: InputFormat,
    /// -f / --file: 入力ファイル（省略時はデータディレクトリの data.txt / data.json）
    pub file: Option<PathBuf>,
    pub data_dir: PathBuf,
    /// -o / --output: 出力ファイル（省略時はデータディレクトリの output.txt）
    pub output: Option<PathBuf>,
    /// --stdout: ファイルではなくコンソールへ表示
    pub stdout: bool,
    pub template: Option<PathBuf>,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            list_profiles: false,
            verbose: false,
            input: InputFormat::default(),
            file: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output: None,
            stdout: false,
            template: None,
            profile: None,
            model: None,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("gherkinize")
        .about("Convert a test case description into a Gherkin scenario with an LLM")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-profiles")
                .short('L')
                .long("list-profiles")
                .help("List available provider profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print structured log records to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("input")
                .short('i')
                .long("input")
                .value_name("format")
                .help("Input format: text (data.txt), json (data.json) or inline (built-in sample)")
                .value_parser(PossibleValuesParser::new(["text", "txt", "json", "inline"]))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("file")
                .short('f')
                .long("file")
                .value_name("path")
                .help("Input file (default: <data-dir>/data.txt or data.json)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("dir")
                .help("Directory holding data.txt / data.json / output.txt (default: ..)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .value_name("path")
                .help("Output file, overwritten (default: <data-dir>/output.txt)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("stdout")
                .long("stdout")
                .help("Print the scenario to the console instead of writing a file")
                .action(ArgAction::SetTrue)
                .conflicts_with("output"),
        )
        .arg(
            clap::Arg::new("template")
                .short('t')
                .long("template")
                .value_name("path")
                .help("Prompt template file containing {test_case_data}")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Provider profile (completion, chat, echo, or one from profiles.json)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gpt-3.5-turbo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let input = matches
        .get_one::<String>("input")
        .and_then(|s| InputFormat::from_str(s))
        .unwrap_or_default();
    Config {
        help: matches.get_flag("help"),
        list_profiles: matches.get_flag("list-profiles"),
        verbose: matches.get_flag("verbose"),
        input,
        file: matches.get_one::<PathBuf>("file").cloned(),
        data_dir: matches
            .get_one::<PathBuf>("data-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        output: matches.get_one::<PathBuf>("output").cloned(),
        stdout: matches.get_flag("stdout"),
        template: matches.get_one::<PathBuf>("template").cloned(),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
    }
}

/// clap のエラーを 1 件のメッセージにする
///
/// Usage 行と `--help` の案内は除く（main が Usage を 1 回だけ表示する）。
fn clap_error_message(e: &clap::Error) -> String {
    e.to_string()
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("Usage:")
                && !line.starts_with("For more information")
        })
        .map(|line| line.strip_prefix("error: ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(clap_error_message(&e)))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(clap_error_message(&e)))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "gherkinize", &mut std::io::stdout());
}

/// Config を GenCommand に変換する
pub fn config_to_command(config: Config) -> GenCommand {
    if config.help {
        return GenCommand::Help;
    }

    if config.list_profiles {
        return GenCommand::ListProfiles;
    }

    let input_path = config.input.default_file_name().map(|name| {
        config
            .file
            .clone()
            .unwrap_or_else(|| config.data_dir.join(name))
    });
    let source = match (config.input, input_path) {
        (InputFormat::Text, Some(path)) => PromptSource::Text(path),
        (InputFormat::Json, Some(path)) => PromptSource::Json(path),
        _ => PromptSource::Inline,
    };

    let destination = if config.stdout {
        OutputDestination::Console
    } else {
        OutputDestination::File(
            config
                .output
                .clone()
                .unwrap_or_else(|| config.data_dir.join("output.txt")),
        )
    };

    GenCommand::Generate(GenerateRequest {
        source,
        destination,
        template: config.template,
        profile: config.profile,
        model: config.model,
    })
}
