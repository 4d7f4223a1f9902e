mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::path::PathBuf;
use std::process;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::GenCommand;
use ports::inbound::UseCaseRunner;
use wiring::{wire_gherkinize, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn log(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record.layer("cli"));
    }

    fn dispatch(&self, cmd: GenCommand) -> Result<i32, Error> {
        match cmd {
            GenCommand::Help => {
                print_help();
                Ok(0)
            }
            GenCommand::ListProfiles => {
                let (names, default) = self.app.generator_factory.list_profiles()?;
                for name in &names {
                    if *name == default {
                        self.app.console.print(&format!("{} (default)", name));
                    } else {
                        self.app.console.print(name);
                    }
                }
                Ok(0)
            }
            GenCommand::Generate(request) => {
                self.app.generate_use_case.run(&request).map(|_| 0)
            }
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(cmd);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        self.log(
            LogRecord::new(LogLevel::Info, "command finished")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            self.log(LogRecord::new(LogLevel::Error, e.to_string()).kind("error"));
        }
        result
    }
}

fn cmd_name_for_log(cmd: &GenCommand) -> &'static str {
    match cmd {
        GenCommand::Help => "help",
        GenCommand::ListProfiles => "list-profiles",
        GenCommand::Generate(_) => "generate",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("gherkinize: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // 既存の環境変数は上書きされない
    let dotenv_path: Option<PathBuf> = dotenv::dotenv().ok();
    let app = wire_gherkinize(config.verbose);
    if let Some(path) = dotenv_path {
        let _ = app.logger.log(
            &LogRecord::new(LogLevel::Debug, "settings file loaded")
                .layer("cli")
                .kind("config")
                .field("path", path.display().to_string()),
        );
    }
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: gherkinize [options]");
}

fn print_help() {
    println!("Usage: gherkinize [options]");
    println!("Options:");
    println!("  -h, --help                     Show this help message");
    println!("  -L, --list-profiles            List available provider profiles (from profiles.json + built-ins)");
    println!("  -v, --verbose                  Also print structured log records to stderr");
    println!("  -i, --input <format>           Input format: text (data.txt, default), json (data.json), inline (built-in sample)");
    println!("  -f, --file <path>              Input file. Default: <data-dir>/data.txt or <data-dir>/data.json");
    println!("  -d, --data-dir <dir>           Directory for default input/output files. Default: ..");
    println!("  -o, --output <path>            Output file (overwritten). Default: <data-dir>/output.txt");
    println!("      --stdout                   Print the scenario to the console instead of writing a file");
    println!("  -t, --template <path>          Prompt template file; must contain {{test_case_data}}");
    println!("  -p, --profile <profile>        Provider profile (completion, chat, echo, ...). Default: profiles.json default, or completion");
    println!("  -m, --model <model>            Model name. Default: profile default");
    println!("      --generate <shell>         Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY     API key for the completion/chat profiles (may be set in a .env file)");
    println!("  GHERKINIZE_HOME    Home directory. Profiles: $GHERKINIZE_HOME/profiles.json; log: $GHERKINIZE_HOME/log/");
    println!("                     If unset, $XDG_CONFIG_HOME/gherkinize (e.g. ~/.config/gherkinize) is used.");
    println!();
    println!("Description:");
    println!("  Read a test case description, ask the LLM to rewrite it as a Gherkin scenario,");
    println!("  and write the result to the output file.");
    println!();
    println!("Examples:");
    println!("  gherkinize");
    println!("  gherkinize -i json -d ./cases");
    println!("  gherkinize -i inline --stdout -p chat");
    println!("  gherkinize -p echo -f notes.txt --stdout");
}
