//! Command line options.

use std::path::PathBuf;

use derive_more::{Display, From};

pub const DEFAULT_PROMPT: &str = "» ";

pub const USAGE: &str = "\
Usage: humble [options] [files...]

Loads each file in order into one environment, then starts the REPL if no
files were given or --interactive is set.

Options:
  -h, --help         Print this help message
  -q, --quiet        Do not print the banner and farewell lines
  -i, --interactive  Start the REPL after loading files
      --prompt TEXT  REPL prompt (default: \"» \")
      --ast          Print every form read as JSON before evaluating it

Set RUST_LOG=debug (or trace) to watch the evaluator.";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub quiet: bool,
    pub interactive: bool,
    pub prompt: String,
    pub show_ast: bool,
    pub files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quiet: false,
            interactive: false,
            prompt: DEFAULT_PROMPT.to_string(),
            show_ast: false,
            files: Vec::new(),
        }
    }
}

impl Config {
    /// The REPL runs when there is nothing else to do, or when asked to.
    pub fn wants_repl(&self) -> bool {
        self.interactive || self.files.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    Run(Config),
}

#[derive(Debug, Display, From)]
pub enum ConfigError {
    #[display(fmt = "{}", _0)]
    Args(pico_args::Error),
    #[from(ignore)]
    #[display(fmt = "unknown option {:?}", _0)]
    UnknownOption(String),
}

impl std::error::Error for ConfigError {}

pub fn parse(mut args: pico_args::Arguments) -> Result<Command, ConfigError> {
    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }

    let mut config = Config {
        quiet: args.contains(["-q", "--quiet"]),
        interactive: args.contains(["-i", "--interactive"]),
        show_ast: args.contains("--ast"),
        ..Config::default()
    };
    if let Some(prompt) = args.opt_value_from_str::<_, String>("--prompt")? {
        config.prompt = prompt;
    }

    for arg in args.finish() {
        let arg = arg.to_string_lossy().into_owned();
        if arg.starts_with('-') {
            return Err(ConfigError::UnknownOption(arg));
        }
        config.files.push(PathBuf::from(arg));
    }

    Ok(Command::Run(config))
}

pub fn from_env() -> Result<Command, ConfigError> {
    parse(pico_args::Arguments::from_env())
}
