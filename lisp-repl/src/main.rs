mod config;
mod repl;

use std::io::{self, Write};
use std::process::ExitCode;

use config::{Command, Config};
use log::error;
use repl::Session;

const BANNER: &str = "Welcome to humble lisp (hit CTRL-D to quit)";
const FAREWELL: &str = "kthxbai ☺";

fn main() -> ExitCode {
    env_logger::init();

    let config = match config::from_env() {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", config::USAGE);
            return ExitCode::SUCCESS;
        },
        Err(e) => {
            eprintln!("humble: {}", e);
            eprintln!("{}", config::USAGE);
            return ExitCode::from(2);
        },
    };

    match run(&config) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("humble: {}", e);
            ExitCode::FAILURE
        },
    }
}

/// Returns the number of file forms that failed, when no REPL followed.
fn run(config: &Config) -> io::Result<usize> {
    let session = Session::new(config.show_ast);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let mut failures = 0;
    for path in &config.files {
        failures += session
            .load_file(path, &mut out, &mut err)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
    }

    if !config.wants_repl() {
        return Ok(failures);
    }

    if !config.quiet {
        writeln!(out, "{}", BANNER)?;
    }
    let stdin = io::stdin();
    session.repl(&mut stdin.lock(), &mut out, &mut err, &config.prompt)?;
    if !config.quiet {
        writeln!(out, "\n{}", FAREWELL)?;
    }
    Ok(0)
}
