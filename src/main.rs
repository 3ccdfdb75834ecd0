#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use arc_runner::cli::Cli;
use arc_runner::config::ProcessEnvironment;
use arc_runner::dispatcher::Dispatcher;
use arc_runner::error::ArcError;
use arc_runner::home::Home;
use arc_runner::logging;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            // Follow the short clap error with the full command listing
            let _ = err.print();
            eprintln!("\n{}", Cli::command().render_help());
            return ExitCode::from(2);
        }
        Err(err) => err.exit(),
    };
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<ArcError>()
                .map(ArcError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let home = Home::from_env()?;
    home.ensure()
        .with_context(|| format!("Cannot prepare {}", home.root().display()))?;

    let env = ProcessEnvironment;
    Dispatcher::new(&home, &env).dispatch(cli.command.as_ref())?;
    Ok(())
}
