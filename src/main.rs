use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use dotref::cli::{self, Command};
use dotref::commands;
use dotref::logging::{self, Logger, Palette};
use dotref::resources;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let colored = logging::colors_enabled();
    logging::init_subscriber(args.verbose, colored);
    let palette = Palette::new(colored);
    let log = Arc::new(Logger::new(args.command.name()));

    let result = match args.command {
        Command::Init => commands::init::run(&args.global, log.as_ref(), palette),
        Command::Status => {
            commands::apply::run(&args.global, resources::Command::Status, log.clone(), palette)
        }
        Command::Sync => {
            commands::apply::run(&args.global, resources::Command::Sync, log.clone(), palette)
        }
        Command::Unlink => {
            commands::apply::run(&args.global, resources::Command::Unlink, log.clone(), palette)
        }
        Command::Profiles => commands::profiles::run(&args.global, log.as_ref(), palette),
        Command::Version => {
            commands::version::run(log.as_ref(), palette);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
