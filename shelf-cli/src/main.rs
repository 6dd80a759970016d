//! shelf CLI
//!
//! Command-line interface and interactive shell for tracking learning
//! resources and playlists.

mod cli_types;
mod commands;
mod error;
mod logger;
mod prompt;
mod render;
mod session;
mod settings;
mod shell;

use std::io::IsTerminal;

use clap::Parser;

use cli_types::{Cli, Commands};
use error::CliError;
use prompt::Prompter;
use session::Session;
use settings::Settings;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    let settings = Settings::load();
    let (data_dir, source) = settings::resolve_data_dir(cli.data_dir, &settings);
    log::debug!("Data directory: {} ({})", data_dir.display(), source);

    let mut session = Session::new(data_dir, source, settings, cli.quiet);
    session.plain_progress = cli.logfile.is_some() || !std::io::stdout().is_terminal();

    let result: Result<(), CliError> = match cli.command {
        None | Some(Commands::Shell) => shell::run(&mut session, &mut Prompter::stdin()),
        Some(command) => commands::dispatch(&mut session, command),
    };

    if let Err(e) = result {
        e.report();
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}
